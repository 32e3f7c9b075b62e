use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Text,
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use ratatui_runtime::{Screen, ScreenTransition};

use super::TableViewScreen;
use crate::command::dashboard::{
    DashboardData,
    panel::{PanelKind, PanelSelection},
    widgets::PanelView,
};

/// "Show CSV File" followed by one checkbox per panel.
const SIDEBAR_ENTRIES: usize = PanelKind::ALL.len() + 1;
const SIDEBAR_WIDTH: u16 = 52;

/// Main dashboard: panel checkboxes on the left, a page of panels on the right.
#[derive(Debug)]
pub(crate) struct OverviewScreen {
    data: Rc<DashboardData>,
    selection: PanelSelection,
    cursor: usize,
}

impl OverviewScreen {
    pub(crate) fn new(data: Rc<DashboardData>, selection: PanelSelection) -> Self {
        Self {
            data,
            selection,
            cursor: 0,
        }
    }

    /// Panel under the sidebar cursor, `None` on the "Show CSV File" entry.
    fn selected_panel(&self) -> Option<PanelKind> {
        self.cursor.checked_sub(1).map(|i| PanelKind::ALL[i])
    }

    fn open_table(&self) -> ScreenTransition {
        ScreenTransition::Push(Box::new(TableViewScreen::new(Rc::clone(&self.data))))
    }
}

impl Screen for OverviewScreen {
    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
            KeyCode::Char('t') => return self.open_table(),
            KeyCode::Char(' ') | KeyCode::Enter => match self.selected_panel() {
                Some(kind) => self.selection.toggle(kind),
                None => return self.open_table(),
            },
            KeyCode::Up => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(SIDEBAR_ENTRIES - 1);
            }
            KeyCode::Down => self.cursor = (self.cursor + 1) % SIDEBAR_ENTRIES,
            KeyCode::Left => self.selection.previous_page(),
            KeyCode::Right => self.selection.next_page(),
            KeyCode::Char('a') => self.selection.show_all(),
            KeyCode::Char('n') => self.selection.hide_all(),
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [sidebar_area, panels_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        let sidebar = Sidebar {
            selection: &self.selection,
            cursor: self.cursor,
            record_count: self.data.table.len(),
        };
        let grid = PanelGrid {
            panels: self.selection.current_page(),
            data: &self.data,
            page: self.selection.page(),
            page_count: self.selection.page_count(),
        };
        frame.render_widget(sidebar, sidebar_area);
        frame.render_widget(grid, panels_area);

        let help_text = Text::from(
            "↑/↓: Select | Space: Toggle | a/n: All/None | ←/→: Page | t: CSV | q/Esc: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .centered();
        frame.render_widget(help_text, help_area);
    }
}

struct Sidebar<'a> {
    selection: &'a PanelSelection,
    cursor: usize,
    record_count: usize,
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = std::iter::once(ListItem::new(format!(
            "Show CSV File ({} answers)",
            self.record_count
        )))
        .chain(PanelKind::ALL.iter().map(|&kind| {
            let mark = if self.selection.is_visible(kind) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(format!("{mark} {}", kind.title()))
        }))
        .collect::<Vec<_>>();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .title("Options")
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

/// Up to four panels laid out in two rows.
struct PanelGrid<'a> {
    panels: Vec<PanelKind>,
    data: &'a DashboardData,
    page: usize,
    page_count: usize,
}

impl Widget for PanelGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title(format!(
                "Extracurricular Activities Dashboard (page {}/{})",
                self.page + 1,
                self.page_count
            ));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        if self.panels.is_empty() {
            let text = Paragraph::new("No panel selected. Press 'a' to show every panel.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            Widget::render(text, inner, buf);
            return;
        }

        let [top, bottom] =
            Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);
        let cells = [top, bottom].into_iter().flat_map(|row| {
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas::<2>(row)
        });
        for (kind, cell) in self.panels.into_iter().zip(cells) {
            PanelView {
                kind,
                data: self.data,
            }
            .render(cell, buf);
        }
    }
}
