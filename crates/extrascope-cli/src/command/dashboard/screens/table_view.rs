use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use extrascope_survey::schema::Column;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Row, Table, TableState},
};
use ratatui_runtime::{Screen, ScreenTransition};

use crate::command::dashboard::DashboardData;

const COLUMN_WIDTH: u16 = 18;
const PAGE_ROWS: usize = 20;

/// Scrollable view of the cleaned survey table.
#[derive(Debug)]
pub(crate) struct TableViewScreen {
    data: Rc<DashboardData>,
    state: TableState,
    first_column: usize,
}

impl TableViewScreen {
    pub(crate) fn new(data: Rc<DashboardData>) -> Self {
        Self {
            data,
            state: TableState::default(),
            first_column: 0,
        }
    }

    fn selected_row(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    /// Selects `row`, clamped to the last record.
    fn select_row(&mut self, row: usize) {
        let Some(last) = self.data.table.len().checked_sub(1) else {
            return;
        };
        self.state.select(Some(row.min(last)));
    }
}

impl Screen for TableViewScreen {
    fn on_enter(&mut self) {
        if self.state.selected().is_none() {
            self.select_row(0);
        }
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return ScreenTransition::Stay;
        }
        let row = self.selected_row();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Pop,
            KeyCode::Up => self.select_row(row.saturating_sub(1)),
            KeyCode::Down => self.select_row(row.saturating_add(1)),
            KeyCode::PageUp => self.select_row(row.saturating_sub(PAGE_ROWS)),
            KeyCode::PageDown => self.select_row(row.saturating_add(PAGE_ROWS)),
            KeyCode::Home => self.select_row(0),
            KeyCode::End => self.select_row(usize::MAX),
            KeyCode::Left => self.first_column = self.first_column.saturating_sub(1),
            KeyCode::Right => {
                self.first_column = (self.first_column + 1).min(Column::cleaned().len() - 1);
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [table_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let fitting = usize::from(table_area.width.saturating_sub(2) / (COLUMN_WIDTH + 1)).max(1);
        let columns = Column::cleaned()
            .iter()
            .copied()
            .skip(self.first_column)
            .take(fitting)
            .collect::<Vec<_>>();

        let header = Row::new(columns.iter().map(|column| column.name())).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .data
            .table
            .iter()
            .map(|record| Row::new(columns.iter().map(|&column| record.label(column))));
        let title = format!(
            "Cleaned Survey ({} answers, columns {}-{} of {})",
            self.data.table.len(),
            self.first_column + 1,
            self.first_column + columns.len(),
            Column::cleaned().len()
        );
        let table = Table::new(rows, columns.iter().map(|_| Constraint::Length(COLUMN_WIDTH)))
            .header(header)
            .block(Block::bordered().title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .column_spacing(1);
        frame.render_stateful_widget(table, table_area, &mut self.state);

        let help_text = Text::from("↑/↓/PgUp/PgDn: Scroll | ←/→: Columns | q/Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }
}
