pub(super) use self::{overview::OverviewScreen, table_view::TableViewScreen};

mod overview;
mod table_view;
