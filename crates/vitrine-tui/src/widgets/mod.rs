mod header;
mod hero;
mod page_view;
mod progress;
mod status_bar;
mod text;

pub use header::HeaderWidget;
pub use page_view::{page_lines, PageWidget};
pub use progress::ProgressWidget;
pub use status_bar::StatusBarWidget;
