//! Reusable TUI widgets.

mod review_table;
mod select_list;
mod text_area;
mod text_input;

pub use review_table::ReviewTable;
pub use select_list::{SelectAction, SelectList};
pub use text_area::TextAreaWidget;
pub use text_input::TextInput;
