//! Full-screen TUI workflows.

mod import;

pub use import::{ImportScreen, ImportSummary, QuickFilter};
