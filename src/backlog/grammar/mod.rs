//! Text grammar of backlog documents.
//!
//! A document is a sequence of `## <id>` task blocks, optionally followed by
//! a `# History` line and archived blocks in the same shape. Each block holds
//! `**Description:**`, `**Options:**` and `**Resolution:**` fields. Options
//! are numbered or bulleted list items with indented detail lines.

mod items;
mod parser;
mod renderer;

pub use items::{ListItem, parse_list_items};
pub use parser::parse;
pub use renderer::render;

pub use crate::backlog::domain::HISTORY_MARKER;

/// Prefix of a task description field.
pub const DESCRIPTION_MARKER: &str = "**Description:**";
/// Prefix of a task options field.
pub const OPTIONS_MARKER: &str = "**Options:**";
/// Prefix of a task resolution field.
pub const RESOLUTION_MARKER: &str = "**Resolution:**";
