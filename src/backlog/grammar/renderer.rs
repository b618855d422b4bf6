//! Canonical writer for backlog documents.

use super::{DESCRIPTION_MARKER, HISTORY_MARKER, OPTIONS_MARKER, RESOLUTION_MARKER};
use crate::backlog::domain::{Backlog, HistoryEntry, Task};

/// Renders `backlog` as canonical document text.
///
/// Active tasks are written in ascending identifier order. A resolved task
/// is written with its resolution and never with an options list. History
/// entries follow a `# History` line, numbered by position.
#[must_use]
pub fn render(backlog: &Backlog) -> String {
    let mut blocks: Vec<String> = backlog.tasks().map(render_task).collect();
    if !backlog.history().is_empty() {
        blocks.push(format!("{HISTORY_MARKER}\n"));
        blocks.extend(backlog.history().iter().zip(1_u64..).map(render_entry));
    }
    blocks.join("\n")
}

fn render_task(task: &Task) -> String {
    let mut block = format!("## {}\n\n", task.id());
    push_field(&mut block, DESCRIPTION_MARKER, task.description());
    block.push('\n');
    if task.resolution().is_empty() {
        block.push_str(OPTIONS_MARKER);
        block.push('\n');
        for option in task.options() {
            block.push_str(&format!("{}. {}\n", option.id(), option.title()));
            for line in option.details().lines() {
                block.push_str("   ");
                block.push_str(line);
                block.push('\n');
            }
        }
    } else {
        push_field(&mut block, RESOLUTION_MARKER, task.resolution());
    }
    block
}

fn render_entry((entry, position): (&HistoryEntry, u64)) -> String {
    let mut block = format!("## {position}\n\n");
    push_field(&mut block, DESCRIPTION_MARKER, entry.description());
    block.push('\n');
    push_field(&mut block, RESOLUTION_MARKER, entry.resolution());
    block
}

fn push_field(block: &mut String, marker: &str, value: &str) {
    block.push_str(marker);
    if !value.is_empty() {
        block.push(' ');
        block.push_str(value);
    }
    block.push('\n');
}
