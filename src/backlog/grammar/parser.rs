//! Lenient reader for backlog documents.
//!
//! Unrecognised lines are skipped and malformed blocks are dropped with a
//! warning so that hand edits never prevent a backlog from loading.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::items::{ItemCollector, ListItem};
use super::{DESCRIPTION_MARKER, HISTORY_MARKER, OPTIONS_MARKER, RESOLUTION_MARKER};
use crate::backlog::domain::{Backlog, HistoryEntry, OptionId, Task, TaskId, TaskOption};

/// Field currently receiving continuation lines inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Description,
    Options,
    Resolution,
}

/// A `## <n>` block before it is interpreted as a task or history entry.
#[derive(Debug)]
struct RawBlock {
    label: String,
    description: String,
    options: Vec<ListItem>,
    resolution: String,
}

#[derive(Debug)]
struct BlockReader {
    label: String,
    field: Field,
    description: String,
    options: ItemCollector,
    resolution: String,
}

impl BlockReader {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            field: Field::None,
            description: String::new(),
            options: ItemCollector::default(),
            resolution: String::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix(DESCRIPTION_MARKER) {
            self.switch_to(Field::Description);
            rest.trim().clone_into(&mut self.description);
        } else if line.starts_with(OPTIONS_MARKER) {
            self.switch_to(Field::Options);
        } else if let Some(rest) = line.strip_prefix(RESOLUTION_MARKER) {
            self.switch_to(Field::Resolution);
            rest.trim().clone_into(&mut self.resolution);
        } else {
            match self.field {
                Field::Description => append_words(&mut self.description, line),
                Field::Resolution => append_words(&mut self.resolution, line),
                Field::Options => self.options.feed(line),
                Field::None => {}
            }
        }
    }

    fn switch_to(&mut self, field: Field) {
        if self.field == Field::Options {
            self.options.close();
        }
        self.field = field;
    }

    fn finish(self) -> RawBlock {
        RawBlock {
            label: self.label,
            description: self.description,
            options: self.options.finish(),
            resolution: self.resolution,
        }
    }
}

fn append_words(field: &mut String, line: &str) {
    let words = line.trim();
    if words.is_empty() {
        return;
    }
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(words);
}

/// Returns the digits of a `## <digits>` header line.
fn header_label(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let label = rest.trim();
    let is_number = !label.is_empty() && label.chars().all(|character| character.is_ascii_digit());
    is_number.then_some(label)
}

fn read_blocks<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<BlockReader> = None;
    for line in lines {
        if let Some(label) = header_label(line) {
            if let Some(reader) = current.replace(BlockReader::new(label)) {
                blocks.push(reader.finish());
            }
        } else if let Some(reader) = current.as_mut() {
            reader.feed(line);
        }
    }
    if let Some(reader) = current {
        blocks.push(reader.finish());
    }
    blocks
}

fn into_options(items: Vec<ListItem>) -> Vec<TaskOption> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            TaskOption::new(OptionId::from_index(index), &item.title, &item.details, "").ok()
        })
        .collect()
}

/// Parses backlog document text into a [`Backlog`].
///
/// Blocks before a line reading `# History` become active tasks keyed by
/// their header number; blocks after it become history entries in document
/// order, numbered by position.
#[must_use]
pub fn parse(text: &str) -> Backlog {
    let lines: Vec<&str> = text.lines().collect();
    let history_start = lines
        .iter()
        .position(|line| line.trim() == HISTORY_MARKER)
        .unwrap_or(lines.len());
    let (active_lines, rest) = lines.split_at(history_start);
    let history_lines = rest.get(1..).unwrap_or_default();

    let mut tasks = BTreeMap::new();
    for block in read_blocks(active_lines.iter().copied()) {
        let Ok(id) = block.label.parse::<TaskId>() else {
            tracing::warn!(label = %block.label, "dropping task block with invalid id");
            continue;
        };
        match tasks.entry(id) {
            Entry::Occupied(_) => {
                tracing::warn!(task_id = %id, "dropping duplicate task block");
            }
            Entry::Vacant(slot) => {
                slot.insert(Task::from_document(
                    id,
                    block.description,
                    into_options(block.options),
                    block.resolution,
                ));
            }
        }
    }

    let history = read_blocks(history_lines.iter().copied())
        .into_iter()
        .zip(1_u64..)
        .map(|(block, sequence)| {
            HistoryEntry::from_document(sequence, block.description, block.resolution)
        })
        .collect();

    Backlog::from_document(tasks, history)
}
