//! `key: value` parameter extraction.
//!
//! A value runs from its key to the start of the next key the operation
//! accepts, so values may contain spaces, newlines, colons and words that
//! only other operations treat as keys.

use std::collections::BTreeMap;

/// A recognised key occurrence: where it starts and where its value starts.
#[derive(Debug, Clone, Copy)]
struct KeyMatch {
    key: &'static str,
    start: usize,
    value_start: usize,
}

fn is_word_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

/// Matches `key` followed by optional whitespace and a colon at `start`.
fn match_key_at(text: &str, start: usize, key: &'static str) -> Option<KeyMatch> {
    let rest = text.get(start..)?.strip_prefix(key)?;
    let after_key = rest.trim_start();
    let after_colon = after_key.strip_prefix(':')?;
    let value_offset = after_colon.len() - after_colon.trim_start().len();
    let value_start = text.len() - after_colon.len() + value_offset;
    Some(KeyMatch {
        key,
        start,
        value_start,
    })
}

fn find_keys(text: &str, keys: &[&'static str]) -> Vec<KeyMatch> {
    let mut matches = Vec::new();
    let mut previous: Option<char> = None;
    let mut skip_until = 0;
    for (index, character) in text.char_indices() {
        let at_boundary = previous.is_none_or(|before| !is_word_char(before));
        previous = Some(character);
        if index < skip_until || !at_boundary {
            continue;
        }
        if let Some(found) = keys
            .iter()
            .copied()
            .find_map(|key| match_key_at(text, index, key))
        {
            skip_until = found.value_start;
            matches.push(found);
        }
    }
    matches
}

/// Splits parameter text into values for the given `keys`.
///
/// Only the listed keys start a value. Text before the first of them is
/// ignored and a repeated key keeps its last value.
#[must_use]
pub fn parse_params(text: &str, keys: &[&'static str]) -> BTreeMap<&'static str, String> {
    let matches = find_keys(text, keys);
    let mut params = BTreeMap::new();
    for (position, found) in matches.iter().enumerate() {
        let value_end = matches
            .get(position + 1)
            .map_or(text.len(), |next| next.start);
        let value = text
            .get(found.value_start..value_end)
            .unwrap_or_default()
            .trim();
        params.insert(found.key, value.to_owned());
    }
    params
}
