//! Numbered and bulleted list items.
//!
//! An item starts at a line such as `1. Title`, `2) Title`, `- Title` or
//! `* Title`. Following lines indented by at least three spaces or a tab are
//! the item's details; any other line closes the item.

/// A list item read from free text or an `**Options:**` field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    /// Text following the item marker.
    pub title: String,
    /// Indented continuation lines, trimmed and newline-joined.
    pub details: String,
}

/// Incremental list-item reader fed one line at a time.
#[derive(Debug, Default)]
pub(crate) struct ItemCollector {
    items: Vec<ListItem>,
    current: Option<(String, Vec<String>)>,
}

impl ItemCollector {
    pub(crate) fn feed(&mut self, line: &str) {
        if let Some((_, details)) = self.current.as_mut()
            && is_detail_line(line)
        {
            details.push(line.trim().to_owned());
            return;
        }

        self.close();
        if let Some(title) = item_title(line) {
            self.current = Some((title.to_owned(), Vec::new()));
        }
    }

    pub(crate) fn close(&mut self) {
        if let Some((title, details)) = self.current.take() {
            self.items.push(ListItem {
                title,
                details: details
                    .into_iter()
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n"),
            });
        }
    }

    pub(crate) fn finish(mut self) -> Vec<ListItem> {
        self.close();
        self.items
    }
}

/// Reads every list item in `text`, ignoring lines that belong to none.
#[must_use]
pub fn parse_list_items(text: &str) -> Vec<ListItem> {
    let mut collector = ItemCollector::default();
    for line in text.lines() {
        collector.feed(line);
    }
    collector.finish()
}

fn is_detail_line(line: &str) -> bool {
    line.starts_with("   ") || line.starts_with('\t')
}

/// Returns the title of a numbered or bulleted item line.
fn item_title(line: &str) -> Option<&str> {
    let content = line.trim_start();
    let rest = numbered_rest(content).or_else(|| bulleted_rest(content))?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    (!title.is_empty()).then_some(title)
}

fn numbered_rest(content: &str) -> Option<&str> {
    let digits_end = content
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(content.len());
    if digits_end == 0 {
        return None;
    }
    let (_, after_digits) = content.split_at(digits_end);
    after_digits
        .strip_prefix('.')
        .or_else(|| after_digits.strip_prefix(')'))
}

fn bulleted_rest(content: &str) -> Option<&str> {
    content
        .strip_prefix('-')
        .or_else(|| content.strip_prefix('*'))
}

#[cfg(test)]
mod tests {
    use super::{ListItem, item_title, parse_list_items};
    use rstest::rstest;

    #[rstest]
    #[case("1. Patch token refresh", Some("Patch token refresh"))]
    #[case("12) Rotate secret", Some("Rotate secret"))]
    #[case("  3.   Indented number", Some("Indented number"))]
    #[case("- Bullet item", Some("Bullet item"))]
    #[case("* Star item", Some("Star item"))]
    #[case("1.No space", None)]
    #[case("-dash", None)]
    #[case("**Options:**", None)]
    #[case("1. ", None)]
    #[case("Plain text", None)]
    #[case(". lonely dot", None)]
    fn item_title_recognises_markers(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(item_title(line), expected);
    }

    #[rstest]
    fn details_attach_to_preceding_item() {
        let text = "1. First\n   detail one\n\tdetail two\n2. Second\nstray line\n   orphan";

        let items = parse_list_items(text);

        assert_eq!(
            items,
            vec![
                ListItem {
                    title: "First".to_owned(),
                    details: "detail one\ndetail two".to_owned(),
                },
                ListItem {
                    title: "Second".to_owned(),
                    details: String::new(),
                },
            ]
        );
    }

    #[rstest]
    fn mixed_numbered_and_bulleted_items_are_read_in_order() {
        let items = parse_list_items("1. Numbered\n- Bulleted\n* Starred\n2) Again");

        let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, ["Numbered", "Bulleted", "Starred", "Again"]);
    }

    #[rstest]
    fn indented_item_markers_inside_details_stay_details() {
        let items = parse_list_items("1. Outer\n   2. nested text");

        assert_eq!(items.len(), 1);
        assert_eq!(
            items.first().map(|item| item.details.as_str()),
            Some("2. nested text")
        );
    }

    #[rstest]
    fn blank_line_closes_details() {
        let items = parse_list_items("1. Item\n   kept\n\n   dropped");

        assert_eq!(
            items.first().map(|item| item.details.as_str()),
            Some("kept")
        );
    }
}
