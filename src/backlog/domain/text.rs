//! Whitespace normalisation shared by domain constructors.
//!
//! The document grammar joins continuation lines of single-line fields with
//! a space and keeps option details line by line, so values are normalised
//! into that shape before they enter the aggregate.

/// Collapses `text` into one line, joining its non-blank lines with a space.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims each line of `text` and drops blank ones, keeping line breaks.
#[must_use]
pub fn multi_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
