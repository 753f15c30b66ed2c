//! Raw document text split into lines ready for extraction.

use super::rules::patterns::INLINE_BLANKS;

/// Document text prepared for extraction.
#[derive(Debug, Clone)]
pub struct Document {
    raw: String,
    lines: Vec<String>,
    flat: String,
}

impl Document {
    /// Split `text` into lines and collapse runs of spaces and tabs in each.
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let lines: Vec<String> = split_lines(&raw)
            .into_iter()
            .map(|l| INLINE_BLANKS.replace_all(l, " ").into_owned())
            .collect();
        let flat = lines.join(" ");

        Self { raw, lines, flat }
    }

    /// Text exactly as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lines with collapsed blanks.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined by a single space.
    pub fn flat(&self) -> &str {
        &self.flat
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on every line boundary, `\r\n` counting once. A trailing boundary
/// does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        let mut next = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                next = j + 1;
            }
        }
        start = next;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("page1\u{0c}page2"), vec!["page1", "page2"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_document_collapses_blanks() {
        let doc = Document::new("ITEM \t A   10,00\nFILIAL  3\n");
        assert_eq!(doc.lines(), &["ITEM A 10,00".to_string(), "FILIAL 3".to_string()]);
        assert_eq!(doc.flat(), "ITEM A 10,00 FILIAL 3");
        assert_eq!(doc.raw(), "ITEM \t A   10,00\nFILIAL  3\n");
    }
}
