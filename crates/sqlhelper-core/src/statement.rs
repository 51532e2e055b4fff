//! Statement splitting and character counting

use crate::error::Span;

/// One `;`-delimited unit of SQL with `--` comments removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Trimmed statement text without comments
    pub text: String,
    /// Location in the original text, from the first to the last significant character
    pub span: Span,
    /// Whether a `;` directly follows the last significant character
    pub terminated: bool,
}

impl Statement {
    /// 1-indexed line the statement starts on
    pub fn line(&self) -> usize {
        self.span.line
    }
}

/// Split SQL text into statements.
///
/// `--` starts a comment that runs to the end of the line, also inside
/// quotes. A `;` inside a comment does not split. Whitespace-only segments
/// are skipped. A statement only counts as terminated when the `;` comes
/// right after its text, so `SELECT 1 ;` is not.
pub fn split_statements(sql: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut builder = StatementBuilder::default();
    let mut chars = sql.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                // Skip line comment, keep the newline
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ';' => statements.extend(builder.finish(sql, Some(i))),
            _ => builder.push(i, ch),
        }
    }
    statements.extend(builder.finish(sql, None));

    statements
}

#[derive(Default)]
struct StatementBuilder {
    text: String,
    start: Option<usize>,
    end: usize,
}

impl StatementBuilder {
    fn push(&mut self, offset: usize, ch: char) {
        self.text.push(ch);
        if !ch.is_whitespace() {
            self.start.get_or_insert(offset);
            self.end = offset + ch.len_utf8();
        }
    }

    /// `delimiter` is the offset of the `;` that ended the segment
    fn finish(&mut self, source: &str, delimiter: Option<usize>) -> Option<Statement> {
        let text = std::mem::take(&mut self.text);
        let start = self.start.take()?;
        Some(Statement {
            text: text.trim().to_string(),
            span: Span::locate(source, start, self.end - start),
            terminated: delimiter == Some(self.end),
        })
    }
}

/// Count occurrences of `ch` in `text`
pub fn count_char(text: &str, ch: char) -> usize {
    text.chars().filter(|&c| c == ch).count()
}

/// `true` when `text` holds an even number of single quotes
pub fn quotes_balanced(text: &str) -> bool {
    count_char(text, '\'') % 2 == 0
}

/// Number of `(` and `)` in `text`
pub fn paren_counts(text: &str) -> (usize, usize) {
    (count_char(text, '('), count_char(text, ')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let stmts = split_statements("SELECT 1; SELECT 2;");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].text, "SELECT 1");
        assert_eq!(stmts[1].text, "SELECT 2");
        assert!(stmts.iter().all(|s| s.terminated));
    }

    #[test]
    fn test_split_unterminated_tail() {
        let stmts = split_statements("SELECT 1;\nSELECT 2");
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].terminated);
        assert!(!stmts[1].terminated);
        assert_eq!(stmts[1].line(), 2);
    }

    #[test]
    fn test_semicolon_must_follow_text() {
        let stmts = split_statements("SELECT 1 ;\nSELECT 2 -- note\n;\nSELECT 3;");
        assert_eq!(stmts.len(), 3);
        assert!(!stmts[0].terminated);
        assert!(!stmts[1].terminated);
        assert!(stmts[2].terminated);
    }

    #[test]
    fn test_split_strips_comments() {
        let sql = "-- header; not a split\nSELECT id -- trailing\nFROM t;";
        let stmts = split_statements(sql);
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].text, "SELECT id \nFROM t");
        assert_eq!(stmts[0].line(), 2);
        assert_eq!(stmts[0].span.column, 1);
    }

    #[test]
    fn test_span_points_into_original() {
        let sql = "\n\n   DELETE FROM t  ;";
        let stmts = split_statements(sql);
        let span = stmts[0].span;
        assert_eq!(&sql[span.offset..span.offset + span.length], "DELETE FROM t");
        assert_eq!(span.line, 3);
        assert_eq!(span.column, 4);
    }

    #[test]
    fn test_split_skips_blank_segments() {
        assert!(split_statements(" ;\n; -- only a comment\n").is_empty());
    }

    #[test]
    fn test_counting_helpers() {
        assert!(quotes_balanced("'a' 'b'"));
        assert!(!quotes_balanced("'abc"));
        assert_eq!(paren_counts("COUNT((x)"), (2, 1));
    }
}
