//! Input tokenizer - POSIX shell-style word splitting
//!
//! Supports:
//! - Whitespace separated words: `t billable`
//! - Single quotes (fully literal): `'it''s'`
//! - Double quotes with `\"` and `\\` escapes: `"say \"hi\""`
//! - Backslash escapes outside quotes: `two\ words`
//!
//! There are no operators: `|`, `;`, `&`, `#` and friends are ordinary word
//! characters, since every line becomes the argv of a single command.

use thiserror::Error;

/// Quoting mode while scanning a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteMode {
    None,
    Single,
    Double,
}

/// Malformed quoting or escaping in an input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A `'` or `"` was opened but never closed.
    #[error("No closing quotation")]
    UnclosedQuote { quote: char },
    /// The line ended right after a backslash.
    #[error("No escaped character")]
    TrailingEscape,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split a line into argv-style words.
///
/// Quoted pieces glued to unquoted ones form a single word, and an empty
/// quoted string (`''` or `""`) yields an empty word.
pub fn split(input: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut buf = String::new();
    // A word may be empty (`''`), so track whether one is open separately from `buf`.
    let mut in_word = false;
    let mut mode = QuoteMode::None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match mode {
            QuoteMode::Single => {
                if ch == '\'' {
                    mode = QuoteMode::None;
                } else {
                    buf.push(ch);
                }
            }
            QuoteMode::Double => match ch {
                '"' => mode = QuoteMode::None,
                // Inside double quotes only the quote and the backslash itself can be escaped.
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => buf.push(next),
                    Some(next) => {
                        buf.push('\\');
                        buf.push(next);
                    }
                    None => return Err(TokenizeError::TrailingEscape),
                },
                c => buf.push(c),
            },
            QuoteMode::None => match ch {
                '\'' => {
                    mode = QuoteMode::Single;
                    in_word = true;
                }
                '"' => {
                    mode = QuoteMode::Double;
                    in_word = true;
                }
                '\\' => match chars.next() {
                    Some(next) => {
                        buf.push(next);
                        in_word = true;
                    }
                    None => return Err(TokenizeError::TrailingEscape),
                },
                c if is_blank(c) => {
                    if in_word {
                        words.push(std::mem::take(&mut buf));
                        in_word = false;
                    }
                }
                c => {
                    buf.push(c);
                    in_word = true;
                }
            },
        }
    }

    match mode {
        QuoteMode::Single => Err(TokenizeError::UnclosedQuote { quote: '\'' }),
        QuoteMode::Double => Err(TokenizeError::UnclosedQuote { quote: '"' }),
        QuoteMode::None => {
            if in_word {
                words.push(buf);
            }
            Ok(words)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        assert_eq!(split("start oc log").unwrap(), vec!["start", "oc", "log"]);
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        assert_eq!(split("  t \t billable  ").unwrap(), vec!["t", "billable"]);
        assert!(split("").unwrap().is_empty());
        assert!(split(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_quoted_args() {
        assert_eq!(
            split(r#"annotate @1 "fix the build""#).unwrap(),
            vec!["annotate", "@1", "fix the build"]
        );
        assert_eq!(
            split("annotate @1 'fix the build'").unwrap(),
            vec!["annotate", "@1", "fix the build"]
        );
    }

    #[test]
    fn test_mixed_quotes() {
        assert_eq!(
            split(r#"ocs "review 'draft'""#).unwrap(),
            vec!["ocs", "review 'draft'"]
        );
        assert_eq!(
            split("ocs 'review \"draft\"'").unwrap(),
            vec!["ocs", "review \"draft\""]
        );
    }

    #[test]
    fn test_adjacent_pieces_join() {
        assert_eq!(split(r#"a'b c'"d e"f"#).unwrap(), vec!["ab cd ef"]);
    }

    #[test]
    fn test_empty_quotes_make_empty_word() {
        assert_eq!(split("t '' \"\"").unwrap(), vec!["t", "", ""]);
    }

    #[test]
    fn test_backslash_outside_quotes() {
        assert_eq!(split(r"tag two\ words").unwrap(), vec!["tag", "two words"]);
        assert_eq!(split(r"a\'b").unwrap(), vec!["a'b"]);
        assert_eq!(split(r"\n").unwrap(), vec!["n"]);
    }

    #[test]
    fn test_backslash_inside_double_quotes() {
        assert_eq!(split(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
        assert_eq!(split(r#""a\\b""#).unwrap(), vec![r"a\b"]);
        assert_eq!(split(r#""C:\Users""#).unwrap(), vec![r"C:\Users"]);
    }

    #[test]
    fn test_backslash_inside_single_quotes_is_literal() {
        assert_eq!(split(r"'a\b'").unwrap(), vec![r"a\b"]);
    }

    #[test]
    fn test_operators_are_plain_characters() {
        assert_eq!(
            split("ocs a|b; #c &").unwrap(),
            vec!["ocs", "a|b;", "#c", "&"]
        );
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(
            split("t 'unterminated"),
            Err(TokenizeError::UnclosedQuote { quote: '\'' })
        );
        assert_eq!(
            split("t \"unterminated"),
            Err(TokenizeError::UnclosedQuote { quote: '"' })
        );
        assert_eq!(
            split("t 'unterminated").unwrap_err().to_string(),
            "No closing quotation"
        );
    }

    #[test]
    fn test_trailing_escape() {
        assert_eq!(split(r"t billable\"), Err(TokenizeError::TrailingEscape));
        assert_eq!(split(r#"t "billable\"#), Err(TokenizeError::TrailingEscape));
        assert_eq!(
            split(r"t \").unwrap_err().to_string(),
            "No escaped character"
        );
    }
}
