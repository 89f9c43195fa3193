//! Line splitting and row tokenization.
//!
//! Columns are counted in characters, not bytes, so accented lyrics
//! (`"Refrão"`, `"coração"`) line up with the ASCII chord row above them.

use std::iter::Peekable;
use std::str::CharIndices;

/// A token of a chord row with its position in the untrimmed row
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken<'a> {
    pub text: &'a str,
    /// Character column of the first character
    pub column: usize,
    /// Byte offset of the first character
    pub offset: usize,
}

/// Tokenizer for a single row of text.
///
/// Tokens are separated by whitespace and parentheses; the separators
/// themselves are dropped, so `"(Am) G"` yields `Am` at column 1 and `G` at
/// column 5.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            column: 0,
        }
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next()?;
        self.column += 1;
        Some(next)
    }

    fn peek(&mut self) -> Option<&(usize, char)> {
        self.chars.peek()
    }

    fn skip_delimiters(&mut self) {
        while let Some(&(_, c)) = self.peek() {
            if !is_delimiter(c) {
                break;
            }
            self.advance();
        }
    }

    pub fn tokenize(&mut self) -> Vec<LocatedToken<'a>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_delimiters();
            let Some(&(start, _)) = self.peek() else {
                break;
            };
            let column = self.column;

            let mut end = self.input.len();
            while let Some(&(offset, c)) = self.peek() {
                if is_delimiter(c) {
                    end = offset;
                    break;
                }
                self.advance();
            }

            tokens.push(LocatedToken {
                text: &self.input[start..end],
                column,
                offset: start,
            });
        }

        tokens
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

/// Tokenize one row of text.
pub fn tokenize_line(line: &str) -> Vec<LocatedToken<'_>> {
    Lexer::new(line).tokenize()
}

/// Split raw text into lines on `\n`, dropping a trailing `\r` from each.
///
/// Unlike `str::lines`, a trailing newline produces a final empty line, so
/// every line break of the input is accounted for.
pub fn split_lines(raw: &str) -> Vec<&str> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Width of a string in columns (characters).
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}
