mod cursor;

use cursor::Cursor;
use text_size::{TextLen as _, TextRange, TextSize};
use zephyr_syntax::TokenKind::*;
pub use zephyr_syntax::{Token, TokenKind};

/// Splits Zephyr source into tokens, skipping whitespace and `//` comments.
///
/// Tokens come out in ascending, non-overlapping order and are never empty.
pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: Cursor::new(text) }
    }

    fn offset(&self) -> TextSize {
        self.text.text_len() - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let len = self.cursor.pos_within_token();
        TextRange::at(self.offset() - len, len)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.trivia();

        let first_char = self.cursor.advance()?;
        let kind = self.token_kind(first_char);
        let range = self.range();
        self.cursor.reset_pos_within_token();

        Some(Token::new(kind, range))
    }

    fn trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => self.cursor.advance_while(|c| c != '\n'),
                c if c.is_whitespace() => self.cursor.advance_while(char::is_whitespace),
                _ => break,
            }
        }
        self.cursor.reset_pos_within_token();
    }

    fn token_kind(&mut self, first_char: char) -> TokenKind {
        match first_char {
            ';' => SEMICOLON,
            '=' => ASSIGN,
            '0'..='9' => self.number(),
            '"' | '\'' => self.string(first_char),
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);

                match self.text() {
                    "const" => CONST_KW,
                    "let" => LET_KW,
                    _ => IDENT,
                }
            }
            _ => {
                self.cursor.advance_while(|c| !is_delimiter(c) && !is_ident_continue(c));
                ERROR
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        self.digits();

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits();
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.cursor.advance();
            if self.cursor.matches('-') || self.cursor.matches('+') {
                self.cursor.advance();
            }
            self.digits();
        }

        // `1abc` is one malformed token, not a number followed by a name.
        if is_ident_continue(self.cursor.peek()) {
            self.cursor.advance_while(is_ident_continue);
            return ERROR;
        }

        NUMBER
    }

    fn digits(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
    }

    /// Scans the rest of a string literal. An unterminated literal stops
    /// before the end of the line.
    fn string(&mut self, quote: char) -> TokenKind {
        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '\n' => break,
                '\\' => {
                    self.cursor.advance();
                    if !self.cursor.matches('\n') {
                        self.cursor.advance();
                    }
                }
                c => {
                    self.cursor.advance();
                    if c == quote {
                        return STRING;
                    }
                }
            }
        }

        ERROR
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenizes the whole of `text`.
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | '=' | '"' | '\'')
}
