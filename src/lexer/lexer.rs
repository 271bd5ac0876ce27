use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::tokens::{lookup_keyword, Token, TokenKind};

/// Current character once the cursor has moved past the last byte of the source.
pub const EOF_CHAR: char = '\0';

lazy_static! {
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap();
    static ref SYMBOL_PATTERN: Regex = Regex::new("^[a-zA-Z][a-zA-Z0-9]*").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexerConfig {
    /// Surface every `\n` outside literals and block comments as a `Newline` token.
    pub emit_newlines: bool,
}

/// Pull-based scanner over a borrowed source string.
///
/// The cursor is a byte offset into `source`; `current` is the character under
/// it, or `EOF_CHAR` once the cursor has passed the end.
#[derive(Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    current: char,
    file: Rc<String>,
    config: LexerConfig,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Scanner<'a> {
        Scanner::with_config(source, file, LexerConfig::default())
    }

    pub fn with_newlines(source: &'a str, file: Option<String>) -> Scanner<'a> {
        Scanner::with_config(source, file, LexerConfig { emit_newlines: true })
    }

    pub fn with_config(source: &'a str, file: Option<String>, config: LexerConfig) -> Scanner<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut scanner = Scanner {
            source,
            pos: 0,
            current: EOF_CHAR,
            file: file_name,
            config,
            finished: false,
        };
        scanner.load_current();
        scanner
    }

    fn load_current(&mut self) {
        self.current = self.source[self.pos..].chars().next().unwrap_or(EOF_CHAR);
    }

    pub fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += self.current.len_utf8();
        }
        self.load_current();
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn peek(&self) -> char {
        if self.at_eof() {
            return EOF_CHAR;
        }

        self.source[self.pos + self.current.len_utf8()..]
            .chars()
            .next()
            .unwrap_or(EOF_CHAR)
    }

    pub fn current(&self) -> char {
        self.current
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn position_at(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start: self.position_at(start),
            end: self.position_at(end),
        }
    }

    pub fn skip_whitespace(&mut self) {
        loop {
            match self.current {
                ' ' | '\t' | '\r' => self.advance(),
                '\n' if !self.config.emit_newlines => self.advance(),
                _ => return,
            }
        }
    }

    /// Skips one comment starting at the cursor, if there is one.
    pub fn skip_comment(&mut self) -> Result<bool, Error> {
        if self.current != '/' {
            return Ok(false);
        }

        match self.peek() {
            '/' => {
                while !self.at_eof() && self.current != '\n' {
                    self.advance();
                }
                // in newline mode the terminator is left for next_token
                if !self.config.emit_newlines {
                    self.advance();
                }
                Ok(true)
            }
            '*' => {
                let start = self.pos;
                self.advance_n(2);

                loop {
                    if self.at_eof() {
                        return Err(Error::new(ErrorImpl::UnterminatedComment, self.position_at(start)));
                    }

                    if self.current == '*' && self.peek() == '/' {
                        self.advance_n(2);
                        return Ok(true);
                    }

                    self.advance();
                }
            }
            _ => Ok(false),
        }
    }

    /// Alternates whitespace and comment skipping until neither makes progress.
    pub fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            self.skip_whitespace();

            if !self.skip_comment()? {
                return Ok(());
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_trivia()?;

        let start = self.pos;

        if self.at_eof() {
            return Ok(MK_TOKEN!(TokenKind::EOF, String::new(), self.span(start, start)));
        }

        // Each arm leaves the cursor on the last character of its lexeme.
        let (kind, text) = match self.current {
            '=' => self.one_or_two(TokenKind::Assignment, TokenKind::Equals),
            '>' => self.one_or_two(TokenKind::Greater, TokenKind::GreaterEquals),
            '<' => self.one_or_two(TokenKind::Less, TokenKind::LessEquals),
            '!' => {
                if self.peek() != '=' {
                    return Err(Error::new(
                        ErrorImpl::MalformedOperator { found: self.peek() },
                        self.position_at(start),
                    ));
                }
                self.advance();
                (TokenKind::NotEquals, String::from("!="))
            }
            '\n' => (TokenKind::Newline, String::from("\n")),
            '"' => (TokenKind::String, self.scan_string()?),
            c if c.is_ascii_digit() => (TokenKind::Number, self.scan_number()?),
            c if c.is_ascii_alphabetic() => self.scan_symbol(),
            c => match TokenKind::from_single(c) {
                Some(kind) => (kind, c.to_string()),
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken { token: c.to_string() },
                        self.position_at(start),
                    ))
                }
            },
        };

        self.advance();

        Ok(MK_TOKEN!(kind, text, self.span(start, self.pos)))
    }

    fn one_or_two(&mut self, single: TokenKind, double: TokenKind) -> (TokenKind, String) {
        let first = self.current;

        if self.peek() == '=' {
            self.advance();
            (double, format!("{}=", first))
        } else {
            (single, first.to_string())
        }
    }

    fn scan_string(&mut self) -> Result<String, Error> {
        let open = self.pos;
        self.advance();
        let content_start = self.pos;

        loop {
            if self.at_eof() {
                return Err(Error::new(ErrorImpl::UnterminatedString, self.position_at(open)));
            }

            if self.current == '"' {
                return Ok(self.source[content_start..self.pos].to_string());
            }

            self.advance();
        }
    }

    fn scan_number(&mut self) -> Result<String, Error> {
        let source = self.source;
        let rest = &source[self.pos..];
        let matched = NUMBER_PATTERN.find(rest).map_or("", |m| m.as_str());

        // A '.' the pattern left behind has no digit after it.
        if !matched.contains('.') && rest[matched.len()..].starts_with('.') {
            let offset = self.pos + matched.len() + 1;
            let found = source[offset..].chars().next().unwrap_or(EOF_CHAR);
            return Err(Error::new(ErrorImpl::MalformedNumber { found }, self.position_at(offset)));
        }

        let text = matched.to_string();
        self.advance_n(text.len().saturating_sub(1));
        Ok(text)
    }

    fn scan_symbol(&mut self) -> (TokenKind, String) {
        let rest = &self.source[self.pos..];
        let text = SYMBOL_PATTERN.find(rest).map_or("", |m| m.as_str()).to_string();
        self.advance_n(text.len().saturating_sub(1));

        let kind = lookup_keyword(&text).unwrap_or(TokenKind::Identifier);
        (kind, text)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, Error>;

    /// Yields the final `EOF` token or the first error, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();

        if !matches!(&result, Ok(token) if token.kind != TokenKind::EOF) {
            self.finished = true;
        }

        Some(result)
    }
}

pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    Scanner::new(source, file).collect()
}

pub fn tokenize_with_config(source: &str, file: Option<String>, config: LexerConfig) -> Result<Vec<Token>, Error> {
    Scanner::with_config(source, file, config).collect()
}
