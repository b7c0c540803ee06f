//! Reader and writer helpers for `.strings` tables.
//!
//! A table is a sequence of `"key" = "value";` pairs. Keys may also be bare
//! words. Block (`/* */`) and line (`//`) comments are skipped.

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};

/// One `"key" = "value";` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsEntry {
    pub key: String,
    pub value: String,
    /// 1-based line of the key.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for StringsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for StringsParseError {}

pub fn parse_strings_file(path: &Path) -> Result<Vec<StringsEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read strings table: {:?}", path))?;
    parse_strings(&content).with_context(|| format!("Failed to parse strings table: {:?}", path))
}

pub fn parse_strings(content: &str) -> Result<Vec<StringsEntry>, StringsParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut scanner = Scanner::new(content);
    let mut entries = Vec::new();

    loop {
        scanner.skip_trivia()?;
        if scanner.peek().is_none() {
            return Ok(entries);
        }
        let line = scanner.line;
        let key = scanner.read_token("key")?;
        scanner.skip_trivia()?;
        scanner.expect('=')?;
        scanner.skip_trivia()?;
        let value = scanner.read_token("value")?;
        scanner.skip_trivia()?;
        scanner.expect(';')?;
        entries.push(StringsEntry { key, value, line });
    }
}

/// Quote `value` as a double-quoted literal.
///
/// `.strings` tables and Swift string literals share these escapes.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> StringsParseError {
        StringsParseError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), StringsParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of file", expected))),
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), StringsParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    match self.bump() {
                        Some('*') => self.skip_block_comment(line, column)?,
                        Some('/') => {
                            while self.peek().is_some_and(|c| c != '\n') {
                                self.bump();
                            }
                        }
                        _ => {
                            return Err(StringsParseError {
                                line,
                                column,
                                message: "unexpected '/'".to_string(),
                            });
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<(), StringsParseError> {
        let mut previous = None;
        while let Some(c) = self.bump() {
            if previous == Some('*') && c == '/' {
                return Ok(());
            }
            previous = Some(c);
        }
        Err(StringsParseError {
            line,
            column,
            message: "unterminated comment".to_string(),
        })
    }

    fn read_token(&mut self, what: &str) -> Result<String, StringsParseError> {
        match self.peek() {
            Some('"') => self.read_quoted(),
            Some(c) if is_bare_char(c) => {
                let mut token = String::new();
                while let Some(c) = self.peek().filter(|c| is_bare_char(*c)) {
                    token.push(c);
                    self.bump();
                }
                Ok(token)
            }
            Some(c) => Err(self.error(format!("expected {}, found '{}'", what, c))),
            None => Err(self.error(format!("expected {}, found end of file", what))),
        }
    }

    fn read_quoted(&mut self) -> Result<String, StringsParseError> {
        let (line, column) = (self.line, self.column);
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => value.push(self.read_escape()?),
                Some(c) => value.push(c),
                None => {
                    return Err(StringsParseError {
                        line,
                        column,
                        message: "unterminated string".to_string(),
                    });
                }
            }
        }
    }

    fn read_escape(&mut self) -> Result<char, StringsParseError> {
        match self.bump() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('\'') => Ok('\''),
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('U') | Some('u') => {
                let mut digits = String::with_capacity(4);
                for _ in 0..4 {
                    match self.bump() {
                        Some(c) if c.is_ascii_hexdigit() => digits.push(c),
                        _ => return Err(self.error("expected four hex digits in unicode escape")),
                    }
                }
                u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error(format!("invalid unicode escape \\U{}", digits)))
            }
            Some(c) => Err(self.error(format!("unknown escape '\\{}'", c))),
            None => Err(self.error("unterminated escape")),
        }
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '$' | ':' | '/')
}
