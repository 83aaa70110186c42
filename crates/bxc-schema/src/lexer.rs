//! Tokenizer for the authoring snippet.
//!
//! Produces a flat token vector with 1-based positions. Comments (`//` to end
//! of line and `/* ... */`) and whitespace are discarded.

use bxc_core::{SchemaError, SourceLocation};

/// Token kinds of the snippet grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    /// Integer literal, kept as i64 so the loader can report overflow.
    Int(i64),
    /// Float literal (has a `.`, an exponent, or an `f` suffix).
    Float(f64),
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Equals,
    PathSep,
    At,
    Eof,
}

impl TokenKind {
    /// Short description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("identifier `{name}`"),
            Self::Str(_) => "string literal".to_string(),
            Self::Int(_) | Self::Float(_) => "number".to_string(),
            Self::LBrace => "`{`".to_string(),
            Self::RBrace => "`}`".to_string(),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::LBracket => "`[`".to_string(),
            Self::RBracket => "`]`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::Semicolon => "`;`".to_string(),
            Self::Equals => "`=`".to_string(),
            Self::PathSep => "`::`".to_string(),
            Self::At => "`@`".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

/// Tokenize `source`. The returned vector always ends with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, SchemaError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn here(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
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

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn push(&mut self, kind: TokenKind, location: SourceLocation) {
        self.tokens.push(Token { kind, location });
    }

    fn run(mut self) -> Result<Vec<Token>, SchemaError> {
        while let Some(c) = self.peek() {
            let start = self.here();
            match c {
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                '/' if self.peek_second() == Some('/') => self.skip_line_comment(),
                '/' if self.peek_second() == Some('*') => self.skip_block_comment(start)?,
                '{' => self.single(TokenKind::LBrace, start),
                '}' => self.single(TokenKind::RBrace, start),
                '(' => self.single(TokenKind::LParen, start),
                ')' => self.single(TokenKind::RParen, start),
                '[' => self.single(TokenKind::LBracket, start),
                ']' => self.single(TokenKind::RBracket, start),
                ',' => self.single(TokenKind::Comma, start),
                ';' => self.single(TokenKind::Semicolon, start),
                '=' => self.single(TokenKind::Equals, start),
                '@' => self.single(TokenKind::At, start),
                ':' => {
                    self.bump();
                    if self.peek() == Some(':') {
                        self.bump();
                        self.push(TokenKind::PathSep, start);
                    } else {
                        return Err(SchemaError::parse(start, "expected `::`, found single `:`"));
                    }
                }
                '"' => self.string(start)?,
                c if c.is_ascii_digit() => self.number(start)?,
                '-' | '+' | '.' => self.number(start)?,
                c if c.is_alphabetic() || c == '_' => self.ident(start),
                other => {
                    return Err(SchemaError::parse(
                        start,
                        format!("unexpected character `{other}`"),
                    ));
                }
            }
        }
        let end = self.here();
        self.push(TokenKind::Eof, end);
        Ok(self.tokens)
    }

    fn single(&mut self, kind: TokenKind, start: SourceLocation) {
        self.bump();
        self.push(kind, start);
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self, start: SourceLocation) -> Result<(), SchemaError> {
        self.bump();
        self.bump();
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(SchemaError::parse(start, "unterminated block comment")),
            }
        }
    }

    fn ident(&mut self, start: SourceLocation) {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        self.push(TokenKind::Ident(name), start);
    }

    fn string(&mut self, start: SourceLocation) -> Result<(), SchemaError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => {
                    let escape_at = self.here();
                    match self.bump() {
                        Some('"') => text.push('"'),
                        Some('\\') => text.push('\\'),
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(other) => {
                            return Err(SchemaError::parse(
                                escape_at,
                                format!("unknown escape sequence `\\{other}`"),
                            ));
                        }
                        None => return Err(SchemaError::parse(start, "unterminated string")),
                    }
                }
                Some('\n') | None => return Err(SchemaError::parse(start, "unterminated string")),
                Some(c) => text.push(c),
            }
        }
        self.push(TokenKind::Str(text), start);
        Ok(())
    }

    fn number(&mut self, start: SourceLocation) -> Result<(), SchemaError> {
        let mut text = String::new();
        let mut is_float = false;

        if let Some(sign @ ('-' | '+')) = self.peek() {
            text.push(sign);
            self.bump();
        }
        self.digits(&mut text);
        if self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.bump();
            self.digits(&mut text);
        }
        if let Some(e @ ('e' | 'E')) = self.peek() {
            is_float = true;
            text.push(e);
            self.bump();
            if let Some(sign @ ('-' | '+')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            self.digits(&mut text);
        }
        if let Some('f' | 'F') = self.peek() {
            is_float = true;
            self.bump();
        }

        if !text.chars().any(|c| c.is_ascii_digit()) {
            return Err(SchemaError::parse(start, format!("malformed number `{text}`")));
        }
        if let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                return Err(SchemaError::parse(
                    start,
                    format!("malformed number `{text}{c}`"),
                ));
            }
        }

        let kind = if is_float {
            let value = text
                .parse::<f64>()
                .map_err(|_| SchemaError::parse(start, format!("malformed number `{text}`")))?;
            TokenKind::Float(value)
        } else {
            let value = text.parse::<i64>().map_err(|_| {
                SchemaError::parse(start, format!("integer literal `{text}` is out of range"))
            })?;
            TokenKind::Int(value)
        };
        self.push(kind, start);
        Ok(())
    }

    fn digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
    }
}
