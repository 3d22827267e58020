//! Lexer for the Prolog-like surface syntax.

use thiserror::Error;

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation and control
    Comma,     // ,
    Semicolon, // ;
    Implies,   // :-
    Query,     // ?-
    Bang,      // !
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Pipe,      // |
    Dot,       // .

    // Comparison and unification
    Is,             // is
    Less,           // <
    Greater,        // >
    LessOrEqual,    // =<
    GreaterOrEqual, // >=
    ValueEqual,     // =:=
    StructEqual,    // ==
    Unify,          // =

    // Arithmetic and boolean
    Plus,   // +
    Minus,  // -
    Times,  // *
    Divide, // /
    Power,  // ^
    And,    // /\
    Or,     // \/

    // Atoms and literals
    Constant,
    Variable,
    Anonymous,
    Number,
    Str,

    Eof,
}

/// Fixed-spelling tokens, longest spellings first so `=:=` wins over `=`.
const SYMBOLS: [(&str, TokenKind); 25] = [
    ("=:=", TokenKind::ValueEqual),
    (":-", TokenKind::Implies),
    ("?-", TokenKind::Query),
    ("=<", TokenKind::LessOrEqual),
    (">=", TokenKind::GreaterOrEqual),
    ("==", TokenKind::StructEqual),
    ("/\\", TokenKind::And),
    ("\\/", TokenKind::Or),
    ("=", TokenKind::Unify),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Times),
    ("/", TokenKind::Divide),
    ("^", TokenKind::Power),
    ("!", TokenKind::Bang),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
    ("|", TokenKind::Pipe),
    (".", TokenKind::Dot),
];

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// How the token is named in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Str => format!("\"{}\"", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Lexer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexical Error: {message} at line {line} column {column}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the next token. Returns an `Eof` token once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let (line, column) = (self.line, self.column);
        let remaining = &self.input[self.position..];
        let Some(ch) = remaining.chars().next() else {
            return Ok(Token::new(TokenKind::Eof, "", line, column));
        };

        for (spelling, kind) in SYMBOLS {
            if remaining.starts_with(spelling) {
                self.advance(spelling.len());
                return Ok(Token::new(kind, spelling, line, column));
            }
        }

        if ch.is_ascii_digit() {
            return Ok(self.lex_number());
        }
        if ch.is_ascii_lowercase() {
            let name = self.lex_word();
            let kind = if name == "is" {
                TokenKind::Is
            } else {
                TokenKind::Constant
            };
            return Ok(Token::new(kind, name, line, column));
        }
        if ch.is_ascii_uppercase() {
            let name = self.lex_word();
            return Ok(Token::new(TokenKind::Variable, name, line, column));
        }
        if ch == '_' {
            let name = self.lex_word();
            return Ok(Token::new(TokenKind::Anonymous, name, line, column));
        }
        if ch == '"' {
            return self.lex_string();
        }

        Err(LexError {
            message: format!("unexpected character '{}'", ch),
            line,
            column,
        })
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.input[self.position..self.position + bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += bytes;
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else if ch == '%' {
                // Skip to end of line
                while let Some(c) = self.peek_char() {
                    self.advance(c.len_utf8());
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn lex_word(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance(1);
            } else {
                break;
            }
        }
        self.input[start..self.position].to_string()
    }

    fn lex_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        self.skip_digits();

        // A fraction needs a digit after the dot; otherwise the dot ends the clause.
        let rest = &self.input[self.position..];
        let mut chars = rest.chars();
        if chars.next() == Some('.') && chars.next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
            self.skip_digits();
        }

        Token::new(
            TokenKind::Number,
            &self.input[start..self.position],
            line,
            column,
        )
    }

    fn skip_digits(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let (line, column) = (self.line, self.column);
        // Skip opening quote
        self.advance(1);
        let start = self.position;

        while let Some(ch) = self.peek_char() {
            if ch == '"' {
                let content = self.input[start..self.position].to_string();
                self.advance(1); // Skip closing quote
                return Ok(Token::new(TokenKind::Str, content, line, column));
            } else if ch == '\n' {
                break;
            } else {
                self.advance(ch.len_utf8());
            }
        }

        Err(LexError {
            message: "unterminated string literal".to_string(),
            line,
            column,
        })
    }
}

/// Split source text into tokens. The last token is always `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
