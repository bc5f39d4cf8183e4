//! Line-oriented lexer for Hack assembly.
//!
//! Source text is split into physical lines, comments are stripped, and every
//! line with remaining content becomes one token sequence. The [`Lexer`] walks
//! those sequences lazily and keeps a cursor into the current one.

use std::fmt;
use std::iter::{Enumerate, Peekable};
use std::str::Lines;

/// Operators recognised as single-character tokens.
pub const OPERATORS: &[char] = &['=', ';', '(', ')', '@', '+', '-', '&', '|', '!'];

/// Returned by the cursor once the current line has no tokens left.
pub const END_OF_LINE: Token<'static> = Token {
    kind: TokenKind::Error,
    lexeme: "",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Symbol,
    Operator,
    Error,
}

/// A classified slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str) -> Self {
        Self { kind, lexeme }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::Error && self.lexeme.is_empty()
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == op
    }

    /// Numbers and symbols, the tokens that can stand as an operand.
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Number | TokenKind::Symbol)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            _ if self.is_end() => write!(f, "end of line"),
            TokenKind::Number => write!(f, "number '{}'", self.lexeme),
            TokenKind::Symbol => write!(f, "symbol '{}'", self.lexeme),
            TokenKind::Operator => write!(f, "operator '{}'", self.lexeme),
            TokenKind::Error => write!(f, "invalid character '{}'", self.lexeme),
        }
    }
}

fn is_symbol_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '.' | '$' | ':')
}

fn is_symbol_char(c: char) -> bool {
    is_symbol_start(c) || c.is_ascii_digit()
}

/// Length in bytes of the leading run of `s` whose chars satisfy `pred`.
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !pred(c)).unwrap_or(s.len())
}

/// Tokenize one physical line. Everything from the first `//` is ignored.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let code = line.find("//").map_or(line, |pos| &line[..pos]);
    let mut tokens = Vec::new();
    let mut rest = code;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let (kind, len) = if c.is_ascii_digit() {
            (TokenKind::Number, run_len(rest, |c| c.is_ascii_digit()))
        } else if is_symbol_start(c) {
            (TokenKind::Symbol, run_len(rest, is_symbol_char))
        } else if OPERATORS.contains(&c) {
            (TokenKind::Operator, 1)
        } else {
            (TokenKind::Error, c.len_utf8())
        };

        tokens.push(Token::new(kind, &rest[..len]));
        rest = &rest[len..];
    }

    tokens
}

/// Lazy iterator over the non-empty token lines of a source text.
///
/// Yields `(line_number, tokens)` with 1-based line numbers.
pub struct TokenLines<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> TokenLines<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for TokenLines<'a> {
    type Item = (usize, Vec<Token<'a>>);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            let tokens = tokenize_line(line);
            if !tokens.is_empty() {
                return Some((index + 1, tokens));
            }
        }
        None
    }
}

/// Cursor over the token lines of a source text.
pub struct Lexer<'a> {
    source: &'a str,
    lines: Peekable<TokenLines<'a>>,
    line: usize,
    tokens: Vec<Token<'a>>,
    pos: usize,
    current: Token<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: TokenLines::new(source).peekable(),
            line: 0,
            tokens: Vec::new(),
            pos: 0,
            current: END_OF_LINE,
        }
    }

    /// Rewind to the first line of the source.
    pub fn restart(&mut self) {
        self.lines = TokenLines::new(self.source).peekable();
        self.line = 0;
        self.tokens.clear();
        self.pos = 0;
        self.current = END_OF_LINE;
    }

    pub fn has_more_instructions(&mut self) -> bool {
        self.lines.peek().is_some()
    }

    /// Move to the next token line and prime its first token as current.
    pub fn next_instruction(&mut self) -> Option<&[Token<'a>]> {
        let (line, tokens) = self.lines.next()?;
        self.line = line;
        self.tokens = tokens;
        self.pos = 0;
        self.next_token();
        Some(&self.tokens)
    }

    pub fn has_next_token(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Consume the next token of the line, or [`END_OF_LINE`] when exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        self.current = match self.tokens.get(self.pos) {
            Some(&token) => {
                self.pos += 1;
                token
            }
            None => END_OF_LINE,
        };
        self.current
    }

    pub fn peek_token(&self) -> Token<'a> {
        self.tokens.get(self.pos).copied().unwrap_or(END_OF_LINE)
    }

    pub fn current_token(&self) -> Token<'a> {
        self.current
    }

    /// 1-based source line of the current instruction (0 before the first).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Unconsumed tokens of the current line.
    pub fn remaining(&self) -> &[Token<'a>] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(TokenKind, &str)> {
        tokenize_line(line)
            .into_iter()
            .map(|t| (t.kind, t.lexeme))
            .collect()
    }

    #[test]
    fn test_tokenize_compute() {
        assert_eq!(
            kinds("AM=M-1;JNE"),
            vec![
                (TokenKind::Symbol, "AM"),
                (TokenKind::Operator, "="),
                (TokenKind::Symbol, "M"),
                (TokenKind::Operator, "-"),
                (TokenKind::Number, "1"),
                (TokenKind::Operator, ";"),
                (TokenKind::Symbol, "JNE"),
            ]
        );
    }

    #[test]
    fn test_tokenize_symbol_chars() {
        assert_eq!(
            kinds("@sys.init$ret:0"),
            vec![
                (TokenKind::Operator, "@"),
                (TokenKind::Symbol, "sys.init$ret:0"),
            ]
        );
        assert_eq!(
            kinds("@12ab"),
            vec![
                (TokenKind::Operator, "@"),
                (TokenKind::Number, "12"),
                (TokenKind::Symbol, "ab"),
            ]
        );
    }

    #[test]
    fn test_tokenize_comments_and_errors() {
        assert!(tokenize_line("   // just a comment").is_empty());
        assert!(tokenize_line("").is_empty());
        assert_eq!(
            kinds("D=D*A // multiply?"),
            vec![
                (TokenKind::Symbol, "D"),
                (TokenKind::Operator, "="),
                (TokenKind::Symbol, "D"),
                (TokenKind::Error, "*"),
                (TokenKind::Symbol, "A"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let lines: Vec<_> = TokenLines::new("\n// header\n@1\n\n  D=A\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, 3);
        assert_eq!(lines[1].0, 5);
    }

    #[test]
    fn test_cursor() {
        let mut lexer = Lexer::new("D;JGT\n");
        assert!(lexer.has_more_instructions());
        assert_eq!(lexer.next_instruction().map(|tokens| tokens.len()), Some(3));
        assert_eq!(lexer.line(), 1);

        assert_eq!(lexer.current_token(), Token::new(TokenKind::Symbol, "D"));
        assert!(lexer.peek_token().is_operator(";"));
        assert!(lexer.next_token().is_operator(";"));
        assert_eq!(lexer.next_token().lexeme, "JGT");
        assert!(!lexer.has_next_token());
        assert!(lexer.peek_token().is_end());
        assert!(lexer.next_token().is_end());
        assert!(lexer.current_token().is_end());
        assert!(!lexer.has_more_instructions());
        assert!(lexer.next_instruction().is_none());
    }

    #[test]
    fn test_restart() {
        let mut lexer = Lexer::new("@1\n@2\n");
        while lexer.next_instruction().is_some() {}
        assert!(!lexer.has_more_instructions());

        lexer.restart();
        assert!(lexer.has_more_instructions());
        lexer.next_instruction();
        assert_eq!(lexer.peek_token().lexeme, "1");
        assert_eq!(lexer.line(), 1);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(END_OF_LINE.to_string(), "end of line");
        assert_eq!(
            Token::new(TokenKind::Error, "#").to_string(),
            "invalid character '#'"
        );
    }
}
