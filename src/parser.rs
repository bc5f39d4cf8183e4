//! Instruction parser for Hack assembly.
//!
//! Each token line from the [`Lexer`] is classified by its first token and
//! split into fields with at most two tokens of lookahead. Malformed lines
//! are rejected rather than guessed at.

use crate::error::{AsmError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::symbols::MAX_ADDRESS;

/// Operand of an A-instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<'a> {
    Number(u16),
    Symbol(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction<'a> {
    /// `@value` or `@symbol`
    Address(Target<'a>),
    /// `(NAME)`, zero width
    Label(&'a str),
    /// `dest=comp;jump`, with empty `dest`/`jump` when absent
    Compute {
        dest: &'a str,
        comp: String,
        jump: &'a str,
    },
}

impl Instruction<'_> {
    /// Whether the instruction occupies a ROM word.
    pub fn is_real(&self) -> bool {
        !matches!(self, Instruction::Label(_))
    }
}

/// A parsed instruction with the source line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInstruction<'a> {
    pub line: usize,
    pub instruction: Instruction<'a>,
}

/// Restartable stream of instructions over one source text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Rewind to the first instruction.
    pub fn restart(&mut self) {
        self.lexer.restart();
    }

    pub fn has_more_instructions(&mut self) -> bool {
        self.lexer.has_more_instructions()
    }

    /// Parse the next instruction, or `None` at end of input.
    pub fn advance(&mut self) -> Result<Option<SourceInstruction<'a>>> {
        if self.lexer.next_instruction().is_none() {
            return Ok(None);
        }

        let line = self.lexer.line();
        let first = self.lexer.current_token();

        let instruction = if first.is_operator("@") {
            self.address()?
        } else if first.is_operator("(") {
            self.label()?
        } else {
            self.compute(first)?
        };

        self.expect_end()?;
        Ok(Some(SourceInstruction { line, instruction }))
    }

    fn address(&mut self) -> Result<Instruction<'a>> {
        let token = self.lexer.next_token();
        let target = match token.kind {
            TokenKind::Number => Target::Number(self.number(token)?),
            TokenKind::Symbol => Target::Symbol(token.lexeme),
            _ => return Err(self.unexpected(token, "address after '@'")),
        };
        Ok(Instruction::Address(target))
    }

    fn number(&self, token: Token<'a>) -> Result<u16> {
        token
            .lexeme
            .parse::<u16>()
            .ok()
            .filter(|&value| value <= MAX_ADDRESS)
            .ok_or_else(|| AsmError::InvalidAValue {
                line: self.lexer.line(),
                value: token.lexeme.to_string(),
            })
    }

    fn label(&mut self) -> Result<Instruction<'a>> {
        let name = self.lexer.next_token();
        if name.kind != TokenKind::Symbol {
            return Err(self.unexpected(name, "label name"));
        }

        let close = self.lexer.next_token();
        if !close.is_operator(")") {
            return Err(self.unexpected(close, "')'"));
        }

        Ok(Instruction::Label(name.lexeme))
    }

    fn compute(&mut self, first: Token<'a>) -> Result<Instruction<'a>> {
        let (dest, start) = if self.lexer.peek_token().is_operator("=") {
            self.lexer.next_token();
            (first.lexeme, self.lexer.next_token())
        } else {
            ("", first)
        };

        let comp = self.comp(start)?;

        let jump = if self.lexer.peek_token().is_operator(";") {
            self.lexer.next_token();
            let token = self.lexer.next_token();
            if token.kind != TokenKind::Symbol {
                return Err(self.unexpected(token, "jump mnemonic"));
            }
            token.lexeme
        } else {
            ""
        };

        Ok(Instruction::Compute { dest, comp, jump })
    }

    /// `-X`, `!X`, `X`, or `X op Y`, concatenated without whitespace.
    fn comp(&mut self, start: Token<'a>) -> Result<String> {
        if start.is_operator("-") || start.is_operator("!") {
            let operand = self.operand("operand after unary operator")?;
            return Ok(format!("{}{}", start.lexeme, operand.lexeme));
        }

        if !start.is_operand() {
            return Err(self.unexpected(start, "computation"));
        }

        let mut comp = start.lexeme.to_string();
        let op = self.lexer.peek_token();
        if op.kind == TokenKind::Operator && !op.is_operator(";") {
            self.lexer.next_token();
            let rhs = self.operand("operand after binary operator")?;
            comp.push_str(op.lexeme);
            comp.push_str(rhs.lexeme);
        }

        Ok(comp)
    }

    fn operand(&mut self, expected: &'static str) -> Result<Token<'a>> {
        let token = self.lexer.next_token();
        if token.is_operand() {
            Ok(token)
        } else {
            Err(self.unexpected(token, expected))
        }
    }

    fn expect_end(&self) -> Result<()> {
        let rest = self.lexer.remaining();
        if rest.is_empty() {
            return Ok(());
        }
        if let Some(&bad) = rest.iter().find(|t| t.kind == TokenKind::Error) {
            return Err(self.unexpected(bad, "end of line"));
        }
        Err(AsmError::TrailingTokens {
            line: self.lexer.line(),
            text: rest.iter().map(|t| t.lexeme).collect(),
        })
    }

    fn unexpected(&self, token: Token<'a>, expected: &'static str) -> AsmError {
        let line = self.lexer.line();
        if token.is_end() {
            AsmError::MissingOperand { line, expected }
        } else {
            AsmError::UnexpectedToken {
                line,
                found: token.to_string(),
                expected,
            }
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<SourceInstruction<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}

/// Parse a single line of assembly, returning `None` for blank or comment lines.
pub fn parse_line(line: &str) -> Result<Option<Instruction<'_>>> {
    Ok(Parser::new(line).advance()?.map(|parsed| parsed.instruction))
}
