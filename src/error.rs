//! Error types for Hack assembly.
//!
//! Every parse and encoding error carries the 1-based source line it came from.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsmError {
    #[error("line {line}: unexpected {found}, expected {expected}")]
    UnexpectedToken {
        line: usize,
        found: String,
        expected: &'static str,
    },

    #[error("line {line}: missing {expected}")]
    MissingOperand { line: usize, expected: &'static str },

    #[error("line {line}: unexpected trailing input: {text}")]
    TrailingTokens { line: usize, text: String },

    #[error("line {line}: invalid A-instruction value: {value}")]
    InvalidAValue { line: usize, value: String },

    #[error("line {line}: duplicate label: {label}")]
    DuplicateLabel { line: usize, label: String },

    #[error("line {line}: label shadows predefined symbol: {label}")]
    ReservedLabel { line: usize, label: String },

    #[error("line {line}: invalid dest field: {dest}")]
    InvalidDest { line: usize, dest: String },

    #[error("line {line}: invalid comp field: {comp}")]
    InvalidComp { line: usize, comp: String },

    #[error("line {line}: invalid jump field: {jump}")]
    InvalidJump { line: usize, jump: String },

    #[error("line {line}: program exceeds ROM capacity of {capacity} instructions")]
    RomOverflow { line: usize, capacity: usize },

    #[error("line {line}: no RAM left for variable: {symbol}")]
    RamOverflow { line: usize, symbol: String },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AsmError {
    /// Source line of the error, if it came from the program text.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::UnexpectedToken { line, .. }
            | AsmError::MissingOperand { line, .. }
            | AsmError::TrailingTokens { line, .. }
            | AsmError::InvalidAValue { line, .. }
            | AsmError::DuplicateLabel { line, .. }
            | AsmError::ReservedLabel { line, .. }
            | AsmError::InvalidDest { line, .. }
            | AsmError::InvalidComp { line, .. }
            | AsmError::InvalidJump { line, .. }
            | AsmError::RomOverflow { line, .. }
            | AsmError::RamOverflow { line, .. } => Some(*line),
            AsmError::FileRead { .. } | AsmError::FileWrite { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AsmError>;
