use phf::phf_map;

use crate::error::{AsmError, Result};

/// comp field (7 bits: a + 6 c-bits)
/// The 'a' bit selects M (a=1) instead of A (a=0) as the ALU's second input.
pub static COMP_CODES: phf::Map<&'static str, u8> = phf_map! {
    // Constants (a=0)
    "0" => 0b0101010, "1" => 0b0111111, "-1" => 0b0111010,

    // Single register (a=0)
    "D" => 0b0001100, "A" => 0b0110000,
    "!D" => 0b0001101, "!A" => 0b0110001,
    "-D" => 0b0001111, "-A" => 0b0110011,
    "D+1" => 0b0011111, "A+1" => 0b0110111,
    "D-1" => 0b0001110, "A-1" => 0b0110010,

    // ALU with A (a=0)
    "D+A" => 0b0000010, "D-A" => 0b0010011, "A-D" => 0b0000111,
    "D&A" => 0b0000000, "D|A" => 0b0010101,

    // M register (a=1)
    "M" => 0b1110000, "!M" => 0b1110001, "-M" => 0b1110011,
    "M+1" => 0b1110111, "M-1" => 0b1110010,

    // ALU with M (a=1)
    "D+M" => 0b1000010, "D-M" => 0b1010011, "M-D" => 0b1000111,
    "D&M" => 0b1000000, "D|M" => 0b1010101,
};

/// dest mnemonics, indexed by their 3-bit code (A D M).
pub const DEST_MNEMONICS: [&str; 8] = ["", "M", "D", "MD", "A", "AM", "AD", "AMD"];

/// jump mnemonics, indexed by their 3-bit code.
pub const JUMP_MNEMONICS: [&str; 8] = ["", "JGT", "JEQ", "JGE", "JLT", "JNE", "JLE", "JMP"];

pub fn comp_bits(comp: &str) -> Option<u8> {
    COMP_CODES.get(comp).copied()
}

pub fn dest_bits(dest: &str) -> Option<u8> {
    index_of(&DEST_MNEMONICS, dest)
}

pub fn jump_bits(jump: &str) -> Option<u8> {
    index_of(&JUMP_MNEMONICS, jump)
}

fn index_of(table: &[&str; 8], mnemonic: &str) -> Option<u8> {
    table
        .iter()
        .position(|&m| m == mnemonic)
        .and_then(|i| u8::try_from(i).ok())
}

/// Instruction with its operand resolved, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedInstruction<'i> {
    Address(u16),
    Compute {
        dest: &'i str,
        comp: &'i str,
        jump: &'i str,
    },
}

/// Extension point for different output formats.
/// Writes into a caller-owned buffer.
pub trait Backend {
    fn encode_a(&self, value: u16, buf: &mut String);
    fn encode_c(&self, dest: u8, comp: u8, jump: u8, buf: &mut String);
}

/// Hack text format: one 16-character line of `0`/`1` per instruction.
pub struct HackBinary;

fn push_bits(word: u16, buf: &mut String) {
    for i in (0..16).rev() {
        buf.push(if word & (1 << i) != 0 { '1' } else { '0' });
    }
}

impl Backend for HackBinary {
    fn encode_a(&self, value: u16, buf: &mut String) {
        push_bits(value & 0x7FFF, buf);
    }

    fn encode_c(&self, dest: u8, comp: u8, jump: u8, buf: &mut String) {
        let word = 0b1110_0000_0000_0000
            | (u16::from(comp) << 6)
            | (u16::from(dest) << 3)
            | u16::from(jump);
        push_bits(word, buf);
    }
}

/// Code generator (generic over backend)
pub struct CodeGen<B: Backend> {
    backend: B,
}

impl<B: Backend> CodeGen<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Encode one instruction into `buf`; `line` is used for error reporting.
    pub fn encode(
        &self,
        inst: &ResolvedInstruction<'_>,
        line: usize,
        buf: &mut String,
    ) -> Result<()> {
        match *inst {
            ResolvedInstruction::Address(value) => self.backend.encode_a(value, buf),
            ResolvedInstruction::Compute { dest, comp, jump } => {
                let dest_code = dest_bits(dest).ok_or_else(|| AsmError::InvalidDest {
                    line,
                    dest: dest.to_string(),
                })?;
                let comp_code = comp_bits(comp).ok_or_else(|| AsmError::InvalidComp {
                    line,
                    comp: comp.to_string(),
                })?;
                let jump_code = jump_bits(jump).ok_or_else(|| AsmError::InvalidJump {
                    line,
                    jump: jump.to_string(),
                })?;
                self.backend.encode_c(dest_code, comp_code, jump_code, buf);
            }
        }
        Ok(())
    }
}

pub type HackCodeGen = CodeGen<HackBinary>;

impl HackCodeGen {
    pub fn hack() -> Self {
        Self::new(HackBinary)
    }
}
