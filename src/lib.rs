//! Hack Assembler - translates Hack assembly into Hack machine code.
//!
//! Translation runs in two passes over a restartable instruction stream:
//! the first binds every label to a ROM address, the second resolves
//! operands (allocating variables on first use) and encodes each real
//! instruction as a 16-character binary line.
//!
//! # Usage
//!
//! ```
//! use hack_assembler::assemble;
//!
//! let hack = assemble("@2\nD=A\n").unwrap();
//! assert_eq!(hack, "0000000000000010\n1110110000010000\n");
//! ```

pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod symbols;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use codegen::{HackCodeGen, ResolvedInstruction};
pub use error::{AsmError, Result};
use parser::{Instruction, Parser};
use resolver::Translation;

/// Assemble Hack assembly source to binary text, one newline-terminated line
/// per real instruction.
pub fn assemble(source: &str) -> Result<String> {
    let mut parser = Parser::new(source);
    let mut ctx = Translation::new();

    // Pass 1: bind labels to ROM addresses
    for parsed in parser.by_ref() {
        let parsed = parsed?;
        ctx.assign_address(&parsed.instruction, parsed.line)?;
    }
    let instructions = usize::from(ctx.counters().rom);
    debug!(
        "pass 1: {} instructions, {} labels",
        instructions,
        ctx.symbols().len()
    );

    // Pass 2: resolve operands and encode
    parser.restart();
    let codegen = HackCodeGen::hack();
    let mut output = String::with_capacity(instructions * 17);

    for parsed in parser.by_ref() {
        let parsed = parsed?;
        let resolved = match &parsed.instruction {
            Instruction::Label(_) => continue,
            Instruction::Address(target) => {
                ResolvedInstruction::Address(ctx.resolve_target(target, parsed.line)?)
            }
            Instruction::Compute { dest, comp, jump } => ResolvedInstruction::Compute {
                dest,
                comp,
                jump,
            },
        };

        codegen.encode(&resolved, parsed.line, &mut output)?;
        output.push('\n');
    }
    debug!("pass 2: {} variables allocated", ctx.variable_count());

    Ok(output)
}

/// Output path for an assembly file: a trailing `.asm` becomes `.hack`,
/// anything else gets `.hack` appended.
pub fn output_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "asm") {
        return input.with_extension("hack");
    }
    let mut name = input.as_os_str().to_os_string();
    name.push(".hack");
    PathBuf::from(name)
}

/// Assemble a file and write the result next to it.
///
/// Nothing is written unless assembly succeeds. Returns the output path.
pub fn assemble_file(input: &Path) -> Result<PathBuf> {
    let source = fs::read_to_string(input).map_err(|e| AsmError::FileRead {
        path: input.display().to_string(),
        source: e,
    })?;

    let hack = assemble(&source)?;

    let output = output_path(input);
    fs::write(&output, hack).map_err(|e| AsmError::FileWrite {
        path: output.display().to_string(),
        source: e,
    })?;

    Ok(output)
}
