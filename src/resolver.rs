//! Two-pass symbol resolution.
//!
//! Pass one walks every instruction to give labels the ROM address of the
//! instruction that follows them. Pass two resolves A-instruction operands,
//! allocating RAM from [`VARIABLE_BASE`] for names seen for the first time.

use log::trace;

use crate::error::{AsmError, Result};
use crate::parser::{Instruction, Target};
use crate::symbols::{MAX_ADDRESS, ROM_SIZE, SymbolTable, VARIABLE_BASE, predefined};

/// Running address counters of one assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCounters {
    /// ROM address of the next real instruction.
    pub rom: u16,
    /// RAM address of the next new variable.
    pub ram: u16,
}

impl Default for AddressCounters {
    fn default() -> Self {
        Self {
            rom: 0,
            ram: VARIABLE_BASE,
        }
    }
}

/// Pass one: count ROM words and bind labels to the next one.
pub fn assign_address(
    instruction: &Instruction<'_>,
    line: usize,
    symbols: &mut SymbolTable,
    counters: &mut AddressCounters,
) -> Result<()> {
    if instruction.is_real() {
        if usize::from(counters.rom) >= ROM_SIZE {
            return Err(AsmError::RomOverflow {
                line,
                capacity: ROM_SIZE,
            });
        }
        counters.rom += 1;
        return Ok(());
    }

    if let Instruction::Label(name) = instruction {
        if predefined(name).is_some() {
            return Err(AsmError::ReservedLabel {
                line,
                label: name.to_string(),
            });
        }
        if symbols.contains(name) {
            return Err(AsmError::DuplicateLabel {
                line,
                label: name.to_string(),
            });
        }
        if counters.rom > MAX_ADDRESS {
            return Err(AsmError::RomOverflow {
                line,
                capacity: ROM_SIZE,
            });
        }
        trace!("label {} = {}", name, counters.rom);
        symbols.define(*name, counters.rom);
    }
    Ok(())
}

/// Pass two: turn an A-instruction operand into an address.
///
/// Labels win over predefined names; anything else unknown becomes a variable.
pub fn resolve_target(
    target: &Target<'_>,
    line: usize,
    symbols: &mut SymbolTable,
    counters: &mut AddressCounters,
) -> Result<u16> {
    let name = match target {
        Target::Number(value) => return Ok(*value),
        Target::Symbol(name) => *name,
    };

    if let Some(address) = symbols.resolve(name).or_else(|| predefined(name)) {
        return Ok(address);
    }

    let address = counters.ram;
    if address > MAX_ADDRESS {
        return Err(AsmError::RamOverflow {
            line,
            symbol: name.to_string(),
        });
    }
    trace!("variable {} = {}", name, address);
    symbols.define(name, address);
    counters.ram += 1;
    Ok(address)
}

/// Symbol table and counters owned by a single assembly run.
#[derive(Debug, Default)]
pub struct Translation {
    symbols: SymbolTable,
    counters: AddressCounters,
}

impl Translation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign_address(&mut self, instruction: &Instruction<'_>, line: usize) -> Result<()> {
        assign_address(instruction, line, &mut self.symbols, &mut self.counters)
    }

    pub fn resolve_target(&mut self, target: &Target<'_>, line: usize) -> Result<u16> {
        resolve_target(target, line, &mut self.symbols, &mut self.counters)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn counters(&self) -> AddressCounters {
        self.counters
    }

    /// Number of variables allocated so far.
    pub fn variable_count(&self) -> usize {
        usize::from(self.counters.ram - VARIABLE_BASE)
    }
}
