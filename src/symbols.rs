use phf::phf_map;
use std::collections::HashMap;

/// Largest value an A-instruction can load (15 bits).
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

/// Number of instruction words the ROM can hold.
pub const ROM_SIZE: usize = 32768;

/// Predefined symbols (compile-time perfect hash map)
pub static PREDEFINED: phf::Map<&'static str, u16> = phf_map! {
    "R0" => 0, "R1" => 1, "R2" => 2, "R3" => 3,
    "R4" => 4, "R5" => 5, "R6" => 6, "R7" => 7,
    "R8" => 8, "R9" => 9, "R10" => 10, "R11" => 11,
    "R12" => 12, "R13" => 13, "R14" => 14, "R15" => 15,
    "SP" => 0, "LCL" => 1, "ARG" => 2, "THIS" => 3, "THAT" => 4,
    "SCREEN" => 16384, "KBD" => 24576,
};

/// Built-in address of a platform symbol such as `SP` or `SCREEN`.
pub fn predefined(symbol: &str) -> Option<u16> {
    PREDEFINED.get(symbol).copied()
}

/// User-defined symbols of a single assembly run: labels and variables.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::with_capacity(64),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Bind `symbol` to `address`. Callers check [`contains`](Self::contains) first.
    pub fn define(&mut self, symbol: impl Into<String>, address: u16) {
        self.symbols.insert(symbol.into(), address);
    }

    pub fn resolve(&self, symbol: &str) -> Option<u16> {
        self.symbols.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
