//! Symbol table management for labels and constants

use crate::assembler::Symbol;

/// Symbol table for managing label definitions
///
/// Symbols are kept in definition order, which is also the order reported
/// in [`AssemblerOutput::symbols`](crate::AssemblerOutput::symbols).
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol to the table
    ///
    /// Returns Ok(()) on success, Err with the existing symbol if the name is
    /// already defined.
    pub fn add_symbol(&mut self, symbol: Symbol) -> Result<(), Symbol> {
        if let Some(existing) = self.lookup_symbol(&symbol.name) {
            return Err(existing.clone());
        }

        self.symbols.push(symbol);
        Ok(())
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Get all symbols
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str, value: u16, defined_at: usize) -> Symbol {
        Symbol {
            name: name.to_string(),
            value,
            zero_page: value <= 0xFF,
            defined_at,
        }
    }

    #[test]
    fn test_symbol_table_add_lookup() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol(label("START", 0x8000, 1)).is_ok());
        assert!(table.add_symbol(label("LOOP", 0x8010, 5)).is_ok());

        let start = table.lookup_symbol("START").unwrap();
        assert_eq!(start.name, "START");
        assert_eq!(start.value, 0x8000);

        let loop_sym = table.lookup_symbol("LOOP").unwrap();
        assert_eq!(loop_sym.value, 0x8010);

        assert!(table.lookup_symbol("UNDEFINED").is_none());
    }

    #[test]
    fn test_symbol_table_duplicate() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol(label("START", 0x8000, 1)).is_ok());
        let result = table.add_symbol(label("START", 0x9000, 10));
        assert_eq!(result.unwrap_err().defined_at, 1);

        // Original symbol should still be there
        let start = table.lookup_symbol("START").unwrap();
        assert_eq!(start.value, 0x8000);
    }
}
