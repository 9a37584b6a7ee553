use std::io::Write;

use crate::error::Error;

/// Whether a table rejects repeated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unique,
    NonUnique,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    addr: u32,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn addr(&self) -> u32 {
        self.addr
    }
}

/// Insertion-ordered mapping from label name to word-aligned address.
///
/// Doubles as the relocation table, which holds one entry per deferred
/// reference and therefore runs in `NonUnique` mode.
#[derive(Debug)]
pub struct SymbolTable {
    mode: Mode,
    entries: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new(mode: Mode) -> Self {
        SymbolTable {
            mode,
            entries: Vec::new(),
        }
    }

    /// Appends `name -> addr`, copying the name into the table.
    ///
    /// The table is left untouched when the address is misaligned or, in
    /// `Unique` mode, when the name is already present.
    pub fn add(&mut self, name: &str, addr: u32) -> Result<(), Error> {
        if addr % 4 != 0 {
            return Err(Error::Misaligned(addr));
        }
        if self.mode == Mode::Unique && self.entries.iter().any(|s| s.name == name) {
            return Err(Error::Redefined(name.to_string()));
        }
        self.entries.push(Symbol {
            name: name.to_string(),
            addr,
        });
        Ok(())
    }

    /// Address of the first entry with `name`, in insertion order.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|s| s.name == name).map(|s| s.addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    /// Writes every entry as `<addr>\t<name>\n`, insertion order, nothing else.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        for sym in &self.entries {
            writeln!(out, "{}\t{}", sym.addr, sym.name)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_unique() {
        let mut tbl = SymbolTable::new(Mode::Unique);
        tbl.add("main", 0).unwrap();
        tbl.add("loop", 8).unwrap();
        tbl.add("end", 24).unwrap();
        assert_eq!(tbl.len(), 3);
        assert_eq!(tbl.get("main"), Some(0));
        assert_eq!(tbl.get("loop"), Some(8));
        assert_eq!(tbl.get("end"), Some(24));
        assert_eq!(tbl.get("missing"), None);
    }

    #[test]
    fn duplicate_rejected_in_unique_mode() {
        let mut tbl = SymbolTable::new(Mode::Unique);
        tbl.add("main", 0).unwrap();
        let err = tbl.add("main", 8).unwrap_err();
        assert!(matches!(err, Error::Redefined(_)));
        assert_eq!(tbl.len(), 1);
        assert_eq!(tbl.get("main"), Some(0));
    }

    #[test]
    fn duplicate_allowed_in_non_unique_mode() {
        let mut tbl = SymbolTable::new(Mode::NonUnique);
        tbl.add("x", 0).unwrap();
        tbl.add("x", 8).unwrap();
        assert_eq!(tbl.len(), 2);
        // first match wins
        assert_eq!(tbl.get("x"), Some(0));
    }

    #[test]
    fn misaligned_rejected_in_both_modes() {
        for mode in [Mode::Unique, Mode::NonUnique] {
            let mut tbl = SymbolTable::new(mode);
            let err = tbl.add("main", 6).unwrap_err();
            assert!(matches!(err, Error::Misaligned(6)));
            assert!(tbl.is_empty());
        }
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut tbl = SymbolTable::new(Mode::Unique);
        for i in 0..10u32 {
            tbl.add(&format!("sym{}", i), i * 4).unwrap();
        }
        assert_eq!(tbl.len(), 10);
        for i in 0..10u32 {
            assert_eq!(tbl.get(&format!("sym{}", i)), Some(i * 4));
        }
    }

    #[test]
    fn write_format_is_exact() {
        let mut tbl = SymbolTable::new(Mode::Unique);
        tbl.add("main", 0).unwrap();
        tbl.add("loop", 8).unwrap();
        let mut out = Vec::new();
        tbl.write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\tmain\n8\tloop\n");
    }

    #[test]
    fn write_empty_table_is_empty() {
        let tbl = SymbolTable::new(Mode::NonUnique);
        let mut out = Vec::new();
        tbl.write(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
