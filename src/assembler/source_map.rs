//! Links emitted bytes back to the statements that produced them.
//!
//! Only statements that emit bytes are recorded: instructions and `.DB`.
//! Labels, `.ORG`, `.EQU` and `.DS` have no entry.

/// Statement start addresses and source lines, searchable both ways once
/// [`finalize`](SourceMap::finalize) has sorted them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    by_address: Vec<(u16, SourceLocation)>,
    by_line: Vec<(usize, AddressRange)>,
}

/// Where a statement sits in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column of the first non-blank character (0-indexed)
    pub column: usize,

    /// Characters from `column` to the end of the statement, comment excluded
    pub length: usize,
}

/// Bytes emitted by one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: u16,
    pub len: u16,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `len` bytes starting at `address` came from `location`.
    pub fn add_mapping(&mut self, address: u16, len: u16, location: SourceLocation) {
        self.by_address.push((address, location));
        self.by_line
            .push((location.line, AddressRange { start: address, len }));
    }

    /// Statement whose first byte is at `address`. Addresses inside a
    /// statement (operand bytes) have no entry.
    pub fn get_source_location(&self, address: u16) -> Option<SourceLocation> {
        let index = self
            .by_address
            .binary_search_by_key(&address, |&(start, _)| start)
            .ok()?;
        Some(self.by_address[index].1)
    }

    /// Bytes emitted by source `line`, if it emitted any.
    pub fn get_address_range(&self, line: usize) -> Option<AddressRange> {
        let index = self
            .by_line
            .binary_search_by_key(&line, |&(l, _)| l)
            .ok()?;
        Some(self.by_line[index].1)
    }

    /// Iterates statement addresses with their locations, in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, SourceLocation)> + '_ {
        self.by_address.iter().copied()
    }

    /// Sorts both indexes; lookups are only valid afterwards.
    pub fn finalize(&mut self) {
        self.by_address.sort_by_key(|&(start, _)| start);
        self.by_line.sort_by_key(|&(line, _)| line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_map_add_lookup() {
        let mut map = SourceMap::new();

        map.add_mapping(
            0x8002,
            2,
            SourceLocation {
                line: 2,
                column: 4,
                length: 12,
            },
        );
        map.add_mapping(
            0x8000,
            2,
            SourceLocation {
                line: 1,
                column: 0,
                length: 10,
            },
        );

        map.finalize();

        let loc = map.get_source_location(0x8000).unwrap();
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 0);

        let loc2 = map.get_source_location(0x8002).unwrap();
        assert_eq!(loc2.line, 2);
        assert_eq!(loc2.column, 4);

        assert!(map.get_source_location(0x9000).is_none());

        assert_eq!(
            map.get_address_range(2),
            Some(AddressRange {
                start: 0x8002,
                len: 2
            })
        );
        assert_eq!(map.iter().map(|(a, _)| a).collect::<Vec<_>>(), vec![0x8000, 0x8002]);
    }
}
