//! 256-slot opcode table for one CPU variant.
//!
//! An `OpcodeTable` is filled by merging descriptor sources in order (base
//! first, then the variant extension). A slot can be claimed once; a second
//! claim is a `DuplicateOpcode` error, so an extension can add opcodes but
//! never override the base. `fill_defaults` consumes the builder and returns
//! a read-only `CompletedTable` with every slot populated.
use crate::descriptor::{admissible_lines, parse_record, OpcodeRecord};
use crate::error::TableError;
use tracing::{debug, instrument};

pub const TABLE_SIZE: usize = 256;
/// Opcodes per row in the emitted grids
pub const ROW_LEN: usize = 16;

#[derive(Debug, Clone)]
struct Slot {
    record: OpcodeRecord,
    /// Index into `OpcodeTable::sources`
    origin: usize,
}

/// Table under construction
#[derive(Debug)]
pub struct OpcodeTable {
    name: String,
    sources: Vec<String>,
    slots: Box<[Option<Slot>; TABLE_SIZE]>,
}

impl OpcodeTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            slots: Box::new(std::array::from_fn(|_| None)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, opcode: u8) -> Option<&OpcodeRecord> {
        self.slots[usize::from(opcode)]
            .as_ref()
            .map(|slot| &slot.record)
    }

    /// Name of the source that claimed `opcode`
    pub fn origin(&self, opcode: u8) -> Option<&str> {
        self.slots[usize::from(opcode)]
            .as_ref()
            .map(|slot| self.sources[slot.origin].as_str())
    }

    /// Number of claimed slots
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn source_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.sources.iter().position(|s| s == name) {
            return index;
        }
        self.sources.push(name.to_owned());
        self.sources.len() - 1
    }

    fn duplicate(&self, opcode: u8, second: &str) -> TableError {
        TableError::DuplicateOpcode {
            opcode,
            first: self.origin(opcode).unwrap_or(second).to_owned(),
            second: second.to_owned(),
        }
    }

    /// Claims the record's slot; fails if the slot is already taken.
    pub fn insert(&mut self, record: OpcodeRecord, source: &str) -> Result<(), TableError> {
        let opcode = record.opcode;
        if self.slots[usize::from(opcode)].is_some() {
            return Err(self.duplicate(opcode, source));
        }
        let origin = self.source_index(source);
        self.slots[usize::from(opcode)] = Some(Slot { record, origin });
        Ok(())
    }

    /// Parses every admissible line of `text` and claims a slot per record.
    ///
    /// The whole source is parsed and checked for collisions before any slot
    /// is written, so on error the table is left as it was. Returns the number
    /// of records merged.
    #[instrument(skip(self, text), fields(table = %self.name), level = "debug")]
    pub fn merge_source(&mut self, source: &str, text: &str) -> Result<usize, TableError> {
        let records = admissible_lines(text)
            .map(|(line_no, line)| {
                parse_record(line).map_err(|error| TableError::Format {
                    source_name: source.to_owned(),
                    line_no,
                    error,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut claimed = [false; TABLE_SIZE];
        for record in &records {
            let index = usize::from(record.opcode);
            if self.slots[index].is_some() || claimed[index] {
                return Err(self.duplicate(record.opcode, source));
            }
            claimed[index] = true;
        }

        let merged = records.len();
        for record in records {
            self.insert(record, source)?;
        }
        debug!(source, merged, occupied = self.occupied(), "merged descriptor source");
        Ok(merged)
    }

    /// Gives every unclaimed slot a `nop` record and freezes the table.
    pub fn fill_defaults(self) -> CompletedTable {
        let Self {
            name, mut slots, ..
        } = self;
        let mut filled = 0usize;
        let records = Box::new(std::array::from_fn(|index| {
            slots[index].take().map_or_else(
                || {
                    filled += 1;
                    OpcodeRecord::nop(index as u8)
                },
                |slot| slot.record,
            )
        }));
        debug!(table = %name, filled, "filled unclaimed opcodes with nop");
        CompletedTable { name, records }
    }
}

/// A fully populated, read-only opcode table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTable {
    name: String,
    records: Box<[OpcodeRecord; TABLE_SIZE]>,
}

impl CompletedTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, opcode: u8) -> &OpcodeRecord {
        &self.records[usize::from(opcode)]
    }

    /// Records in ascending opcode order
    pub fn records(&self) -> &[OpcodeRecord; TABLE_SIZE] {
        &self.records
    }

    /// Rows of `ROW_LEN` records, row `r` holding opcodes `r*16..r*16+15`
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[OpcodeRecord])> {
        self.records.chunks(ROW_LEN).enumerate()
    }
}

impl std::ops::Index<u8> for CompletedTable {
    type Output = OpcodeRecord;

    fn index(&self, opcode: u8) -> &OpcodeRecord {
        self.get(opcode)
    }
}
