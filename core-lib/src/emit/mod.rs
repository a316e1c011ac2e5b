//! Text emitters for completed opcode tables.
//!
//! Both formats are C initializers indexed directly by opcode: `grid`
//! renders one field of every record as a 16x16 block, `mnemonic` renders
//! the disassembly strings as a quoted list.
use crate::descriptor::OpcodeRecord;
use crate::table::{ROW_LEN, TABLE_SIZE};
use std::borrow::Cow;

pub mod grid;
pub mod mnemonic;

pub use grid::render_grid;
pub use mnemonic::{render_mnemonic, render_mnemonics};

/// Index of the final row in both formats
pub(crate) const LAST_ROW: usize = TABLE_SIZE / ROW_LEN - 1;

/// Which record field a grid renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Addressing-mode token (selects the emulator's operand routine)
    AddressingMode,
    /// Action name (selects the emulator's operation routine)
    Action,
    /// Base cycle count
    Cycles,
}

impl Projection {
    /// Emission order within the tables artifact
    pub const ALL: [Self; 3] = [Self::AddressingMode, Self::Action, Self::Cycles];

    pub fn value(self, record: &OpcodeRecord) -> Cow<'_, str> {
        match self {
            Self::AddressingMode => Cow::Borrowed(record.mode.token()),
            Self::Action => Cow::Borrowed(record.action.as_str()),
            Self::Cycles => Cow::Owned(record.cycles.to_string()),
        }
    }
}
