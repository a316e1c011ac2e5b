//! Disassembly templates, one per addressing mode.
//!
//! Templates are printf formats handed verbatim to the C disassembler,
//! which substitutes the operand bytes at run time. The width-dependent
//! immediates expand to a second-stage format (`%%0%hhux`) whose digit
//! count is filled in from the current register width.
use super::AddressingMode;
use crate::error::TableError;

/// How many operand bytes follow the opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSize {
    Bytes(u8),
    /// One or two bytes depending on the M flag
    AccumulatorWidth,
    /// One or two bytes depending on the X flag
    IndexWidth,
}

impl std::fmt::Display for OperandSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(n) => write!(f, "{n}"),
            Self::AccumulatorWidth => f.write_str("m"),
            Self::IndexWidth => f.write_str("x"),
        }
    }
}

/// Registry entry mapping a mode to its display template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingModeFormat {
    pub mode: AddressingMode,
    pub template: &'static str,
    pub operand: OperandSize,
}

const fn entry(
    mode: AddressingMode,
    template: &'static str,
    operand: OperandSize,
) -> AddressingModeFormat {
    AddressingModeFormat {
        mode,
        template,
        operand,
    }
}

use AddressingMode as M;
use OperandSize::{AccumulatorWidth, Bytes, IndexWidth};

/// Indexed by `AddressingMode` discriminant
pub const STANDARD_FORMATS: [AddressingModeFormat; AddressingMode::COUNT] = [
    entry(M::Implied, "", Bytes(0)),
    entry(M::Immediate8, "#$%02x", Bytes(1)),
    entry(M::ImmediateM, "#$%%0%hhux", AccumulatorWidth),
    entry(M::ImmediateX, "#$%%0%hhux", IndexWidth),
    entry(M::Immediate16, "#$%04x", Bytes(2)),
    entry(M::ZeroPage, "$%02x", Bytes(1)),
    entry(M::Relative, "$%02x", Bytes(1)),
    entry(M::ZeroPageRelative, "$%02x, $%04x", Bytes(2)),
    entry(M::ZeroPageX, "$%02x,x", Bytes(1)),
    entry(M::ZeroPageY, "$%02x,y", Bytes(1)),
    entry(M::Absolute, "$%04x", Bytes(2)),
    entry(M::AbsoluteX, "$%04x,x", Bytes(2)),
    entry(M::AbsoluteY, "$%04x,y", Bytes(2)),
    entry(M::AbsoluteLong, "$%06x", Bytes(3)),
    entry(M::AbsoluteLongX, "$%06x,x", Bytes(3)),
    entry(M::AbsoluteIndirectLong, "[$%06x]", Bytes(3)),
    entry(M::AbsoluteIndexedIndirect, "($%04x,x)", Bytes(2)),
    entry(M::IndirectY, "($%02x),y", Bytes(1)),
    entry(M::IndirectLongY, "[$%02x],y", Bytes(1)),
    entry(M::IndexedIndirectX, "($%02x,x)", Bytes(1)),
    entry(M::Indirect, "($%04x)", Bytes(2)),
    entry(M::IndirectZeroPage, "($%02x)", Bytes(1)),
    entry(M::IndirectLongZeroPage, "[$%02x]", Bytes(1)),
    entry(M::Accumulator, "a", Bytes(0)),
    entry(M::StackRelative, "$%02x,S", Bytes(1)),
    entry(M::StackRelativeIndirectY, "($%02x,S),y", Bytes(1)),
    entry(M::BlockMove, "$%02x,$%02x", Bytes(2)),
];

// Entry i must describe mode i; a reordered or missing entry fails the build.
const _: () = {
    let mut i = 0;
    while i < STANDARD_FORMATS.len() {
        assert!(STANDARD_FORMATS[i].mode as usize == i);
        i += 1;
    }
};

/// Lookup from addressing mode to disassembly template
#[derive(Debug, Clone, Copy)]
pub struct FormatRegistry {
    entries: &'static [AddressingModeFormat],
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormatRegistry {
    /// The complete 27-entry registry
    pub const fn standard() -> Self {
        Self {
            entries: &STANDARD_FORMATS,
        }
    }

    /// A registry over an arbitrary entry list, indexed by mode discriminant
    pub const fn new(entries: &'static [AddressingModeFormat]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [AddressingModeFormat] {
        self.entries
    }

    pub fn lookup(&self, mode: AddressingMode) -> Option<&'static AddressingModeFormat> {
        self.entries
            .get(mode as usize)
            .filter(|format| format.mode == mode)
    }

    /// Like `lookup`, but a missing entry is a fatal configuration error
    pub fn resolve(
        &self,
        mode: AddressingMode,
        opcode: u8,
    ) -> Result<&'static AddressingModeFormat, TableError> {
        self.lookup(mode)
            .ok_or(TableError::Configuration { mode, opcode })
    }
}
