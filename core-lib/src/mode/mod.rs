//! Addressing modes understood by the descriptor grammar.
//!
//! `AddressingMode` is the single vocabulary shared by the parser and the
//! disassembly template registry: a mode token either maps to a variant or
//! the descriptor line is rejected, and every variant has exactly one
//! registry entry (checked at compile time in `registry.rs`).
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod registry;
pub use registry::{AddressingModeFormat, FormatRegistry, OperandSize, STANDARD_FORMATS};

/// Operand fetch strategy of a 65xx instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressingMode {
    Implied,
    Immediate8,
    /// Immediate, width follows the accumulator size (M flag)
    ImmediateM,
    /// Immediate, width follows the index register size (X flag)
    ImmediateX,
    Immediate16,
    ZeroPage,
    Relative,
    /// Zero page test byte plus branch target (`bbr`/`bbs`)
    ZeroPageRelative,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    AbsoluteLong,
    AbsoluteLongX,
    AbsoluteIndirectLong,
    AbsoluteIndexedIndirect,
    IndirectY,
    IndirectLongY,
    IndexedIndirectX,
    Indirect,
    IndirectZeroPage,
    IndirectLongZeroPage,
    Accumulator,
    StackRelative,
    StackRelativeIndirectY,
    /// Source and destination banks (`mvn`/`mvp`); keep last
    BlockMove,
}

impl AddressingMode {
    pub const COUNT: usize = 27;

    /// Every mode, in discriminant order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Implied,
        Self::Immediate8,
        Self::ImmediateM,
        Self::ImmediateX,
        Self::Immediate16,
        Self::ZeroPage,
        Self::Relative,
        Self::ZeroPageRelative,
        Self::ZeroPageX,
        Self::ZeroPageY,
        Self::Absolute,
        Self::AbsoluteX,
        Self::AbsoluteY,
        Self::AbsoluteLong,
        Self::AbsoluteLongX,
        Self::AbsoluteIndirectLong,
        Self::AbsoluteIndexedIndirect,
        Self::IndirectY,
        Self::IndirectLongY,
        Self::IndexedIndirectX,
        Self::Indirect,
        Self::IndirectZeroPage,
        Self::IndirectLongZeroPage,
        Self::Accumulator,
        Self::StackRelative,
        Self::StackRelativeIndirectY,
        Self::BlockMove,
    ];

    /// Descriptor token, also the name of the emulator's addressing routine
    pub const fn token(self) -> &'static str {
        match self {
            Self::Implied => "imp",
            Self::Immediate8 => "imm8",
            Self::ImmediateM => "immm",
            Self::ImmediateX => "immx",
            Self::Immediate16 => "imm16",
            Self::ZeroPage => "zp",
            Self::Relative => "rel",
            Self::ZeroPageRelative => "zprel",
            Self::ZeroPageX => "zpx",
            Self::ZeroPageY => "zpy",
            Self::Absolute => "abso",
            Self::AbsoluteX => "absx",
            Self::AbsoluteY => "absy",
            Self::AbsoluteLong => "absl",
            Self::AbsoluteLongX => "abslx",
            Self::AbsoluteIndirectLong => "aindl",
            Self::AbsoluteIndexedIndirect => "ainx",
            Self::IndirectY => "indy",
            Self::IndirectLongY => "indly",
            Self::IndexedIndirectX => "indx",
            Self::Indirect => "ind",
            Self::IndirectZeroPage => "ind0",
            Self::IndirectLongZeroPage => "indl0",
            Self::Accumulator => "acc",
            Self::StackRelative => "sr",
            Self::StackRelativeIndirectY => "sridy",
            Self::BlockMove => "bmv",
        }
    }
}

// `BlockMove` closes the enum: `COUNT` must cover its discriminant, and
// `ALL` must list every mode at its own discriminant.
const _: () = {
    assert!(AddressingMode::BlockMove as usize + 1 == AddressingMode::COUNT);
    let mut i = 0;
    while i < AddressingMode::COUNT {
        assert!(AddressingMode::ALL[i] as usize == i);
        i += 1;
    }
};

static BY_TOKEN: Lazy<HashMap<&'static str, AddressingMode>> = Lazy::new(|| {
    AddressingMode::ALL
        .iter()
        .map(|&mode| (mode.token(), mode))
        .collect()
});

/// Error returned when a token names no addressing mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl FromStr for AddressingMode {
    type Err = UnknownMode;

    /// Tokens are case-sensitive
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        BY_TOKEN
            .get(token)
            .copied()
            .ok_or_else(|| UnknownMode(token.to_owned()))
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
