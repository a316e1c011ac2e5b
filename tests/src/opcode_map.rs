#![allow(clippy::unwrap_used)]
use super::{generated_map, init_tracing, reference_map, run_check};
use optable_core::CpuVariant;
use pretty_assertions::assert_eq;

macro_rules! testcases {
    ( $( $name:ident($opcode:expr); )* ) => {
        $(
            #[test]
            fn $name() {
                init_tracing();
                if let Err(e) = run_check($opcode) {
                    panic!("Check failed: ${:02X}\n{:#}", $opcode, e);
                }
            }
        )*
    };
}

// Implied and accumulator forms
testcases! {
    brk_implied(0x00);
    asl_accumulator(0x0A);
    xce_implied(0xFB);
}

// Width-dependent immediates
testcases! {
    ora_immediate_m(0x09);
    ldy_immediate_x(0xA0);
    rep_immediate8(0xC2);
    pea_immediate16(0xF4);
}

// 65C816-only addressing
testcases! {
    ora_stack_relative(0x03);
    ora_indirect_long_y(0x17);
    jml_absolute_long(0x5C);
    jml_indirect_long(0xDC);
    mvp_block_move(0x44);
    jsr_indexed_indirect(0xFC);
    sbc_absolute_long_x(0xFF);
}

// Extension replaces what the base leaves empty; nothing else moves
testcases! {
    bit_absolute(0x2C);
    stz_absolute(0x9C);
    lda_absolute(0xAD);
}

#[test]
fn reference_map_is_complete() {
    let reference = reference_map().unwrap();
    assert_eq!(reference.len(), 256);
    assert_eq!(reference[0x00], "brk ");
    assert_eq!(reference[0xFF], "sbc $%06x,x");
}

#[test]
fn whole_65c816_map_matches() {
    init_tracing();
    let reference = reference_map().unwrap();
    let generated = generated_map(CpuVariant::Wdc65C816).unwrap();
    assert_eq!(generated, reference);
}

#[test]
fn variants_share_base_opcodes() {
    let c02 = generated_map(CpuVariant::Wdc65C02).unwrap();
    let c816 = generated_map(CpuVariant::Wdc65C816).unwrap();
    for opcode in [0x00usize, 0x20, 0x2C, 0x4C, 0x60, 0xA9, 0xAD, 0xEA] {
        assert_eq!(c02[opcode], c816[opcode], "opcode ${opcode:02X}");
    }
}
