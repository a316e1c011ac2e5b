/// Integration tests for the optablegen CLI
///
/// Drives the binary against descriptor directories on disk and checks the
/// written artifacts and exit codes.
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const BASE: &str = "\
; minimal base set
brk     imp     7   $00
lda     imm8    2   $a9
";

fn write_descriptors(dir: &Path, extension_c02: &str) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(dir.join("6502.opcodes"), BASE)?;
    fs::write(dir.join("65c02.opcodes"), extension_c02)?;
    fs::write(dir.join("65c816.opcodes"), "cop     imm8    7   $02\n")?;
    Ok(())
}

#[test]
fn generate_from_descriptor_directory() -> Result<(), Box<dyn std::error::Error>> {
    let descriptors = tempfile::tempdir()?;
    write_descriptors(descriptors.path(), "bra     rel     3   $80\n")?;
    let out = tempfile::tempdir()?;

    let mut cmd = Command::cargo_bin("optablegen")?;
    cmd.arg("generate")
        .arg("--descriptors")
        .arg(descriptors.path())
        .arg("--out-dir")
        .arg(out.path());
    cmd.assert().success();

    let mnemonics = fs::read_to_string(out.path().join("mnemonics.h"))?;
    assert!(mnemonics.starts_with("/* Generated by optablegen */\n"));
    assert!(mnemonics.contains("\t/* $80 */ \"bra $%02x\",\n"));
    assert!(mnemonics.contains("\t/* $02 */ \"cop #$%02x\",\n"));
    assert!(mnemonics.contains("\t/* $FF */ \"nop \"};\n"));
    Ok(())
}

#[test]
fn unknown_mode_reports_location() -> Result<(), Box<dyn std::error::Error>> {
    let descriptors = tempfile::tempdir()?;
    write_descriptors(descriptors.path(), "; ok\nbra     far     3   $80\n")?;
    let out = tempfile::tempdir()?;

    let mut cmd = Command::cargo_bin("optablegen")?;
    cmd.arg("generate")
        .arg("--descriptors")
        .arg(descriptors.path())
        .arg("--out-dir")
        .arg(out.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("65c02.opcodes:2"))
        .stderr(predicate::str::contains("far"));
    assert!(!out.path().join("tables.h").exists());
    Ok(())
}

#[test]
fn verbose_flag_logs_progress() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("optablegen")?;
    cmd.env_remove("RUST_LOG")
        .arg("--verbose")
        .arg("generate")
        .arg("--out-dir")
        .arg(out.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("artifacts rendered"));
    Ok(())
}

#[test]
fn quiet_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("optablegen")?;
    cmd.env_remove("RUST_LOG")
        .arg("generate")
        .arg("--out-dir")
        .arg(out.path());
    cmd.assert().success().stderr(predicate::str::is_empty());
    Ok(())
}
