//! Integration tests for the Hack assembler.
//!
//! Each `tests/<Name>.asm` fixture is assembled and compared with the
//! expected `tests/<Name>.hack` machine code.

use hack_assembler::{AsmError, assemble, assemble_file, output_path};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn test_file(name: &str) {
    let asm_path = format!("tests/{}.asm", name);
    let hack_path = format!("tests/{}.hack", name);

    let source =
        fs::read_to_string(&asm_path).unwrap_or_else(|_| panic!("Failed to read {}", asm_path));

    let expected =
        fs::read_to_string(&hack_path).unwrap_or_else(|_| panic!("Failed to read {}", hack_path));

    let result = assemble(&source).unwrap_or_else(|e| panic!("Failed to assemble {}: {}", name, e));

    assert_eq!(
        result.trim(),
        expected.trim(),
        "Output mismatch for {}",
        name
    );
}

// =============================================================================
// Fixture programs
// =============================================================================

#[test]
fn test_add() {
    test_file("Add");
}

#[test]
fn test_max() {
    test_file("Max");
}

#[test]
fn test_sum() {
    test_file("Sum");
}

// =============================================================================
// Symbol resolution
// =============================================================================

#[test]
fn test_forward_reference() {
    let source = "@SKIP\n0;JMP\n@7\nD=A\n(SKIP)\n@SKIP\n0;JMP\n";
    let output = assemble(source).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    // SKIP marks the fifth real instruction (address 4)
    assert_eq!(lines[0], "0000000000000100");
    assert_eq!(lines[4], "0000000000000100");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_variables_after_labels() {
    let source = "(A_LABEL)\n@foo\nM=1\n@bar\nM=1\n(B_LABEL)\n@foo\nD=M\n";
    let output = assemble(source).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "0000000000010000"); // foo = 16
    assert_eq!(lines[2], "0000000000010001"); // bar = 17
    assert_eq!(lines[4], "0000000000010000"); // foo again
}

#[test]
fn test_labels_are_not_variables() {
    // END is referenced before it is declared; it must not take RAM[16]
    let source = "@END\n0;JMP\n@x\nM=0\n(END)\n@END\n0;JMP\n";
    let output = assemble(source).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "0000000000000100"); // END = 4
    assert_eq!(lines[2], "0000000000010000"); // x = 16
}

#[test]
fn test_predefined_symbols_are_not_variables() {
    let source = "@R0\nD=M\n@SCREEN\nD=A\n@x\nM=D\n";
    let output = assemble(source).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "0000000000000000"); // R0 = 0
    assert_eq!(lines[2], "0100000000000000"); // SCREEN = 16384
    assert_eq!(lines[4], "0000000000010000"); // x still gets 16
}

#[test]
fn test_deterministic() {
    let source = fs::read_to_string("tests/Sum.asm").unwrap();
    assert_eq!(assemble(&source).unwrap(), assemble(&source).unwrap());
}

// =============================================================================
// File handling
// =============================================================================

#[test]
fn test_assemble_file_writes_hack() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Max.asm");
    fs::copy("tests/Max.asm", &input).unwrap();

    let output = assemble_file(&input).unwrap();
    assert_eq!(output, dir.path().join("Max.hack"));

    let written = fs::read_to_string(&output).unwrap();
    let expected = fs::read_to_string("tests/Max.hack").unwrap();
    assert_eq!(written.trim(), expected.trim());
    assert!(written.ends_with('\n'));
}

#[test]
fn test_assemble_file_without_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("program");
    fs::write(&input, "@5\n").unwrap();

    let output = assemble_file(&input).unwrap();
    assert_eq!(output, dir.path().join("program.hack"));
    assert_eq!(fs::read_to_string(output).unwrap(), "0000000000000101\n");
}

#[test]
fn test_failed_assembly_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Bad.asm");
    fs::write(&input, "@1\nD=D*A\n").unwrap();

    let err = assemble_file(&input).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(!output_path(&input).exists());
}

#[test]
fn test_missing_input() {
    let err = assemble_file(Path::new("tests/DoesNotExist.asm")).unwrap_err();
    assert!(matches!(err, AsmError::FileRead { .. }));
}
