use std::fs;

use codepoint_core::CodePoint;
use pretty_assertions::assert_eq;
use scrape_engine::{
    ensure_output_dir, render_code_point_module, validate_module_name, write_code_point_module,
    AtomicFileWriter, ModuleNameError, PersistError,
};
use tempfile::TempDir;

fn codes(values: &[u32]) -> Vec<CodePoint> {
    values.iter().copied().map(CodePoint::new).collect()
}

#[test]
fn module_names_follow_identifier_rules() {
    assert_eq!(validate_module_name("emoji_table"), Ok(()));
    assert_eq!(validate_module_name("_table2"), Ok(()));
    assert_eq!(validate_module_name(""), Err(ModuleNameError::Empty));
    assert_eq!(
        validate_module_name("emoji-table"),
        Err(ModuleNameError::Separator("emoji-table".to_string()))
    );
    assert_eq!(
        validate_module_name("emoji.table"),
        Err(ModuleNameError::Separator("emoji.table".to_string()))
    );
    assert!(matches!(
        validate_module_name("2emoji"),
        Err(ModuleNameError::NotIdentifier(_))
    ));
    assert!(matches!(
        validate_module_name("_"),
        Err(ModuleNameError::NotIdentifier(_))
    ));
}

#[test]
fn keywords_are_not_module_names() {
    for keyword in ["fn", "mod", "self", "Self", "crate", "async", "gen", "yield", "try"] {
        assert_eq!(
            validate_module_name(keyword),
            Err(ModuleNameError::Keyword(keyword.to_string())),
            "{keyword} should be rejected"
        );
    }
    assert_eq!(validate_module_name("fn_table"), Ok(()));
    assert!(validate_module_name("r#fn").is_err());
}

#[test]
fn rendered_module_lists_code_points_in_order() {
    let rendered = render_code_point_module(
        "emoji_table",
        "https://emoji.test/list.html",
        &codes(&[0x1F600, 0x1F601]),
    );
    let expected = "\
// Generated by emojiscrape from https://emoji.test/list.html. Do not edit.

pub mod emoji_table {
    pub const COUNT: usize = 2;

    pub const CODE_POINTS: &[u32] = &[
        0x1F600, 0x1F601,
    ];
}
";
    assert_eq!(rendered, expected);
}

#[test]
fn rendered_module_wraps_long_tables() {
    let values: Vec<u32> = (0x1F600..0x1F612).collect();
    let rendered = render_code_point_module("t", "u", &codes(&values));
    let rows = rendered
        .lines()
        .filter(|line| line.trim_start().starts_with("0x"))
        .count();
    assert_eq!(rows, 3);
    assert!(rendered.contains("pub const COUNT: usize = 18;"));
}

#[test]
fn write_module_creates_parent_and_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("generated").join("emoji_table.rs");

    let first = write_code_point_module(&target, "emoji_table", "u", &codes(&[0x1F600])).unwrap();
    assert_eq!(first, target);
    assert!(fs::read_to_string(&first).unwrap().contains("0x1F600,"));

    let second =
        write_code_point_module(&target, "emoji_table", "u", &codes(&[0x1F64F])).unwrap();
    let content = fs::read_to_string(&second).unwrap();
    assert!(content.contains("0x1F64F,"));
    assert!(!content.contains("0x1F600,"));
}

#[test]
fn write_module_rejects_bad_name_without_touching_disk() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("emoji.rs");

    let err = write_code_point_module(&target, "emoji-table", "u", &[]).unwrap_err();
    assert!(matches!(err, PersistError::ModuleName(_)));
    assert!(!target.exists());
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("emoji.rs", "data").is_err());
    assert!(!file_path.with_file_name("emoji.rs").exists());
}
