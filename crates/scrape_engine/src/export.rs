use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use codepoint_core::CodePoint;
use tempfile::NamedTempFile;
use thiserror::Error;

const VALUES_PER_LINE: usize = 8;

// Strict and reserved keywords across editions. Raw identifiers are not accepted.
const RUST_KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("output path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
    #[error(transparent)]
    ModuleName(#[from] ModuleNameError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleNameError {
    #[error("module name is empty")]
    Empty,
    #[error("module name {0:?} may not contain '.' or '-'")]
    Separator(String),
    #[error("module name {0:?} is not a valid identifier")]
    NotIdentifier(String),
    #[error("module name {0:?} is a reserved Rust keyword")]
    Keyword(String),
}

/// Check that `name` can be used as the generated module's name.
pub fn validate_module_name(name: &str) -> Result<(), ModuleNameError> {
    if name.is_empty() {
        return Err(ModuleNameError::Empty);
    }
    if name.contains(['.', '-']) {
        return Err(ModuleNameError::Separator(name.to_string()));
    }
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || name == "_" || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ModuleNameError::NotIdentifier(name.to_string()));
    }
    if RUST_KEYWORDS.contains(&name) {
        return Err(ModuleNameError::Keyword(name.to_string()));
    }
    Ok(())
}

/// Render the collected code points as a Rust source module.
pub fn render_code_point_module(module_name: &str, source_url: &str, codes: &[CodePoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// Generated by emojiscrape from {source_url}. Do not edit.");
    let _ = writeln!(out);
    let _ = writeln!(out, "pub mod {module_name} {{");
    let _ = writeln!(out, "    pub const COUNT: usize = {};", codes.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "    pub const CODE_POINTS: &[u32] = &[");
    for line in codes.chunks(VALUES_PER_LINE) {
        let values: Vec<String> = line
            .iter()
            .map(|code| format!("0x{:X},", code.value()))
            .collect();
        let _ = writeln!(out, "        {}", values.join(" "));
    }
    let _ = writeln!(out, "    ];");
    let _ = writeln!(out, "}}");
    out
}

/// Validate the module name, render the module and write it atomically to `path`.
pub fn write_code_point_module(
    path: &Path,
    module_name: &str,
    source_url: &str,
    codes: &[CodePoint],
) -> Result<PathBuf, PersistError> {
    validate_module_name(module_name)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::NoFileName(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let content = render_code_point_module(module_name, source_url, codes);
    AtomicFileWriter::new(dir).write(file_name, &content)
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file in the same directory, then renames it.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
