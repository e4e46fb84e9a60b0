//! Cache filename derivation
//!
//! A probe's output is stored as `<basename(program)>-<md5(args)>.out`. The
//! hash is the lowercase hex md5 of the raw argument bytes, so the same
//! program and argument string always map to the same file.

use std::path::{Path, PathBuf};

const CACHE_EXTENSION: &str = "out";

/// Lowercase hex md5 of the argument string
pub fn args_hash(args: &str) -> String {
    format!("{:x}", md5::compute(args.as_bytes()))
}

/// Final path component of `program`, or the whole string if it has none
pub fn program_basename(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string_lossy().into_owned())
}

/// Cache filename for a program and argument string.
///
/// `key_override` replaces the argument hash when given. An empty argument
/// string (or empty override) drops the key entirely.
pub fn cache_file_name(program: &Path, args: &str, key_override: Option<&str>) -> String {
    let base = program_basename(program);
    let key = match key_override {
        Some(k) => k.to_string(),
        None if args.is_empty() => String::new(),
        None => args_hash(args),
    };

    if key.is_empty() {
        format!("{}.{}", base, CACHE_EXTENSION)
    } else {
        format!("{}-{}.{}", base, key, CACHE_EXTENSION)
    }
}

pub fn cache_file_path(
    cache_dir: &Path,
    program: &Path,
    args: &str,
    key_override: Option<&str>,
) -> PathBuf {
    cache_dir.join(cache_file_name(program, args, key_override))
}
