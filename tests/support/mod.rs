#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub fn get_confprobe_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("confprobe")
}

/// Writes an executable `/bin/sh` script named `name` into `dir`
pub fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create tool directory");
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write tool");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to make tool executable");
    path
}

/// A fake curl-config answering --prefix and --libs, counting its runs in
/// `<dir>/curl-config.runs`
pub fn write_fake_curl_config(dir: &Path) -> PathBuf {
    let runs = dir.join("curl-config.runs");
    write_tool(
        dir,
        "curl-config",
        &format!(
            r#"echo run >> '{}'
case "$1" in
  --prefix) printf '  /opt/curl\n\n' ;;
  --libs) echo "-L/opt/curl/lib -lcurl" ;;
  *) echo "unknown option $1" >&2; exit 1 ;;
esac"#,
            runs.display()
        ),
    )
}

/// How many times a tool written by [`write_fake_curl_config`] ran
pub fn run_count(dir: &Path) -> usize {
    fs::read_to_string(dir.join("curl-config.runs"))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

/// Files in `dir` with the given extension
pub fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ext))
            .collect(),
        Err(_) => Vec::new(),
    }
}
