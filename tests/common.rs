#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Nothing listens on the discard port, so requests fail fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

pub fn portal() -> Command {
    let mut cmd = cargo_bin_cmd!("portal");
    cmd.env_remove("PORTAL_API_URL").env_remove("PORTAL_SESSION_FILE");
    cmd
}

/// Unique session file path inside the system temp dir, removed up front
pub fn temp_session(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_{}_portal_role", name, std::process::id()));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Session file already holding `role`
pub fn logged_in_session(name: &str, role: &str) -> String {
    let p = temp_session(name);
    fs::write(&p, role).expect("write session file");
    p
}
