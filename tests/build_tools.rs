//! Tool discovery used by build.rs to decide whether the kernel crate can be built.

#![cfg(unix)]

use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;

#[test]
fn bpf_linker_must_be_executable() {
    let dir = tempfile::tempdir().unwrap();
    let linker = dir.path().join("bpf-linker");
    fs::write(&linker, b"#!/bin/sh\n").unwrap();

    fs::set_permissions(&linker, Permissions::from_mode(0o644)).unwrap();
    assert!(which::which_in("bpf-linker", Some(dir.path()), dir.path()).is_err());

    fs::set_permissions(&linker, Permissions::from_mode(0o755)).unwrap();
    let found = which::which_in("bpf-linker", Some(dir.path()), dir.path()).unwrap();
    assert_eq!(found, linker);
}

#[test]
fn missing_bpf_linker_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(which::which_in("bpf-linker", Some(dir.path()), dir.path()).is_err());
}
