use anyhow::{anyhow, Context};
use aya_build::cargo_metadata::{Metadata, MetadataCommand};
use std::{env, path::Path};
use tc_fixtures_common::Hook;

const EBPF_PACKAGE: &str = "tc-fixtures-ebpf";
const SKIP_ENV: &str = "TC_FIXTURES_SKIP_EBPF";
const BPF_LINKER: &str = "bpf-linker";

fn main() -> anyhow::Result<()> {
    println!("cargo:rustc-check-cfg=cfg(fixtures_embedded)");
    println!("cargo:rerun-if-env-changed={SKIP_ENV}");
    println!("cargo:rerun-if-env-changed=CI");
    println!("cargo:rerun-if-env-changed=PATH");

    // Skip eBPF build if we're already building for the eBPF target
    if env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() == "bpf" {
        return Ok(());
    }

    if let Some(reason) = skip_reason() {
        println!("cargo:warning=eBPF fixtures not embedded: {reason}");
        return Ok(());
    }

    let Metadata { packages, .. } = MetadataCommand::new()
        .no_deps()
        .exec()
        .context("MetadataCommand::exec")?;

    let ebpf_package = packages
        .into_iter()
        .find(|pkg| pkg.name == EBPF_PACKAGE)
        .ok_or_else(|| anyhow!("{EBPF_PACKAGE} package not found"))?;

    aya_build::build_ebpf([ebpf_package])?;

    let out_dir = env::var("OUT_DIR")?;
    for hook in Hook::ALL {
        let object = Path::new(&out_dir).join(hook.object_name());
        if !object.exists() {
            return Err(anyhow!(
                "eBPF fixture compilation failed: {} not found",
                object.display()
            ));
        }
    }

    println!("cargo:rustc-cfg=fixtures_embedded");
    Ok(())
}

fn skip_reason() -> Option<String> {
    if env::var_os(SKIP_ENV).is_some() {
        return Some(format!("{SKIP_ENV} is set"));
    }

    // eBPF requires a Linux host to build and load
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "linux" {
        return Some("target is not Linux".to_string());
    }

    // CI runners build the fixtures in a dedicated job
    if env::var_os("CI").is_some() {
        return Some("running in CI".to_string());
    }

    if which::which(BPF_LINKER).is_err() {
        return Some(format!("{BPF_LINKER} not found on PATH"));
    }

    None
}
