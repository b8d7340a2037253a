//! Shared contract between the eBPF fixtures (kernel) and userspace
//!
//! This crate defines everything both sides must agree on:
//! - the entry symbol and the ELF sections each variant advertises
//! - the pass-through verdict values, mirrored from the kernel UAPI
//! - the license bytes the loader checks before allowing GPL-only helpers
//!
//! It is `no_std` unless the `userspace` feature is enabled.

#![cfg_attr(not(feature = "userspace"), no_std)]

use core::{fmt, str::FromStr};

/// Entry symbol exported by both fixture objects.
pub const PROGRAM_NAME: &str = "handle_ingress";

/// License placed in the `license` section, NUL-terminated.
pub const LICENSE: [u8; 4] = *b"GPL\0";

/// [`LICENSE`] without the trailing NUL.
pub const LICENSE_NAME: &str = "GPL";

/// Size of the kernel's program name buffer, including the trailing NUL.
pub const BPF_OBJ_NAME_LEN: usize = 16;

/// ELF section names
pub mod section {
    pub const CLASSIFIER: &str = "classifier";
    pub const TCX_INGRESS: &str = "tcx/ingress";
    pub const LICENSE: &str = "license";
}

/// Verdict constants (values from `linux/pkt_cls.h` and `linux/bpf.h`)
pub mod verdict {
    /// `TC_ACT_OK`: continue normal processing on a legacy tc hook.
    pub const TC_ACT_OK: i32 = 0;
    /// `BPF_OK`: continue normal processing; same value as `TCX_PASS`.
    pub const BPF_OK: i32 = 0;
}

/// Attachment point a fixture is built for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Legacy tc classifier on the clsact ingress parent.
    Classifier,
    /// Multi-program tcx ingress hook.
    TcxIngress,
}

impl Hook {
    pub const ALL: [Hook; 2] = [Hook::Classifier, Hook::TcxIngress];

    pub const fn section(self) -> &'static str {
        match self {
            Hook::Classifier => section::CLASSIFIER,
            Hook::TcxIngress => section::TCX_INGRESS,
        }
    }

    pub const fn pass_verdict(self) -> i32 {
        match self {
            Hook::Classifier => verdict::TC_ACT_OK,
            Hook::TcxIngress => verdict::BPF_OK,
        }
    }

    /// Symbolic name of [`Hook::pass_verdict`] as the kernel headers spell it.
    pub const fn verdict_name(self) -> &'static str {
        match self {
            Hook::Classifier => "TC_ACT_OK",
            Hook::TcxIngress => "BPF_OK",
        }
    }

    /// Name of the compiled object (the kernel crate's binary target).
    pub const fn object_name(self) -> &'static str {
        match self {
            Hook::Classifier => "dummy_bpf",
            Hook::TcxIngress => "dummy_bpf_tcx",
        }
    }

    /// Short label used on the command line and in listings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Hook::Classifier => "tc",
            Hook::TcxIngress => "tcx",
        }
    }

    /// Maps an ELF section name back to the hook that advertises it.
    pub fn from_section(name: &str) -> Option<Hook> {
        Hook::ALL.into_iter().find(|hook| hook.section() == name)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Hook::from_str`] for an unrecognised label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownHook;

impl fmt::Display for UnknownHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown hook, expected one of: tc, classifier, legacy, tcx, tcx-ingress")
    }
}

#[cfg(feature = "userspace")]
impl std::error::Error for UnknownHook {}

impl FromStr for Hook {
    type Err = UnknownHook;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tc" | "classifier" | "legacy" => Ok(Hook::Classifier),
            "tcx" | "tcx-ingress" | "tcx/ingress" => Ok(Hook::TcxIngress),
            _ => Err(UnknownHook),
        }
    }
}

/// Pass-through decision shared by both entry points.
///
/// The context is never read: the verdict depends only on the hook.
#[inline(always)]
pub fn handle_ingress<C: ?Sized>(hook: Hook, _ctx: &C) -> i32 {
    hook.pass_verdict()
}

const _: () = {
    assert!(
        PROGRAM_NAME.len() < BPF_OBJ_NAME_LEN,
        "entry symbol must fit the kernel program name buffer"
    );
    assert!(LICENSE[LICENSE.len() - 1] == 0, "license must be NUL-terminated");

    let name = LICENSE_NAME.as_bytes();
    assert!(name.len() + 1 == LICENSE.len());
    let mut i = 0;
    while i < name.len() {
        assert!(name[i] == LICENSE[i]);
        i += 1;
    }
};
