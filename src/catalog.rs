//! Catalog of the compiled fixtures and the images embedded at build time

use crate::{FixtureError, Result};
use serde::Serialize;
use std::path::Path;
use tc_fixtures_common::{Hook, LICENSE_NAME, PROGRAM_NAME};

#[cfg(fixtures_embedded)]
static DUMMY_BPF: &[u8] = aya::include_bytes_aligned!(concat!(env!("OUT_DIR"), "/dummy_bpf"));

#[cfg(fixtures_embedded)]
static DUMMY_BPF_TCX: &[u8] =
    aya::include_bytes_aligned!(concat!(env!("OUT_DIR"), "/dummy_bpf_tcx"));

#[cfg(fixtures_embedded)]
fn embedded_image(hook: Hook) -> Option<&'static [u8]> {
    Some(match hook {
        Hook::Classifier => DUMMY_BPF,
        Hook::TcxIngress => DUMMY_BPF_TCX,
    })
}

#[cfg(not(fixtures_embedded))]
fn embedded_image(_hook: Hook) -> Option<&'static [u8]> {
    None
}

/// Pin directory used in tcx attach hints.
const BPFFS_ROOT: &str = "/sys/fs/bpf";

/// One always-pass classifier object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fixture {
    hook: Hook,
}

impl Fixture {
    pub const fn new(hook: Hook) -> Self {
        Self { hook }
    }

    pub fn all() -> impl Iterator<Item = Fixture> {
        Hook::ALL.into_iter().map(Fixture::new)
    }

    pub const fn hook(&self) -> Hook {
        self.hook
    }

    pub const fn section(&self) -> &'static str {
        self.hook.section()
    }

    pub const fn object_name(&self) -> &'static str {
        self.hook.object_name()
    }

    /// File name used when the object is exported (`dummy_bpf.o`).
    pub fn file_name(&self) -> String {
        format!("{}.o", self.object_name())
    }

    pub fn is_embedded(&self) -> bool {
        embedded_image(self.hook).is_some()
    }

    /// The compiled ELF object, if this build embedded it.
    pub fn image(&self) -> Result<&'static [u8]> {
        embedded_image(self.hook).ok_or(FixtureError::ImageUnavailable {
            object: self.object_name(),
        })
    }

    /// Name iproute2 gives a filter loaded from the exported file.
    ///
    /// tcx programs are not tc filters, so only the legacy hook has one.
    pub fn tc_filter_name(&self) -> Option<String> {
        match self.hook {
            Hook::Classifier => Some(format!("{}:[{}]", self.file_name(), self.section())),
            Hook::TcxIngress => None,
        }
    }

    /// Command line an external harness can use to attach the exported object.
    pub fn attach_hint(&self, dev: &str, object: &Path) -> String {
        match self.hook {
            Hook::Classifier => format!(
                "tc qdisc add dev {dev} clsact && tc filter add dev {dev} ingress bpf direct-action obj {} sec {}",
                object.display(),
                self.section()
            ),
            Hook::TcxIngress => {
                let pin = format!("{BPFFS_ROOT}/{}", self.object_name());
                format!(
                    "bpftool prog load {} {pin} && bpftool net attach tcx_ingress pinned {pin} dev {dev}",
                    object.display()
                )
            }
        }
    }
}

/// Serializable view of a [`Fixture`] for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub variant: &'static str,
    pub section: &'static str,
    pub entry_symbol: &'static str,
    pub verdict: i32,
    pub verdict_name: &'static str,
    pub license: &'static str,
    pub object_file: String,
    pub tc_filter_name: Option<String>,
    pub embedded: bool,
    pub size_bytes: Option<usize>,
}

impl From<Fixture> for CatalogEntry {
    fn from(fixture: Fixture) -> Self {
        let hook = fixture.hook();
        Self {
            variant: hook.as_str(),
            section: hook.section(),
            entry_symbol: PROGRAM_NAME,
            verdict: hook.pass_verdict(),
            verdict_name: hook.verdict_name(),
            license: LICENSE_NAME,
            object_file: fixture.file_name(),
            tc_filter_name: fixture.tc_filter_name(),
            embedded: fixture.is_embedded(),
            size_bytes: fixture.image().ok().map(<[u8]>::len),
        }
    }
}

pub fn entries() -> Vec<CatalogEntry> {
    Fixture::all().map(CatalogEntry::from).collect()
}
