use tc_fixtures_common::Hook;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Fixture image {object} was not embedded in this build (rebuild on Linux with bpf-linker installed)")]
    ImageUnavailable { object: &'static str },

    #[error("Failed to parse ELF object: {0}")]
    ElfParse(#[from] object::read::Error),

    #[error("Section {section} not found in object")]
    MissingSection { section: String },

    #[error("Entry symbol {symbol} not found in section {section}")]
    MissingEntry { symbol: String, section: String },

    #[error("Entry symbol {symbol} is not a function")]
    EntryNotFunction { symbol: String },

    #[error("License mismatch: expected \"GPL\", found {found:?}")]
    LicenseMismatch { found: String },

    #[error("Unexpected program section: {section}")]
    UnexpectedProgramSection { section: String },

    #[error("Object is built for the {found} hook, expected {expected}")]
    HookMismatch { expected: Hook, found: Hook },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
