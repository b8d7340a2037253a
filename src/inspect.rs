//! ELF-level checks of the fixture contract
//!
//! A valid fixture object has:
//! - exactly one program section, named after a known hook
//! - a `handle_ingress` function symbol defined in that section
//! - a `license` section holding exactly `GPL\0`

use crate::{FixtureError, Result};
use object::{Object, ObjectSection, ObjectSymbol, SectionIndex, SectionKind, SymbolKind};
use tc_fixtures_common::{section, Hook, LICENSE, PROGRAM_NAME};
use tracing::debug;

/// What an object file advertises to a loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReport {
    pub hook: Hook,
    pub section: String,
    pub entry_symbol: String,
    pub license: String,
    pub machine: String,
    pub size_bytes: usize,
}

/// Parse `image` and check it against the fixture contract.
pub fn inspect(image: &[u8]) -> Result<ImageReport> {
    let file = object::File::parse(image)?;

    let (hook, section_name, section_index) = find_program_section(&file)?;
    debug!("Found program section {} (hook {})", section_name, hook);

    find_entry(&file, section_index, &section_name)?;
    let license = read_license(&file)?;

    Ok(ImageReport {
        hook,
        section: section_name,
        entry_symbol: PROGRAM_NAME.to_string(),
        license,
        machine: format!("{:?}", file.architecture()),
        size_bytes: image.len(),
    })
}

/// Like [`inspect`], additionally requiring the object to target `expected`.
pub fn verify(image: &[u8], expected: Hook) -> Result<ImageReport> {
    let report = inspect(image)?;
    if report.hook != expected {
        return Err(FixtureError::HookMismatch {
            expected,
            found: report.hook,
        });
    }
    Ok(report)
}

/// Executable, non-empty sections other than `.text` hold programs.
fn find_program_section(file: &object::File<'_>) -> Result<(Hook, String, SectionIndex)> {
    let mut found: Option<(Hook, String, SectionIndex)> = None;

    for sec in file.sections() {
        if sec.kind() != SectionKind::Text || sec.size() == 0 {
            continue;
        }
        let name = sec.name()?;
        if name == ".text" {
            continue;
        }

        let hook = Hook::from_section(name).ok_or_else(|| FixtureError::UnexpectedProgramSection {
            section: name.to_string(),
        })?;
        if found.is_some() {
            return Err(FixtureError::UnexpectedProgramSection {
                section: name.to_string(),
            });
        }
        found = Some((hook, name.to_string(), sec.index()));
    }

    found.ok_or_else(|| FixtureError::MissingSection {
        section: Hook::ALL
            .iter()
            .map(|hook| hook.section())
            .collect::<Vec<_>>()
            .join(" | "),
    })
}

fn find_entry(file: &object::File<'_>, index: SectionIndex, section_name: &str) -> Result<()> {
    let symbol = file
        .symbols()
        .find(|sym| {
            sym.section_index() == Some(index) && sym.name().is_ok_and(|name| name == PROGRAM_NAME)
        })
        .ok_or_else(|| FixtureError::MissingEntry {
            symbol: PROGRAM_NAME.to_string(),
            section: section_name.to_string(),
        })?;

    if symbol.kind() != SymbolKind::Text {
        return Err(FixtureError::EntryNotFunction {
            symbol: PROGRAM_NAME.to_string(),
        });
    }
    Ok(())
}

fn read_license(file: &object::File<'_>) -> Result<String> {
    let sec = file
        .section_by_name(section::LICENSE)
        .ok_or_else(|| FixtureError::MissingSection {
            section: section::LICENSE.to_string(),
        })?;
    let data = sec.data()?;

    if data != LICENSE {
        return Err(FixtureError::LicenseMismatch {
            found: String::from_utf8_lossy(data).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&data[..data.len() - 1]).into_owned())
}
