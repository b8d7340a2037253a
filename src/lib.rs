pub mod catalog;
pub mod cli;
pub mod error;
pub mod export;
pub mod inspect;

pub use catalog::{CatalogEntry, Fixture};
pub use error::{FixtureError, Result};
pub use inspect::ImageReport;
pub use tc_fixtures_common::{Hook, LICENSE, PROGRAM_NAME};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
