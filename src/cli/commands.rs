use crate::catalog::{self, Fixture};
use crate::cli::Commands;
use crate::{export, inspect, Hook, ImageReport};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::List { json } => handle_list(json),
        Commands::Export {
            out_dir,
            variant,
            dev,
        } => handle_export(out_dir, variant, dev).await,
        Commands::Inspect { paths, variant } => handle_inspect(paths, variant).await,
    }
}

fn handle_list(json: bool) -> Result<()> {
    let entries = catalog::entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{:<8} {:<12} {:<16} {:<10} {:<8} {:<16} {:<26} {:>8}",
        "VARIANT", "SECTION", "SYMBOL", "VERDICT", "LICENSE", "OBJECT", "TC FILTER", "SIZE"
    );
    for entry in &entries {
        let size = entry
            .size_bytes
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<12} {:<16} {:<10} {:<8} {:<16} {:<26} {:>8}",
            entry.variant,
            entry.section,
            entry.entry_symbol,
            entry.verdict_name,
            entry.license,
            entry.object_file,
            entry.tc_filter_name.as_deref().unwrap_or("-"),
            size
        );
    }

    if entries.iter().any(|e| !e.embedded) {
        warn!("Some fixture images were not embedded in this build");
    }
    Ok(())
}

async fn handle_export(out_dir: PathBuf, variant: Option<Hook>, dev: Option<String>) -> Result<()> {
    info!("Exporting fixtures to {}", out_dir.display());

    let written = match variant {
        Some(hook) => vec![export::write_fixture(Fixture::new(hook), &out_dir)
            .await
            .with_context(|| format!("Failed to export {} fixture", hook))?],
        None => export::write_all(&out_dir)
            .await
            .context("Failed to export fixtures")?,
    };

    for path in &written {
        println!("{}", path.display());
    }

    if let Some(dev) = dev {
        for path in &written {
            if let Some(fixture) = fixture_for_path(path) {
                println!("{}", fixture.attach_hint(&dev, path));
            }
        }
    }
    Ok(())
}

async fn handle_inspect(paths: Vec<PathBuf>, variant: Option<Hook>) -> Result<()> {
    if paths.is_empty() {
        let fixtures: Vec<Fixture> = match variant {
            Some(hook) => vec![Fixture::new(hook)],
            None => Fixture::all().collect(),
        };
        for fixture in fixtures {
            let image = fixture.image()?;
            let report = inspect::verify(image, fixture.hook())
                .with_context(|| format!("Embedded {} image is invalid", fixture.object_name()))?;
            print_report(fixture.object_name(), &report);
        }
        return Ok(());
    }

    for path in paths {
        let image = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let report = match variant {
            Some(hook) => inspect::verify(&image, hook),
            None => inspect::inspect(&image),
        }
        .with_context(|| format!("{} does not satisfy the fixture contract", path.display()))?;
        print_report(&path.display().to_string(), &report);
    }
    Ok(())
}

fn print_report(label: &str, report: &ImageReport) {
    println!(
        "{}: ok (variant={}, section={}, symbol={}, license={}, machine={}, {} bytes)",
        label,
        report.hook,
        report.section,
        report.entry_symbol,
        report.license,
        report.machine,
        report.size_bytes
    );
}

fn fixture_for_path(path: &Path) -> Option<Fixture> {
    let name = path.file_name()?.to_str()?;
    Fixture::all().find(|fixture| fixture.file_name() == name)
}
