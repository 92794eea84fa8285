mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;

use app::SalesDashboardApp;
use config::Config;
use data::{export, filter, loader, report};
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if config.headless() {
        return run_headless(&config);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let state = AppState::new(&config);
    eframe::run_native(
        "Sales Performance Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(SalesDashboardApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}

/// Load, filter and aggregate once, then print and/or export.
/// A load failure stops here, before anything is computed or written.
fn run_headless(config: &Config) -> Result<()> {
    let selection = config.selection()?;
    let dataset = loader::load(&config.db, &config.table)
        .with_context(|| format!("loading {}", config.db.display()))?;

    if let Some(path) = &config.export {
        export::write_csv(path, &filter::apply(&dataset, &selection))?;
    }
    if config.report {
        let report = report::render(&dataset, &selection);
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{json}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn headless_config(db: &std::path::Path, out: &std::path::Path) -> Config {
        Config::try_parse_from([
            "sales-dashboard",
            "--db",
            db.to_str().expect("utf-8 path"),
            "--export",
            out.to_str().expect("utf-8 path"),
        ])
        .expect("parse")
    }

    #[test]
    fn missing_store_writes_no_export() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join(export::FILE_NAME);
        let config = headless_config(&dir.path().join("absent.db"), &out);

        assert!(run_headless(&config).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn malformed_store_writes_no_export() {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = dir.path().join("sales.db");
        Connection::open(&db)
            .expect("open store")
            .execute_batch(
                r#"CREATE TABLE sales (
                    "Region" TEXT, "Category" TEXT, "Sub-Category" TEXT, "Product Name" TEXT,
                    "Year" INTEGER, "Month" TEXT, "Sales" REAL, "Profit" REAL, "Profit Margin (%)" REAL
                );
                INSERT INTO sales VALUES ('East', 'Tech', 'Phones', 'Alpha', 2023, 'May', 'abc', 1, 1);"#,
            )
            .expect("seed store");
        let out = dir.path().join(export::FILE_NAME);

        assert!(run_headless(&headless_config(&db, &out)).is_err());
        assert!(!out.exists());
    }
}
