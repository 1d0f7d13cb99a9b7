//! WMS grid command line tool
//!
//! Loads a record set (a built-in dataset or JSON files), applies search,
//! filters, sorting and paging the same way the dashboard tables do, and
//! prints the resulting page as a table or as JSON.

mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use wms_core::{GridRecord, Record, load_records};
use wms_grid::{GridConfig, RecordGrid, SortDirection, fixtures};
use wms_settings::GridSettings;

use crate::logging::LoggingConfig;

/// Built-in record sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dataset {
    /// The ten mock invoices of the stock tables
    Invoices,
    /// The inventory log entries
    Logs,
}

/// Search, filter, sort and page warehouse records.
#[derive(Parser, Debug)]
#[command(name = "wms-grid")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Built-in dataset to load
    #[arg(long, value_enum, conflicts_with_all = ["records", "config"])]
    dataset: Option<Dataset>,

    /// JSON file holding an array of record objects
    #[arg(long, requires = "config")]
    records: Option<PathBuf>,

    /// JSON grid configuration for --records
    #[arg(long, requires = "records")]
    config: Option<PathBuf>,

    /// Settings file; defaults to the user config directory
    #[arg(long, env = "WMS_SETTINGS")]
    settings: Option<PathBuf>,

    /// Case-insensitive search over every field
    #[arg(short, long)]
    search: Option<String>,

    /// Filter as FIELD=VALUE; repeat for several fields
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    descending: bool,

    /// Zero-based page to show
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Rows per page; overrides the settings file
    #[arg(long)]
    page_size: Option<usize>,

    /// Print the filter options of FIELD instead of rows
    #[arg(long, value_name = "FIELD")]
    options: Option<String>,

    /// Print rows as JSON
    #[arg(long)]
    json: bool,

    /// Write the effective settings, including --page-size, to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid filter `{raw}`, expected FIELD=VALUE"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("invalid filter `{raw}`, field name is empty"));
    }
    Ok((field.to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = effective_settings(&cli)?;
    logging::init(&LoggingConfig::new(settings.log_filter.clone()))?;
    if cli.save_settings {
        tracing::info!("Saved settings");
    }

    let mut grid = build_grid(&cli, &settings)?;
    apply_intents(&mut grid, &cli);

    let mut out = std::io::stdout().lock();
    if let Some(field) = &cli.options {
        for option in grid.filter_options(field) {
            writeln!(out, "{}", option)?;
        }
        return Ok(());
    }

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &grid.page_rows())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render_table(&grid))?;
        writeln!(out, "{}", footer(&grid))?;
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<GridSettings> {
    match path {
        Some(path) => GridSettings::load_from(path),
        None => GridSettings::load(),
    }
}

/// Settings with command line overrides applied, saved back when asked
fn effective_settings(cli: &Cli) -> Result<GridSettings> {
    let mut settings = load_settings(cli.settings.as_deref())?;
    if let Some(size) = cli.page_size {
        settings.page_size = Some(size);
    }

    if cli.save_settings {
        match cli.settings.as_deref() {
            Some(path) => settings.save_to(path)?,
            None => settings.save()?,
        }
    }
    Ok(settings)
}

fn build_grid(cli: &Cli, settings: &GridSettings) -> Result<RecordGrid> {
    let (records, config) = match (&cli.records, &cli.config) {
        (Some(records_path), Some(config_path)) => {
            let config_json = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read grid config from {:?}", config_path))?;
            let config = GridConfig::from_json(&config_json)
                .with_context(|| format!("Invalid grid config in {:?}", config_path))?;

            let records_json = std::fs::read_to_string(records_path)
                .with_context(|| format!("Failed to read records from {:?}", records_path))?;
            let records = load_records(&records_json, &config.fields)
                .with_context(|| format!("Invalid records in {:?}", records_path))?;
            (records, config)
        }
        _ => dataset(cli.dataset.unwrap_or(Dataset::Invoices)),
    };

    tracing::info!("Loaded {} records", records.len());
    RecordGrid::new(records, config, settings).context("Failed to build record grid")
}

fn dataset(dataset: Dataset) -> (Vec<Record>, GridConfig) {
    match dataset {
        Dataset::Invoices => (fixtures::invoices(), fixtures::invoice_config()),
        Dataset::Logs => (fixtures::inventory_logs(), fixtures::inventory_log_config()),
    }
}

fn apply_intents(grid: &mut RecordGrid, cli: &Cli) {
    if let Some(term) = &cli.search {
        grid.set_search_term(term.as_str());
    }
    for (field, value) in &cli.filters {
        grid.set_filter(field, value);
    }
    if let Some(field) = &cli.sort {
        let direction = if cli.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        grid.set_sort(field, direction);
    }
    if cli.page_size.is_some() {
        grid.set_page_size(cli.page_size);
    }
    grid.set_page(cli.page);
}

fn render_table<R: GridRecord>(grid: &RecordGrid<R>) -> Table {
    let fields = &grid.config().fields;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(fields.iter().map(|field| field.label()));

    for record in grid.page_rows() {
        table.add_row(fields.iter().map(|field| record.rendered(&field.name)));
    }
    table
}

fn footer<R: GridRecord>(grid: &RecordGrid<R>) -> String {
    let shown = grid.page_rows().len();
    let mut line = format!("{} / {} records", shown, grid.len());
    if grid.page_count() > 1 {
        line.push_str(&format!(
            " (page {} of {}, {} matching)",
            grid.current_page() + 1,
            grid.page_count(),
            grid.visible_count()
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid_for(args: &[&str]) -> RecordGrid {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        let mut grid = build_grid(&cli, &GridSettings::default()).expect("grid");
        apply_intents(&mut grid, &cli);
        grid
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("paymentStatus=Paid"),
            Ok(("paymentStatus".to_string(), "Paid".to_string()))
        );
        assert_eq!(
            parse_filter("paymentMethod = Credit Card"),
            Ok(("paymentMethod".to_string(), "Credit Card".to_string()))
        );
        assert!(parse_filter("paymentStatus").is_err());
        assert!(parse_filter("=Paid").is_err());
    }

    #[test]
    fn test_dataset_conflicts_with_files() {
        let result =
            Cli::try_parse_from(["wms-grid", "--dataset", "logs", "--records", "r.json"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["wms-grid", "--records", "r.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_intents_are_applied() {
        let grid = grid_for(&[
            "wms-grid",
            "--dataset",
            "invoices",
            "--filter",
            "totalAmount=200to500",
            "--sort",
            "totalAmount",
            "--descending",
        ]);
        let invoices: Vec<String> = grid
            .visible_rows()
            .iter()
            .map(|r| r.rendered("invoice"))
            .collect();
        assert_eq!(
            invoices,
            vec!["INV004", "INV003", "INV007", "INV001", "INV006"]
        );
    }

    #[test]
    fn test_footer_with_pages() {
        let grid = grid_for(&[
            "wms-grid",
            "--dataset",
            "logs",
            "--page-size",
            "5",
            "--page",
            "2",
        ]);
        assert_eq!(footer(&grid), "2 / 12 records (page 3 of 3, 12 matching)");
    }

    #[test]
    fn test_table_has_labelled_header() {
        let grid = grid_for(&["wms-grid", "--dataset", "invoices", "--search", "INV010"]);
        let rendered = render_table(&grid).to_string();
        assert!(rendered.contains("Amount"));
        assert!(rendered.contains("$850.00"));
        assert!(!rendered.contains("INV001 "));
    }

    #[test]
    fn test_save_settings_persists_page_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "wms-grid",
            "--settings",
            &path_arg,
            "--page-size",
            "4",
            "--save-settings",
        ])
        .expect("valid arguments");
        let settings = effective_settings(&cli).expect("settings");
        assert_eq!(settings.page_size, Some(4));

        let saved = GridSettings::load_from(&path).expect("saved settings");
        assert_eq!(saved, settings);

        let cli = Cli::try_parse_from(["wms-grid", "--settings", &path_arg]).expect("valid");
        let grid = build_grid(&cli, &effective_settings(&cli).expect("settings")).expect("grid");
        assert_eq!(grid.page_count(), 3);
    }

    #[test]
    fn test_settings_untouched_without_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["wms-grid", "--settings", &path_arg, "--page-size", "4"])
            .expect("valid arguments");
        effective_settings(&cli).expect("settings");
        assert!(!path.exists());
    }

    #[test]
    fn test_grid_from_json_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let records = dir.path().join("records.json");
        let config = dir.path().join("config.json");
        std::fs::write(
            &records,
            r#"[
                {"sku": "A-1", "bin": "North", "qty": 4},
                {"sku": "A-2", "bin": "South", "qty": "12"}
            ]"#,
        )
        .expect("write records");
        std::fs::write(
            &config,
            r#"{"fields": [{"name": "sku"}, {"name": "bin"}, {"name": "qty", "kind": "numeric"}],
                "identity": ["sku"]}"#,
        )
        .expect("write config");

        let records_arg = records.to_string_lossy().to_string();
        let config_arg = config.to_string_lossy().to_string();
        let grid = grid_for(&[
            "wms-grid",
            "--records",
            &records_arg,
            "--config",
            &config_arg,
            "--sort",
            "qty",
            "--descending",
        ]);
        assert_eq!(grid.visible_keys(), vec!["A-2", "A-1"]);
    }
}
