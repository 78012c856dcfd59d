//! slipgen: turn an inventory export into the render context for printable
//! receiving slips.
//!
//! The context is written to stdout as JSON. Rejected records, warnings and
//! logs go to stderr.

mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use slipgen_core::ItemId;
use slipgen_inventory::{ImportReport, SelectionSpec, SourceKind, import};
use slipgen_layout::{DocumentPlan, ItemsPerPage, plan_document};
use slipgen_observability::{LogFormat, LogLevel};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "slipgen")]
#[command(about = "Lay out inventory transfers as printable receiving slips")]
#[command(version)]
struct Cli {
    /// Inventory export to read
    input: PathBuf,

    /// Input schema (csv, bamboo, cultivera). Defaults to csv for `.csv` files
    #[arg(short, long, env = "SLIPGEN_SOURCE")]
    source: Option<SourceKind>,

    /// TOML configuration file with `[layout]` and `[logging]` tables
    #[arg(short, long, env = "SLIPGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Slots per page (2, 4, 6 or 8)
    #[arg(short = 'n', long, env = "SLIPGEN_ITEMS_PER_PAGE")]
    items_per_page: Option<ItemsPerPage>,

    /// Case-insensitive search over product, strain, vendor and barcode
    #[arg(long, default_value = "")]
    search: String,

    /// Only items of this category
    #[arg(long)]
    category: Option<String>,

    /// Print exactly these item ids, ignoring search and category
    #[arg(long = "id", value_name = "ID")]
    ids: Vec<ItemId>,

    /// Leave these item ids out of the search results
    #[arg(long = "exclude", value_name = "ID")]
    excluded: Vec<ItemId>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "SLIPGEN_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn source_kind(&self) -> Result<SourceKind> {
        if let Some(kind) = self.source {
            return Ok(kind);
        }
        match self.input.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(SourceKind::Csv),
            _ => Err(anyhow!(
                "cannot tell the schema of '{}'; pass --source csv|bamboo|cultivera",
                self.input.display()
            )),
        }
    }

    fn selection(&self) -> SelectionSpec {
        let mut spec = SelectionSpec::search(self.search.clone())
            .excluding(self.excluded.iter().cloned());
        if let Some(category) = &self.category {
            spec = spec.with_category(category.clone());
        }
        if !self.ids.is_empty() {
            spec = spec.with_explicit_ids(self.ids.iter().cloned());
        }
        spec
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(n) = cli.items_per_page {
        config.layout.items_per_page = n;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.log_json {
        config.logging.format = LogFormat::Json;
    }
    Ok(config)
}

fn read_input(path: &Path, kind: SourceKind) -> Result<ImportReport> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    import(kind, &bytes).with_context(|| format!("failed to import '{}' as {kind}", path.display()))
}

fn report_import(report: &ImportReport) {
    for rejected in &report.rejected {
        eprintln!("skipped: {rejected}");
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

fn write_plan(plan: &DocumentPlan, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(plan)?
    } else {
        serde_json::to_string(plan)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    slipgen_observability::init_with(&config.logging);

    let kind = cli.source_kind()?;
    let report = read_input(&cli.input, kind)?;
    report_import(&report);
    tracing::info!(
        source = %kind,
        items = report.items.len(),
        rejected = report.rejected.len(),
        "input loaded"
    );

    let plan = plan_document(&report.items, &cli.selection(), &config.layout)?;
    for warning in &plan.warnings {
        eprintln!("warning: {warning}");
    }
    if plan.is_empty() {
        bail!("nothing to print: no items matched the selection");
    }

    write_plan(&plan, cli.pretty)
}
