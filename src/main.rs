//! Bakeweb main entry point

use anyhow::{anyhow, bail, Context};
use bakeweb_config::{Config, ConfigError};
use bakeweb_core::{ColumnIndex, CoreError, TableSortController};
use bakeweb_dom::{Document, NodeId};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bakeweb")]
#[command(version)]
#[command(about = "Apply header-click table sorting to a bakery calculator page", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// HTML page to process
    #[arg(required_unless_present = "print_default_config")]
    input: Option<PathBuf>,

    /// Which sortable table to click in, counted from 0
    #[arg(short, long, default_value_t = 0)]
    table: usize,

    /// Click the header bound to this 1-based column
    #[arg(long)]
    column: Option<usize>,

    /// Write the resulting page here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Find the bound header for `column` in the `table`-th sortable table
fn find_header(
    controller: &TableSortController,
    doc: &Document,
    table: usize,
    column: usize,
) -> anyhow::Result<NodeId> {
    let column = ColumnIndex::new(column)
        .ok_or_else(|| anyhow!("{}", CoreError::InvalidColumn { value: column.to_string() }.to_details()))?;
    let tables = controller.sortable_tables(doc);
    let table_id = *tables.get(table).with_context(|| {
        format!("page has {} sortable table(s), no index {}", tables.len(), table)
    })?;

    controller
        .sort_headers(doc, table_id)
        .into_iter()
        .find(|(_, c)| *c == column)
        .map(|(header, _)| header)
        .with_context(|| format!("table {} has no header for column {}", table, column))
}

/// Click the header for `column`, failing on the first listener error
fn click_column(
    controller: &TableSortController,
    doc: &mut Document,
    table: usize,
    column: usize,
) -> anyhow::Result<()> {
    let header = find_header(controller, doc, table, column)?;
    let outcome = doc.click(header)?;
    if let Some(error) = outcome.errors.into_iter().next() {
        if let Some(core) = error.downcast_ref::<CoreError>() {
            core.report("click");
            bail!("{}", core.to_details());
        }
        return Err(error);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let loaded = Config::load(&args.config);
    let level = match &loaded {
        Ok(config) => config.logging.level,
        Err(_) => Default::default(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();

    let config = match loaded {
        Ok(config) => config,
        Err(ConfigError::FileNotFound { path }) => {
            log::warn!("config file {} not found, using defaults", path);
            Config::default()
        }
        Err(e) => bail!("{}", e.to_details()),
    };

    let input = args.input.context("no input page given")?;
    let markup = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let controller = TableSortController::from_config(&config).map_err(|e| {
        e.report("build controller");
        anyhow!("{}", e.to_details())
    })?;
    let mut doc = Document::parse_html(&markup);
    let bound = controller.init(&mut doc).map_err(|e| {
        e.report("init");
        anyhow!("{}", e.to_details())
    })?;
    log::info!("{}: {} sort header(s) bound", input.display(), bound);

    if let Some(column) = args.column {
        click_column(&controller, &mut doc, args.table, column)?;
    }

    let html = doc.to_html();
    match args.output {
        Some(path) => std::fs::write(&path, html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", html),
    }

    Ok(())
}

// ==================== Tests ====================
