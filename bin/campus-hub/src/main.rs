//! # Campus Hub Binary
//!
//! Assembles the record source, filters one module list by tab, optionally
//! selects a record and prints the list plus detail panel.

use std::path::PathBuf;

use anyhow::Context;
use askama::Template;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ch_core::error::AppError;
use ch_core::models::Module;
use ch_core::traits::{RecordSource, SystemClock};
use ch_ui::{DetailPanelTemplate, ListTemplate};
use ch_view::tabs::{default_tab, filter, FilterContext};
use ch_view::{Normalizer, SelectionState};
use configs::{AppConfig, DEFAULT_CONFIG_FILE};

// Feature-gated imports
#[cfg(feature = "mock-data")]
use ch_mock_data::SampleRecordSource;

#[derive(Debug, Parser)]
#[command(
    name = "campus-hub",
    version,
    about = "List campus records and render the detail panel"
)]
struct Cli {
    /// social, carpooling, messages, notifications or academic
    #[arg(short, long, default_value = "social")]
    module: Module,

    /// Tab id; defaults to the module's first tab
    #[arg(short, long)]
    tab: Option<String>,

    /// Id of the record to open in the detail panel
    #[arg(short, long)]
    select: Option<String>,

    /// Local comment to add to the selection (repeatable)
    #[arg(short, long)]
    comment: Vec<String>,

    /// Expand the comment list instead of showing the preview
    #[arg(long)]
    all_comments: bool,

    /// Print JSON instead of rendered HTML
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(feature = "mock-data")]
fn record_source(cfg: &AppConfig) -> anyhow::Result<Box<dyn RecordSource>> {
    Ok(Box::new(SampleRecordSource::new(cfg.mock.comment_seed)?))
}

#[cfg(not(feature = "mock-data"))]
fn record_source(_cfg: &AppConfig) -> anyhow::Result<Box<dyn RecordSource>> {
    anyhow::bail!("no record source compiled in; enable the `mock-data` feature")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Configuration drives logging, so it loads first
    let cfg = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(cfg.log_json);

    let session = cfg.session();
    let theme = cfg.theme();
    let ctx = FilterContext {
        current_user: session.display_name.clone(),
        friends: cfg.filters.friends.clone(),
        popular_threshold: cfg.filters.popular_threshold,
        history_cutoff: cfg.filters.history_cutoff,
    };

    // 2. Fetch and filter
    let source = record_source(&cfg)?;
    let records = source.fetch(cli.module).await?;
    let tab = cli
        .tab
        .clone()
        .unwrap_or_else(|| default_tab(cli.module).to_string());
    let shown = filter(&records, cli.module, &tab, &ctx);
    info!(
        module = %cli.module,
        tab = %tab,
        total = records.len(),
        shown = shown.len(),
        "list filtered"
    );

    // 3. Selection and local comments
    let mut selection =
        SelectionState::new(session.clone()).with_preview(cfg.ui.comment_preview);
    if let Some(id) = &cli.select {
        let record = source
            .find(cli.module, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Record".to_string(), id.clone()))?;
        selection.select(&record);
    }
    for text in &cli.comment {
        match selection.comment(text, &SystemClock) {
            Ok(comment) => info!(id = %comment.id, "comment added"),
            Err(err) => warn!(error = %err, "comment rejected"),
        }
    }
    if cli.all_comments {
        if let Some(log) = selection.comments_mut() {
            log.show_all();
        }
    }

    // 4. Render
    let normalizer = Normalizer::new(&session);
    if cli.json {
        let rows: Vec<_> = shown.iter().map(|r| normalizer.normalize(r)).collect();
        let comments = selection.comments().map(|log| log.list()).unwrap_or_default();
        let out = serde_json::json!({
            "module": cli.module,
            "tab": tab,
            "records": rows,
            "detail": selection.current_or_default(),
            "extras": selection.current_extras(),
            "comments": comments,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let list = ListTemplate::new(cli.module, &tab, &shown, &normalizer, &selection, &theme);
        println!("{}", list.render()?);
        println!("{}", DetailPanelTemplate::for_selection(&selection, &theme).render()?);
    }

    Ok(())
}
