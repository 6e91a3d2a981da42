//! DarkVoir - Element-targeting guidance engine.
//!
//! Main entry point for the demo CLI: loads a JSON page fixture into a
//! virtual document and drives the relevance and guide engines against
//! it.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use darkvoir::{guide_through, AppConfig};
use darkvoir_dom::VirtualDom;
use darkvoir_guide::GuideEngine;
use darkvoir_protocols::ScriptedPlanner;
use darkvoir_relevance::{render_for_prompt, DomAnalyzer};

mod cli;

use cli::{Cli, Commands};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

fn load_page(path: &Path) -> Result<Arc<VirtualDom>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(Arc::new(VirtualDom::from_json_str(&raw)?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Commands::Analyze { page, query, json } => analyze(&page, &query, json, config),
        Commands::Guide { page, steps, query } => run_guide(&page, &steps, &query, config).await,
    }
}

fn analyze(
    page: &Path,
    query: &str,
    json: bool,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let dom = load_page(page)?;
    let analyzer = DomAnalyzer::with_config(dom, config.relevance);

    let candidates = analyzer.analyze_for_query(query);
    info!(query, matches = candidates.len(), "analysis complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        let context = analyzer.page_structure();
        print!("{}", render_for_prompt(&context, &candidates));
    }
    Ok(())
}

async fn run_guide(
    page: &Path,
    steps: &Path,
    query: &str,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let dom = load_page(page)?;
    let analyzer = DomAnalyzer::with_config(dom.clone(), config.relevance);
    let engine = GuideEngine::with_config(dom.clone(), config.guide);
    let planner = ScriptedPlanner::from_json_str(&std::fs::read_to_string(steps)?)?;

    let total = guide_through(&analyzer, &engine, &planner, query).await?;
    info!(total, "guide session started");

    // Walk the whole session the way a user clicking Next would.
    let mut shown = 0;
    while engine.is_active() {
        match engine.history().last() {
            Some(entry) => {
                println!("[{}/{}] {}", entry.step_index + 1, total, entry.step.message)
            }
            None => warn!(index = engine.current_index(), "step left no history entry"),
        }
        shown = shown.max(engine.history().len());
        engine.next_step().await;
    }

    println!("Guide finished: {shown} of {total} steps shown.");
    Ok(())
}
