//! CLI command implementations.

use crate::input::{load_artifacts, load_resolve_input, load_scores};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use jarlink_core::{JarlinkConfig, MemorySink};
use jarlink_graph::{identify_libraries, FixedScores, NameGraph, NameSpreadScorer, ScoreTable};
use jarlink_resolve::{LibraryIndex, ProjectTable, RelationImporter, ResolutionContext};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message);
    Ok(spinner)
}

/// Initialize Jarlink in a directory.
pub fn init(path: &Path) -> Result<()> {
    let config_path = path.join(".jarlink").join("config.json");

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    JarlinkConfig::default().save(&config_path)?;

    println!("{} Initialized Jarlink in {}", "✓".green(), path.display());
    println!("  Run {} to identify libraries", "jarlink cluster <jars.json>".cyan());

    Ok(())
}

/// Cluster a jar corpus into libraries.
pub fn cluster(
    config_path: &Path,
    jars: &Path,
    scores: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let config = JarlinkConfig::load(config_path)?;
    debug!("Cluster settings: {:?}", config.cluster);
    let start = Instant::now();

    println!("{}", "Identifying libraries...".cyan());
    let spinner = spinner("Loading jars...")?;

    let graph = NameGraph::from_records(load_artifacts(jars)?)?;

    spinner.set_message("Computing scores...");
    let table = match scores {
        Some(path) => {
            let fixed = FixedScores::new(load_scores(path)?);
            ScoreTable::compute(&graph, &fixed, config.cluster.parallel)
        }
        None => ScoreTable::compute(&graph, &NameSpreadScorer, config.cluster.parallel),
    };

    spinner.set_message("Clustering...");
    let libraries = identify_libraries(&graph, &table, &config.cluster);

    spinner.finish_and_clear();

    let stats = libraries.stats();
    let graph_stats = graph.stats();
    println!(
        "{} {} libraries from {} jars ({} names) in {}ms",
        "✓".green(),
        stats.libraries.to_string().cyan(),
        graph_stats.artifact_count.to_string().cyan(),
        graph_stats.name_count,
        start.elapsed().as_millis()
    );
    println!(
        "  {} components, {} jars shared between libraries",
        stats.components, stats.shared_artifacts
    );

    let mut sink = MemorySink::new();
    libraries.write_to(&graph, &mut sink)?;

    for library in sink.libraries.iter().take(10) {
        println!(
            "  {} {} {}",
            format!("L{}", library.id).yellow(),
            library.artifacts.join(", "),
            format!("({} names)", library.seeds.len()).dimmed()
        );
    }
    if sink.libraries.len() > 10 {
        println!("  ... and {} more", sink.libraries.len() - 10);
    }

    if let Some(out_path) = output {
        let export = serde_json::json!({
            "version": "1.0",
            "stats": stats,
            "libraries": sink.libraries,
        });
        fs::write(out_path, serde_json::to_string_pretty(&export)?)?;
        println!("{} Exported to {}", "✓".green(), out_path.display());
    }

    Ok(())
}

/// Resolve a project's relations.
pub fn resolve(config_path: &Path, input: &Path, output: Option<&Path>) -> Result<()> {
    let config = JarlinkConfig::load(config_path)?;
    debug!("Resolve settings: {:?}", config.resolve);
    let input = load_resolve_input(input)?;

    println!("{}", "Resolving relations...".cyan());
    let spinner = spinner("Building tables...")?;

    let library = Arc::new(LibraryIndex::new(input.library));
    let project = ProjectTable::new(input.project);
    let ctx = ResolutionContext::from_config(project, library, &config.resolve);

    spinner.set_message("Resolving endpoints...");
    let mut sink = MemorySink::new();
    let summary = RelationImporter::from_config(&ctx, &config.resolve)
        .import(&input.relations, &mut sink)?;
    let unknowns = ctx.write_unknowns(&mut sink)?;

    spinner.finish_and_clear();

    println!(
        "{} Accepted {} of {} relations",
        "✓".green(),
        summary.accepted.to_string().cyan(),
        summary.total()
    );
    if summary.rejected > 0 {
        println!(
            "{} {} relations rejected (source not defined by the project)",
            "⚠".yellow(),
            summary.rejected
        );
    }
    println!("  {} unknown entities synthesized", unknowns);

    if let Some(out_path) = output {
        let export = serde_json::json!({
            "version": "1.0",
            "summary": summary,
            "relations": sink.relations,
            "unknowns": sink.entities,
        });
        fs::write(out_path, serde_json::to_string_pretty(&export)?)?;
        println!("{} Exported to {}", "✓".green(), out_path.display());
    }

    Ok(())
}
