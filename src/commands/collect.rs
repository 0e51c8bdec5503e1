//! `fetch` and `run` command handlers.

use anyhow::{Context, Result, bail};
use auto_fiddler::{FetchEngine, FetchReport, HttpClient, Pipeline, load_site_list};
use tracing::{info, warn};

use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::app::exit_handler::determine_exit_outcome;
use crate::cli::SourceArgs;

/// Collects source page URLs from positional arguments and the site list.
pub(crate) fn resolve_sources(args: &SourceArgs) -> Result<Vec<String>> {
    let mut sources = args.urls.clone();

    if let Some(sites_path) = &args.sites {
        let list = load_site_list(sites_path)
            .with_context(|| format!("Failed to load site list '{}'", sites_path.display()))?;
        let urls = match &args.category {
            Some(name) => list.category(name).with_context(|| {
                format!(
                    "Unknown category '{name}' in site list (available: {})",
                    list.categories().collect::<Vec<_>>().join(", ")
                )
            })?,
            None => {
                let Some((name, urls)) = list.first() else {
                    bail!("Site list '{}' has no categories", sites_path.display());
                };
                info!(category = name, "using first site list category");
                urls
            }
        };
        sources.extend(urls.iter().cloned());
    }

    Ok(sources)
}

fn build_pipeline(settings: &Settings) -> Result<Pipeline> {
    let client =
        HttpClient::new_with_timeouts(settings.connect_timeout_secs, settings.request_timeout_secs);
    let engine = FetchEngine::new(usize::from(settings.concurrency))?;
    Ok(Pipeline::new(client, engine, settings.output_dir.clone()))
}

fn fetch_summary_lines(sources: &[String], reports: &[FetchReport], verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (source, report) in sources.iter().zip(reports) {
        lines.push(format!(
            "{source}: {} downloaded, {} failed",
            report.completed(),
            report.failed()
        ));
        if verbose {
            for path in report.saved_paths() {
                lines.push(format!("  saved: {}", path.display()));
            }
        }
        for url in report.failed_urls() {
            lines.push(format!("  failed: {url}"));
        }
    }
    lines
}

fn print_fetch_summary(
    sources: &[String],
    reports: &[FetchReport],
    settings: &Settings,
) -> (usize, usize) {
    for line in fetch_summary_lines(sources, reports, settings.verbose > 0) {
        println!("{line}");
    }
    let completed = reports.iter().map(FetchReport::completed).sum();
    let failed = reports.iter().map(FetchReport::failed).sum();
    (completed, failed)
}

pub(crate) async fn run_fetch_command(args: &SourceArgs, settings: &Settings) -> Result<ProcessExit> {
    let sources = resolve_sources(args)?;
    if sources.is_empty() {
        warn!("no source pages to scrape");
        return Ok(ProcessExit::Success);
    }

    let pipeline = build_pipeline(settings)?;
    let reports = pipeline.fetch(&sources, &settings.extension).await?;
    let (completed, failed) = print_fetch_summary(&sources, &reports, settings);

    Ok(determine_exit_outcome(completed, failed))
}

pub(crate) async fn run_pipeline_command(
    args: &SourceArgs,
    settings: &Settings,
) -> Result<ProcessExit> {
    let sources = resolve_sources(args)?;
    if sources.is_empty() {
        warn!("no source pages to scrape");
        return Ok(ProcessExit::Success);
    }

    let pipeline = build_pipeline(settings)?;
    let report = pipeline.run(&sources, &settings.extension).await?;
    let (completed, failed) = print_fetch_summary(&sources, &report.fetch, settings);
    println!("duplicates removed: {}", report.duplicates_removed);
    super::print_classify_summary(&report.classified);

    Ok(determine_exit_outcome(completed, failed))
}
