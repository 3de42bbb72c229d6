use std::{io::Write, path::PathBuf};

use futures_util::{StreamExt, stream};
use reqwest::Client;
use scraper::Html;

use crate::{
    config::{Config, Target},
    error::ScrapeError,
    extract::Extractor,
    locator::build_url,
    record::Record,
    report::Report,
    scrape, sink,
};

#[derive(Debug)]
pub struct Outcome {
    pub target: Target,
    pub url: String,
    pub result: Result<Record, ScrapeError>,
}

#[derive(Debug)]
pub struct Summary {
    pub requested: usize,
    pub outcomes: Vec<Outcome>,
    pub saved: Option<PathBuf>,
}

impl Summary {
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Outcome, &ScrapeError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    pub fn succeeded(&self) -> usize {
        self.records().count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }
}

struct Context<'a> {
    config: &'a Config,
    client: Client,
    extractor: Extractor,
}

async fn work(target: Target, ctx: &Context<'_>) -> Outcome {
    let config = ctx.config;
    let url = build_url(&config.base_url, target.id, config.variant, target.name.as_deref());
    tracing::debug!(target: "worker", "[#{}] fetching {url}", target.id);

    let result = match scrape::fetch(&ctx.client, &url, &config.retry).await {
        Ok(body) => {
            let known_id = target.name.is_none().then_some(target.id);
            ctx.extractor.extract(&Html::parse_document(&body), known_id)
        }
        Err(e) => Err(e),
    };
    if !config.delay.is_zero() {
        tokio::time::sleep(config.delay).await;
    }

    Outcome { target, url, result }
}

/// Scrapes every target of `config`. Pages are fetched and parsed
/// concurrently, but outcomes are consumed in request order, and this
/// function is the only writer of both `out` and the output file.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<Summary> {
    let targets = config.targets()?;
    let requested = targets.len();

    let ctx = Context {
        config,
        client: scrape::basic(config.timeout)?,
        extractor: Extractor::new(config.variant)?,
    };

    let mut outcomes = Vec::with_capacity(requested);
    let mut results = stream::iter(targets)
        .map(|target| work(target, &ctx))
        .buffered(config.jobs.max(1));

    while let Some(outcome) = results.next().await {
        let stop = match &outcome.result {
            Ok(record) => {
                tracing::info!(target: "worker", "\x1b[36mscraped\x1b[0m {} {}", record.number, record.name);
                if config.prints_reports() {
                    write!(out, "{}", Report(record))?;
                }
                false
            }
            Err(e) => {
                tracing::error!(target: "worker", "\x1b[31m[#{}] {}: {e}\x1b[0m", outcome.target.id, outcome.url);
                config.fail_fast
            }
        };
        outcomes.push(outcome);
        if stop {
            anyhow::bail!("aborting after the first failure");
        }
    }

    let mut summary = Summary { requested, outcomes, saved: None };

    if config.save {
        let records = summary.records().cloned().collect::<Vec<_>>();
        let total = sink::save(&records, &config.output, config.sink_mode)?;
        tracing::info!(target: "sink", "saved {} records ({total} in file) to {}", records.len(), config.output.display());
        summary.saved = Some(config.output.clone());
    } else {
        tracing::info!(target: "main", "all records retrieved! To save to JSON, use the --save flag");
    }

    Ok(summary)
}
