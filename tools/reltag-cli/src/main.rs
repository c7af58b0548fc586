//! Reltag command-line front end.
//!
//! Reads release names line by line from stdin and prints one JSON object
//! per line, searches catalog feeds, and watches a loader status document
//! and its SFDL queue.

mod watch;

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reltag_core::{
    AnalyzerConfig, Catalog, Classification, LookupQuery, QualityScore, ReleaseAnalyzer,
    ScoringProfile, SearchConfig, Tag,
};
use serde::Serialize;
use tracing::info;

use crate::watch::{QueueWatch, StatusSource};

/// CLI arguments
#[derive(Parser)]
#[command(name = "reltag")]
#[command(about = "Tag, score and classify scene release names")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scoring profile JSON file
    #[arg(long, env = "RELTAG_PROFILE", global = true)]
    profile: Option<PathBuf>,

    /// WEBRip bonus, overrides the profile
    #[arg(long, env = "RELTAG_WEB_RIP_BONUS", global = true)]
    web_rip_bonus: Option<f64>,

    /// Minimum search term length
    #[arg(long, env = "RELTAG_MIN_QUERY_LEN", global = true)]
    min_query_len: Option<usize>,

    /// Link template for movie uploads, `{tid}` is replaced by the thread id
    #[arg(long, env = "RELTAG_THREAD_URL", global = true)]
    thread_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print tags and score for each release name on stdin
    Tags,
    /// Classify each search title on stdin
    Classify,
    /// Clean each release name on stdin into a metadata lookup query
    Lookup,
    /// Search the series and movie feeds
    Search {
        /// Series feed JSON file
        #[arg(long, env = "RELTAG_SERIES_FEED")]
        series: PathBuf,

        /// Movie feed JSON file
        #[arg(long, env = "RELTAG_MOVIES_FEED")]
        movies: PathBuf,

        /// Search term
        term: String,
    },
    /// Poll a loader status document and print a report on every change
    Watch {
        /// Status file path or http(s) URL
        #[arg(short, long, env = "RELTAG_STATUS_SOURCE")]
        source: String,

        /// Poll interval in milliseconds
        #[arg(long, env = "RELTAG_INTERVAL_MS", default_value_t = 1000)]
        interval_ms: u64,

        /// SFDL queue listing (files.json) path or http(s) URL
        #[arg(long, env = "RELTAG_QUEUE_SOURCE")]
        queue: Option<String>,

        /// Queue poll interval in milliseconds
        #[arg(long, env = "RELTAG_QUEUE_INTERVAL_MS", default_value_t = 5000)]
        queue_interval_ms: u64,

        /// Exit after the first report
        #[arg(long)]
        once: bool,
    },
    /// Print the SFDL queue listing with tags and scores
    Queue {
        /// Queue listing (files.json) path or http(s) URL
        #[arg(short, long, env = "RELTAG_QUEUE_SOURCE")]
        source: String,
    },
}

#[derive(Debug, Serialize)]
struct TagsOutput {
    input: String,
    tags: Vec<Tag>,
    score: QualityScore,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    input: String,
    #[serde(flatten)]
    classification: Classification,
}

#[derive(Debug, Serialize)]
struct LookupOutput {
    input: String,
    #[serde(flatten)]
    query: LookupQuery,
}

impl Cli {
    fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut scoring = match &self.profile {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read profile {}", path.display()))?;
                ScoringProfile::from_json(&raw)
                    .with_context(|| format!("Invalid profile {}", path.display()))?
            }
            None => ScoringProfile::default(),
        };
        if let Some(bonus) = self.web_rip_bonus {
            scoring = scoring.with_web_rip_bonus(bonus);
        }

        let mut search = SearchConfig::default();
        if let Some(len) = self.min_query_len {
            search = search.with_min_query_len(len);
        }
        if let Some(template) = &self.thread_url {
            search = search.with_thread_url_template(template.clone());
        }

        Ok(AnalyzerConfig::new()
            .with_scoring(scoring)
            .with_search(search))
    }
}

/// Runs `f` on every non-blank stdin line and prints its result as JSON.
fn for_each_line<T, F>(mut f: F) -> Result<()>
where
    T: Serialize,
    F: FnMut(&str) -> T,
{
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        println!("{}", serde_json::to_string(&f(line))?);
    }
    Ok(())
}

fn read_catalog(series: &Path, movies: &Path) -> Result<Catalog> {
    let series_raw = std::fs::read_to_string(series)
        .with_context(|| format!("Failed to read series feed {}", series.display()))?;
    let movies_raw = std::fs::read_to_string(movies)
        .with_context(|| format!("Failed to read movie feed {}", movies.display()))?;
    Catalog::from_json(&series_raw, &movies_raw).context("Failed to decode catalog feeds")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let analyzer = ReleaseAnalyzer::new(cli.analyzer_config()?)
        .context("Failed to initialize analyzer")?;

    match cli.command {
        Commands::Tags => for_each_line(|input| TagsOutput {
            input: input.to_string(),
            tags: analyzer.tags(input),
            score: analyzer.score(input),
        })?,
        Commands::Classify => for_each_line(|input| ClassifyOutput {
            input: input.to_string(),
            classification: analyzer.classify(input),
        })?,
        Commands::Lookup => for_each_line(|input| LookupOutput {
            input: input.to_string(),
            query: analyzer.lookup(input),
        })?,
        Commands::Search {
            series,
            movies,
            term,
        } => {
            let catalog = read_catalog(&series, &movies)?;
            info!(
                series = catalog.series.len(),
                movies = catalog.movies.len(),
                "Catalog loaded"
            );
            for card in analyzer.search(&catalog, &term)? {
                println!("{}", serde_json::to_string(&card)?);
            }
        }
        Commands::Watch {
            source,
            interval_ms,
            queue,
            queue_interval_ms,
            once,
        } => {
            let period = Duration::from_millis(interval_ms.max(1));
            let queue = queue.map(|raw| QueueWatch {
                source: StatusSource::parse(&raw),
                period: Duration::from_millis(queue_interval_ms.max(1)),
            });
            watch::run(&analyzer, StatusSource::parse(&source), period, queue, once).await?;
        }
        Commands::Queue { source } => {
            watch::print_queue(&analyzer, StatusSource::parse(&source)).await?;
        }
    }

    Ok(())
}
