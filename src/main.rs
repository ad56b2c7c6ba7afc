use crate::config::{Backend, Config};
use crate::feed::{ApiFeedSource, FeedController, FeedError, FeedSource, FeedState};
use crate::filters::{BuildingQuery, RawParams, ReviewQuery};
use crate::responses::html_error_response;
use crate::router::handle;
use crate::state::AppState;
use crate::store::{MemoryStore, RestStore};
use astra::Server;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod feed;
mod filter_panel;
mod filters;
mod listing;
mod responses;
mod router;
mod state;
mod store;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "seof", about = "Room review feed server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Page through a running server's JSON list endpoint, printing one item per line.
    Crawl(CrawlArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Reviews,
    Buildings,
}

#[derive(clap::Args)]
struct CrawlArgs {
    kind: ListKind,
    #[arg(long, default_value = "http://127.0.0.1:3000", env = "SEOF_BASE_URL")]
    base_url: String,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    rent_type: Option<String>,
    #[arg(long, default_value_t = 20)]
    page_size: u32,
    #[arg(long, default_value_t = 10)]
    max_pages: u32,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(),
        Command::Crawl(args) => crawl(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn serve() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    let state = match &config.backend {
        Backend::Fixtures(path) => AppState::new(MemoryStore::from_fixture_file(path)?),
        Backend::Rest { url, anon_key } => {
            AppState::new(RestStore::new(url, anon_key.clone(), config.http_timeout)?)
        }
    };

    info!(addr = %config.bind, workers = config.max_workers, "starting server");
    let server = Server::bind(&config.bind).max_workers(config.max_workers);

    server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    })?;

    info!("server shut down cleanly");
    Ok(())
}

fn crawl(args: CrawlArgs) -> Result<(), Box<dyn Error>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let page_size = args.page_size.to_string();
    let mut pairs = vec![("limit", page_size.as_str())];
    for (key, value) in [("sort", &args.sort), ("q", &args.q), ("rentType", &args.rent_type)] {
        if let Some(value) = value {
            pairs.push((key, value.as_str()));
        }
    }
    let raw = RawParams::from_pairs(pairs);

    match args.kind {
        ListKind::Reviews => {
            let query = ReviewQuery::from_page_params(&raw);
            let source = ApiFeedSource::reviews(client, &args.base_url, &query);
            drain(source, query.limit, args.max_pages)?;
        }
        ListKind::Buildings => {
            let query = BuildingQuery::from_page_params(&raw);
            let source = ApiFeedSource::buildings(client, &args.base_url, &query);
            drain(source, query.limit, args.max_pages)?;
        }
    }
    Ok(())
}

/// Drive a feed the way a scrolling reader would, retrying a failed page once.
/// Once `max_pages` have been read the feed is detached, which ends the loop.
fn drain<S>(source: S, page_size: u32, max_pages: u32) -> Result<(), Box<dyn Error>>
where
    S: FeedSource,
    S::Item: Serialize,
{
    let mut feed = FeedController::bootstrap(source, page_size)?;
    let mut printed = 0;
    let mut pages = 1;

    loop {
        for item in &feed.items()[printed..] {
            println!("{}", serde_json::to_string(item)?);
        }
        printed = feed.items().len();

        if pages >= max_pages && feed.has_more() {
            info!(pages, next_offset = ?feed.next_offset(), "page limit reached");
            feed.detach();
        }
        if !feed.on_sentinel_visible() {
            break;
        }
        if let FeedState::Error(message) = feed.state() {
            warn!(offset = ?feed.next_offset(), "{message}, retrying");
            feed.retry();
        }
        if let FeedState::Error(message) = feed.state() {
            return Err(Box::new(FeedError::Network(message.clone())));
        }
        pages += 1;
    }

    let total = feed.total_count();
    let items = feed.into_items();
    info!(items = items.len(), total, "crawl finished");
    Ok(())
}
