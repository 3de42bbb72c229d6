use core::time::Duration;
use std::path::PathBuf;

use compact_str::CompactString;
use pdex::{
    config::{BASE_URL, Config, OUTPUT_FILE, RetryPolicy},
    schema::Variant,
    sink::SinkMode,
};

/// A Pokémon web scraper for Serebii.net
#[derive(clap::Parser)]
#[command(version)]
pub struct Args {
    /// save the output to JSON
    #[arg(short, long)]
    save: bool,
    /// the ID of the first Pokémon to retrieve
    #[arg(short, long, default_value_t = 1)]
    first: u16,
    /// the ID of the last Pokémon to retrieve
    #[arg(short, long, default_value_t = 1)]
    last: u16,
    /// print the Pokémon's statistics to console
    #[arg(short, long)]
    verbose: bool,
    /// look the Pokémon up by name (alt pages only)
    #[arg(short, long)]
    name: Option<String>,
    /// page layout to scrape
    #[arg(long, value_enum, default_value_t = Variant::Modern)]
    variant: Variant,
    /// where saved records go
    #[arg(short, long, value_name = "file", default_value = OUTPUT_FILE)]
    output: PathBuf,
    /// merge into an existing output file instead of overwriting it
    #[arg(long)]
    merge: bool,
    /// pages fetched concurrently
    #[arg(short, long, default_value_t = 4)]
    jobs: usize,
    /// retries of a failed fetch
    #[arg(long, default_value_t = 3)]
    retries: u32,
    /// request timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout: u64,
    /// milliseconds to wait after each fetch
    #[arg(long, default_value_t = 0)]
    delay: u64,
    /// stop at the first Pokémon that fails
    #[arg(long)]
    fail_fast: bool,
    /// site root the dex pages are fetched from
    #[arg(long, env = "POKEDEX_BASE_URL", default_value = BASE_URL)]
    base_url: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            variant: args.variant,
            first: args.first,
            last: args.last,
            name: args.name.map(CompactString::from),
            save: args.save,
            verbose: args.verbose,
            output: args.output,
            sink_mode: if args.merge { SinkMode::Merge } else { SinkMode::Overwrite },
            base_url: args.base_url,
            jobs: args.jobs,
            timeout: Duration::from_secs(args.timeout),
            retry: RetryPolicy { retries: args.retries, ..RetryPolicy::default() },
            delay: Duration::from_millis(args.delay),
            fail_fast: args.fail_fast,
        }
    }
}
