use core::time::Duration;
use std::path::PathBuf;

use backon::ExponentialBuilder;
use compact_str::CompactString;

use crate::{error::RangeError, schema::Variant, sink::SinkMode};

macro_rules! env_or_default {
    ($name:expr, $default:expr) => {
        if let Some(s) = option_env!($name) {
            s
        } else {
            $default
        }
    };
}

/// First identifier the source does not cover.
pub const MAX_ID: u16 = 906;

pub const BASE_URL: &str = env_or_default!("POKEDEX_BASE_URL", "https://serebii.net");
pub const OUTPUT_FILE: &str = env_or_default!("POKEDEX_OUTPUT", "pokemon.json");
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(8);
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(750),
        }
    }
}

impl RetryPolicy {
    /// Doubling delays from `base_delay`, jittered, at most `retries` of them.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(MAX_RETRY_DELAY)
            .with_max_times(self.retries as usize)
            .with_jitter()
    }
}

/// Everything a run needs, passed explicitly into the runner.
#[derive(Debug, Clone)]
pub struct Config {
    pub variant: Variant,
    pub first: u16,
    pub last: u16,
    pub name: Option<CompactString>,
    pub save: bool,
    pub verbose: bool,
    pub output: PathBuf,
    pub sink_mode: SinkMode,
    pub base_url: String,
    pub jobs: usize,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub delay: Duration,
    pub fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Modern,
            first: 1,
            last: 1,
            name: None,
            save: false,
            verbose: false,
            output: PathBuf::from(OUTPUT_FILE),
            sink_mode: SinkMode::Overwrite,
            base_url: BASE_URL.to_owned(),
            jobs: 4,
            timeout: Duration::from_secs(20),
            retry: RetryPolicy::default(),
            delay: Duration::ZERO,
            fail_fast: false,
        }
    }
}

/// One page to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: u16,
    pub name: Option<CompactString>,
}

impl Config {
    /// Whether reports go to the console.
    pub const fn prints_reports(&self) -> bool {
        self.verbose || !self.save
    }

    /// The validated request list, in request order.
    pub fn targets(&self) -> Result<Vec<Target>, RangeError> {
        let (first, last) = validate_range(self.first, self.last)?;
        match &self.name {
            Some(name) if self.variant.supports_name() => {
                Ok(vec![Target { id: first, name: Some(name.clone()) }])
            }
            _ => Ok((first..=last).map(|id| Target { id, name: None }).collect()),
        }
    }
}

pub fn validate_range(first: u16, last: u16) -> Result<(u16, u16), RangeError> {
    if first == 0 {
        return Err(RangeError::Zero);
    }
    if let Some(bad) = [first, last].into_iter().find(|&id| id >= MAX_ID) {
        return Err(RangeError::TooLarge(bad));
    }
    Ok((first, last.max(first)))
}
