// src/config.rs

use anyhow::{bail, Context, Result};
use std::{env, fmt, path::PathBuf, time::Duration};
use url::Url;

use crate::output::{output_file_name, OutputFormat};

pub const API_KEY_VAR: &str = "CANDID_API_KEY";
pub const API_URL_VAR: &str = "CANDID_API_URL";
pub const INPUT_VAR: &str = "INPUT_CSV";
pub const OUTPUT_VAR: &str = "OUTPUT_CSV";
pub const DELAY_VAR: &str = "CANDID_REQUEST_DELAY_MS";
pub const TIMEOUT_VAR: &str = "CANDID_TIMEOUT_SECS";
pub const FORMAT_VAR: &str = "OUTPUT_FORMAT";

const DEFAULT_API_URL: &str = "https://api.candid.org/premier/v3";
const DEFAULT_INPUT: &str = "ein_list.csv";
const DEFAULT_OUTPUT: &str = "ein_output.csv";
const DEFAULT_DELAY_MS: u64 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one enrichment run.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: Url,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    /// Pause after every lookup attempt.
    pub request_delay: Duration,
    pub timeout: Duration,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key → value source.
    ///
    /// The API key is checked first so a missing credential fails before
    /// anything else is looked at.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match get(API_KEY_VAR) {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => bail!("{} not set; add it to the environment or .env file", API_KEY_VAR),
        };

        let raw_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(raw_url.trim())
            .with_context(|| format!("parsing {} value {:?}", API_URL_VAR, raw_url))?;
        if api_url.cannot_be_a_base() {
            bail!("{} must be an absolute base URL, got {:?}", API_URL_VAR, raw_url);
        }

        let input_path = get(INPUT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let output_path = get(OUTPUT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        output_file_name(&output_path).with_context(|| format!("invalid {}", OUTPUT_VAR))?;

        let output_format = match get(FORMAT_VAR) {
            Some(raw) => raw
                .parse::<OutputFormat>()
                .with_context(|| format!("invalid {}", FORMAT_VAR))?,
            None => OutputFormat::default(),
        };

        let request_delay =
            Duration::from_millis(parse_u64(&get, DELAY_VAR)?.unwrap_or(DEFAULT_DELAY_MS));
        let timeout =
            Duration::from_secs(parse_u64(&get, TIMEOUT_VAR)?.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api_key,
            api_url,
            input_path,
            output_path,
            output_format,
            request_delay,
            timeout,
        })
    }
}

fn parse_u64<F>(get: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, raw)),
        None => Ok(None),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("output_format", &self.output_format)
            .field("request_delay", &self.request_delay)
            .field("timeout", &self.timeout)
            .finish()
    }
}
