use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};

/// Public dataset the explorer visualizes.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/boluwarinayinmode/Utxo-JS/main/database/transformed_data2.json";

/// Month/day/year without zero padding, the way a US-locale browser prints dates.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Where the transaction document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Fetched once over HTTP.
    Remote(String),
    /// Read once from disk, same document shape as the remote one.
    File(PathBuf),
}

/// Parameters of the year -> transaction count mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min_year: i32,
    pub max_year: i32,
    pub base_year: i32,
    pub base_count: i64,
    pub increment_per_year: i64,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min_year: 2018,
            max_year: 2023,
            base_year: 2018,
            base_count: 1000,
            increment_per_year: 2000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dataset: DatasetSource,
    pub static_path: PathBuf,
    pub years: YearRange,
    pub date_format: String,
    pub fetch_timeout: Duration,
    /// Participant count above which the dense matrix is logged as oversized.
    pub max_participants: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 7070,
            dataset: DatasetSource::Remote(DEFAULT_DATASET_URL.into()),
            static_path: PathBuf::from("static"),
            years: YearRange::default(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            fetch_timeout: Duration::from_secs(30),
            max_participants: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let dataset = match env::var("EXPLORER_DATASET_PATH") {
            Ok(path) if !path.is_empty() => DatasetSource::File(PathBuf::from(path)),
            _ => DatasetSource::Remote(
                env::var("EXPLORER_DATASET_URL").unwrap_or_else(|_| DEFAULT_DATASET_URL.into()),
            ),
        };

        let mut years = YearRange {
            min_year: env_parse("EXPLORER_MIN_YEAR", defaults.years.min_year),
            max_year: env_parse("EXPLORER_MAX_YEAR", defaults.years.max_year),
            base_year: env_parse("EXPLORER_BASE_YEAR", defaults.years.base_year),
            base_count: env_parse("EXPLORER_BASE_COUNT", defaults.years.base_count),
            increment_per_year: env_parse(
                "EXPLORER_INCREMENT_PER_YEAR",
                defaults.years.increment_per_year,
            ),
        };
        if years.min_year > years.max_year {
            tracing::warn!(
                min_year = years.min_year,
                max_year = years.max_year,
                "EXPLORER_MIN_YEAR is after EXPLORER_MAX_YEAR, swapping"
            );
            std::mem::swap(&mut years.min_year, &mut years.max_year);
        }

        let date_format = match env::var("EXPLORER_DATE_FORMAT") {
            Ok(fmt) if is_valid_date_format(&fmt) => fmt,
            Ok(fmt) => {
                tracing::warn!(format = %fmt, "Invalid EXPLORER_DATE_FORMAT, using default");
                defaults.date_format
            }
            Err(_) => defaults.date_format,
        };

        Self {
            host: env::var("EXPLORER_HOST").unwrap_or(defaults.host),
            port: env_parse("EXPLORER_PORT", defaults.port),
            dataset,
            static_path: env::var("EXPLORER_STATIC_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_path),
            years,
            date_format,
            fetch_timeout: Duration::from_secs(env_parse(
                "EXPLORER_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )),
            max_participants: env_parse("EXPLORER_MAX_PARTICIPANTS", defaults.max_participants),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Rejects strftime strings chrono would fail on while formatting.
pub fn is_valid_date_format(fmt: &str) -> bool {
    !fmt.is_empty() && StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}
