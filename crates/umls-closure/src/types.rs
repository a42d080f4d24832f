//! Error, configuration and statistics types for closure runs.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use umls_types::well_known;

/// Errors that can occur while building the closure tables.
#[derive(Error, Debug)]
pub enum ClosureError {
    /// Non-success HTTP status or transport failure.
    #[error("Remote service error for {url}{}: {message}", status_suffix(.status))]
    RemoteService {
        /// The URL that failed (API key stripped).
        url: String,
        /// HTTP status, if a response was received.
        status: Option<u16>,
        /// What went wrong.
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Unexpected response schema from {url}: {message}")]
    Schema {
        /// The URL whose response was malformed.
        url: String,
        /// What was missing or invalid.
        message: String,
    },

    /// Seed file not found.
    #[error("Seed file not found: {path}")]
    InputNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Seed file could not be read.
    #[error("Cannot read seed file {path}: {source}")]
    Input {
        /// The seed file path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error on an output table.
    #[error("IO error writing table: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error.
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// The run was cancelled or hit its deadline.
    #[error("Run cancelled")]
    Cancelled,
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

/// Result type for closure operations.
pub type ClosureResult<T> = Result<T, ClosureError>;

/// Default UTS REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://uts-ws.nlm.nih.gov/rest";

/// Default number of results requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 1_000;

/// Default number of concurrent lookups.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How many pages of a paginated listing to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    /// Read the first page only. Results beyond `page_size` are dropped.
    FirstPage,
    /// Follow `pageCount` and read every page.
    #[default]
    AllPages,
}

/// Configuration for the UTS HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// UTS API key.
    pub api_key: String,
    /// REST base URL, without trailing slash.
    pub base_url: String,
    /// Results per page.
    pub page_size: u32,
    /// Atom language filter.
    pub language: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            language: well_known::LANGUAGE_ENGLISH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Creates a config for the public UTS endpoint with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Checks the values the service would reject or we cannot use.
    pub fn validate(&self) -> ClosureResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ClosureError::InvalidConfig {
                message: "API key is empty".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ClosureError::InvalidConfig {
                message: "page size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for the closure walk.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Pagination behavior for atom and descendant listings.
    pub page_mode: PageMode,
    /// Maximum number of seeds expanded at once.
    pub concurrency: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            page_mode: PageMode::AllPages,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl WalkConfig {
    /// One seed at a time, first page only.
    pub fn sequential_first_page() -> Self {
        Self {
            page_mode: PageMode::FirstPage,
            concurrency: 1,
        }
    }
}

/// Field delimiter of the output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Comma separated.
    #[default]
    Csv,
    /// Tab separated.
    Tsv,
    /// Bar (`|`) separated.
    Bsv,
}

impl TableFormat {
    /// Returns the delimiter byte.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
            Self::Bsv => b'|',
        }
    }
}

/// Configuration for the table emitter.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Lowercase synonyms before deduplication.
    pub lowercase_synonyms: bool,
    /// Output delimiter.
    pub format: TableFormat,
    /// Maximum number of concept lookups in flight.
    pub concurrency: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            lowercase_synonyms: true,
            format: TableFormat::Csv,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Input and output locations of a run.
#[derive(Debug, Clone)]
pub struct TablePaths {
    /// Directory holding the seed file.
    pub source_dir: PathBuf,
    /// Directory receiving the output tables.
    pub target_dir: PathBuf,
    /// Seed file name.
    pub root_cui_file: String,
    /// Name table file name.
    pub cui_name_file: String,
    /// Synonym table file name.
    pub cui_synonym_file: String,
}

impl Default for TablePaths {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            target_dir: PathBuf::from("."),
            root_cui_file: "RootCuis.txt".to_string(),
            cui_name_file: "CuiNames.csv".to_string(),
            cui_synonym_file: "CuiSynonyms.csv".to_string(),
        }
    }
}

impl TablePaths {
    /// Full path of the seed file.
    pub fn root_cui_path(&self) -> PathBuf {
        self.source_dir.join(&self.root_cui_file)
    }

    /// Full path of the name table.
    pub fn cui_name_path(&self) -> PathBuf {
        self.target_dir.join(&self.cui_name_file)
    }

    /// Full path of the synonym table.
    pub fn cui_synonym_path(&self) -> PathBuf {
        self.target_dir.join(&self.cui_synonym_file)
    }
}

/// Statistics from one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Distinct seeds read.
    pub seed_count: usize,
    /// Size of the final closure.
    pub closure_size: usize,
    /// Rows written to the name table.
    pub name_rows: usize,
    /// Rows written to the synonym table.
    pub synonym_rows: usize,
    /// Atom listings fetched from the service.
    pub atom_fetches: usize,
    /// Descendant listings fetched from the service.
    pub descendant_fetches: usize,
    /// Wall time in milliseconds.
    pub elapsed_ms: u64,
}

impl RunStats {
    /// Average synonyms per concept.
    pub fn synonyms_per_concept(&self) -> f64 {
        if self.name_rows == 0 {
            0.0
        } else {
            self.synonym_rows as f64 / self.name_rows as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 1_000);
        assert_eq!(config.language, "ENG");
    }

    #[test]
    fn test_client_config_validate() {
        assert!(ClientConfig::default().validate().is_err());
        assert!(ClientConfig::with_api_key("key").validate().is_ok());

        let zero_page = ClientConfig {
            page_size: 0,
            ..ClientConfig::with_api_key("key")
        };
        assert!(matches!(
            zero_page.validate(),
            Err(ClosureError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_table_paths_default() {
        let paths = TablePaths {
            target_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(paths.root_cui_path(), PathBuf::from("./RootCuis.txt"));
        assert_eq!(paths.cui_name_path(), PathBuf::from("out/CuiNames.csv"));
        assert_eq!(paths.cui_synonym_path(), PathBuf::from("out/CuiSynonyms.csv"));
    }

    #[test]
    fn test_table_format_delimiters() {
        assert_eq!(TableFormat::Csv.delimiter(), b',');
        assert_eq!(TableFormat::Tsv.delimiter(), b'\t');
        assert_eq!(TableFormat::Bsv.delimiter(), b'|');
    }

    #[test]
    fn test_remote_error_display() {
        let err = ClosureError::RemoteService {
            url: "https://example.org/x".to_string(),
            status: Some(500),
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Remote service error for https://example.org/x (HTTP 500): Internal Server Error"
        );
    }

    #[test]
    fn test_run_stats_ratio() {
        let stats = RunStats {
            name_rows: 4,
            synonym_rows: 10,
            ..Default::default()
        };
        assert!((stats.synonyms_per_concept() - 2.5).abs() < 0.001);
        assert_eq!(RunStats::default().synonyms_per_concept(), 0.0);
    }
}
