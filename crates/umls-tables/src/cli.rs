use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use umls_closure::{
    BuildConfig, ClientConfig, EmitConfig, PageMode, TableFormat, TablePaths, WalkConfig,
    DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};

/// Pagination behavior for atom and descendant listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageModeArg {
    /// Read only the first page of every listing
    First,
    /// Follow the page count and read every page
    All,
}

impl From<PageModeArg> for PageMode {
    fn from(arg: PageModeArg) -> Self {
        match arg {
            PageModeArg::First => PageMode::FirstPage,
            PageModeArg::All => PageMode::AllPages,
        }
    }
}

/// Field delimiter of the output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Comma separated
    Csv,
    /// Tab separated
    Tsv,
    /// Bar separated
    Bsv,
}

impl From<FormatArg> for TableFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => TableFormat::Csv,
            FormatArg::Tsv => TableFormat::Tsv,
            FormatArg::Bsv => TableFormat::Bsv,
        }
    }
}

/// umls-tables: build CUI name and synonym tables from root CUIs
#[derive(Parser, Debug)]
#[command(name = "umls-tables")]
#[command(about = "Collect UMLS descendants of root CUIs and write name and synonym tables", long_about = None)]
pub struct Cli {
    /// UMLS API key
    #[arg(long, env = "UMLS_API_KEY", hide_env_values = true)]
    pub umls_api_key: String,

    /// UTS REST base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory containing the root CUIs file
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Directory receiving the output tables
    #[arg(long, default_value = ".")]
    pub target_dir: PathBuf,

    /// File listing the CUIs whose descendants and synonyms are wanted
    #[arg(long, default_value = "RootCuis.txt")]
    pub root_cui_fn: String,

    /// Destination file for CUI names
    #[arg(long, default_value = "CuiNames.csv")]
    pub cui_name_fn: String,

    /// Destination file for CUI synonyms
    #[arg(long, default_value = "CuiSynonyms.csv")]
    pub cui_synonym_fn: String,

    /// Results requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Lowercase synonyms before deduplication
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub lowercase_synonyms: bool,

    /// How many pages of each listing to read
    #[arg(long, value_enum, default_value_t = PageModeArg::All)]
    pub pages: PageModeArg,

    /// Maximum concurrent lookups
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Output table format
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.umls_api_key.clone(),
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        }
    }

    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            paths: TablePaths {
                source_dir: self.source_dir.clone(),
                target_dir: self.target_dir.clone(),
                root_cui_file: self.root_cui_fn.clone(),
                cui_name_file: self.cui_name_fn.clone(),
                cui_synonym_file: self.cui_synonym_fn.clone(),
            },
            walk: WalkConfig {
                page_mode: self.pages.into(),
                concurrency: self.concurrency,
            },
            emit: EmitConfig {
                lowercase_synonyms: self.lowercase_synonyms,
                format: self.format.into(),
                concurrency: self.concurrency,
            },
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["umls-tables", "--umls-api-key", "k"]).unwrap();
        assert_eq!(cli.umls_api_key, "k");
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.source_dir, PathBuf::from("."));
        assert_eq!(cli.root_cui_fn, "RootCuis.txt");
        assert_eq!(cli.cui_name_fn, "CuiNames.csv");
        assert_eq!(cli.cui_synonym_fn, "CuiSynonyms.csv");
        assert_eq!(cli.page_size, 1_000);
        assert!(cli.lowercase_synonyms);
        assert_eq!(cli.pages, PageModeArg::All);
        assert_eq!(cli.format, FormatArg::Csv);
        assert_eq!(cli.deadline(), None);
    }

    #[test]
    fn test_lowercase_can_be_disabled() {
        let cli = Cli::try_parse_from([
            "umls-tables",
            "--umls-api-key",
            "k",
            "--lowercase-synonyms",
            "false",
        ])
        .unwrap();
        assert!(!cli.lowercase_synonyms);
        assert!(!cli.build_config().emit.lowercase_synonyms);
    }

    #[test]
    fn test_build_config_mapping() {
        let cli = Cli::try_parse_from([
            "umls-tables",
            "--umls-api-key",
            "k",
            "--source-dir",
            "/data/in",
            "--target-dir",
            "/data/out",
            "--pages",
            "first",
            "--format",
            "bsv",
            "--concurrency",
            "1",
            "--deadline-secs",
            "30",
        ])
        .unwrap();

        let config = cli.build_config();
        assert_eq!(config.paths.root_cui_path(), PathBuf::from("/data/in/RootCuis.txt"));
        assert_eq!(config.paths.cui_name_path(), PathBuf::from("/data/out/CuiNames.csv"));
        assert_eq!(config.walk.page_mode, PageMode::FirstPage);
        assert_eq!(config.walk.concurrency, 1);
        assert_eq!(config.emit.format, TableFormat::Bsv);
        assert_eq!(cli.deadline(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_client_config_mapping() {
        let cli = Cli::try_parse_from([
            "umls-tables",
            "--umls-api-key",
            "k",
            "--page-size",
            "25",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let config = cli.client_config();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.language, "ENG");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
