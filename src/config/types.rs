use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_REPOSITORY_COUNT: u32 = 100;
pub const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 200;
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub github: GithubConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Sent as `first` on the search query; GitHub caps it at 100.
    pub count: u32,
    /// Pause after every detail request, successful or not.
    pub rate_limit_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Explicit output file; a timestamped name under `dir` is used otherwise.
    pub path: Option<PathBuf>,
    pub display_records: bool,
}

/// Values coming from the command line or the environment. `None` keeps
/// whatever the defaults or the config file provided.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub count: Option<u32>,
    pub rate_limit_delay_ms: Option<u64>,
    pub output_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub no_display: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            github: GithubConfig::default(),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            count: DEFAULT_REPOSITORY_COUNT,
            rate_limit_delay_ms: DEFAULT_RATE_LIMIT_DELAY_MS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            path: None,
            display_records: true,
        }
    }
}
