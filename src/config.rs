// src/config.rs
// =============================================================================
// Job configuration.
//
// Every job starts from its platform's built-in defaults. An optional TOML
// file can override any field, and command-line flags override both:
//
//   defaults  <-  --config file.toml  <-  CLI flags
//
// The resulting JobConfig is validated once, before the seed list is read.
// =============================================================================

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::extract::{
    Extractor, PdfLinks, ViewerResources, ViewerTemplates, ARTICLE_ID_PLACEHOLDER,
    PAGE_ID_PLACEHOLDER, PICTURE_ID_PLACEHOLDER,
};
use crate::fetch::DispatchOptions;

/// Shared connection cap for both platforms.
pub const DEFAULT_MAX_CONNECTIONS: usize = 50;

/// Which site's rule set a job uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// DSpace archive record pages -> PDF links
    PdfLinks,
    /// Issue-viewer pages -> images, pages, article and picture endpoints
    ViewerResources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },

    #[error("base URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("max_connections must be at least 1")]
    ZeroConnections,

    #[error("{field} '{template}' does not contain {placeholder}")]
    MissingPlaceholder {
        field: &'static str,
        template: String,
        placeholder: &'static str,
    },
}

/// Everything one batch run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub platform: Platform,
    /// Seed list, one URL per line
    pub input: PathBuf,
    /// Output seed list, overwritten on every run
    pub output: PathBuf,
    /// Prefix for site-relative paths found in markup
    pub base_url: String,
    pub max_connections: usize,
    pub launch_delay: Duration,
    /// Per-request timeout; None waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Only used by the viewer platform
    pub templates: ViewerTemplates,
}

impl JobConfig {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::PdfLinks => Self {
                platform,
                input: PathBuf::from("elar-uspu-ru.dspace.urls"),
                output: PathBuf::from("pdf_urls.txt"),
                base_url: "http://elar.uspu.ru".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                launch_delay: Duration::ZERO,
                request_timeout: None,
                templates: ViewerTemplates::default(),
            },
            Platform::ViewerResources => Self {
                platform,
                input: PathBuf::from("numbers.urls"),
                output: PathBuf::from("resource_urls.txt"),
                base_url: "https://libraria.ua".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                launch_delay: Duration::from_millis(100),
                request_timeout: None,
                templates: ViewerTemplates::default(),
            },
        }
    }

    /// Applies every field that is set in `overrides`.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(max_connections) = overrides.max_connections {
            self.max_connections = max_connections;
        }
        if let Some(ms) = overrides.launch_delay_ms {
            self.launch_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(page) = overrides.page_template {
            self.templates.page = page;
        }
        if let Some(article) = overrides.article_template {
            self.templates.article = article;
        }
        if let Some(picture) = overrides.picture_template {
            self.templates.picture = picture;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(self.base_url.clone()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }

        if self.platform == Platform::ViewerResources {
            check_placeholder("page_template", &self.templates.page, PAGE_ID_PLACEHOLDER)?;
            check_placeholder("article_template", &self.templates.article, ARTICLE_ID_PLACEHOLDER)?;
            check_placeholder("picture_template", &self.templates.picture, PICTURE_ID_PLACEHOLDER)?;
        }

        Ok(())
    }

    /// Builds the rule set for this job's platform.
    pub fn extractor(&self) -> Box<dyn Extractor> {
        match self.platform {
            Platform::PdfLinks => Box::new(PdfLinks::new(self.base_url.clone())),
            Platform::ViewerResources => Box::new(ViewerResources::new(
                self.base_url.clone(),
                self.templates.clone(),
            )),
        }
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            max_connections: self.max_connections,
            launch_delay: self.launch_delay,
        }
    }
}

fn check_placeholder(
    field: &'static str,
    template: &str,
    placeholder: &'static str,
) -> Result<(), ConfigError> {
    if template.contains(placeholder) {
        Ok(())
    } else {
        Err(ConfigError::MissingPlaceholder {
            field,
            template: template.to_string(),
            placeholder,
        })
    }
}

/// Optional values layered over the platform defaults.
///
/// Deserialized from the `--config` TOML file and also built from CLI flags.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub max_connections: Option<usize>,
    pub launch_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub page_template: Option<String>,
    pub article_template: Option<String>,
    pub picture_template: Option<String>,
}

impl ConfigOverrides {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&data)?)
    }
}
