use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::TranslationError;
use crate::fs::atomic_write;
use crate::paths;
use crate::translation::{
    Backend, BingCredentials, Credentials, Gateway, GoogleCredentials, normalize_source,
};

/// Environment variable consulted for the Google key when none is configured.
pub const DEFAULT_GOOGLE_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";
/// Environment variable consulted for the Microsoft Translator key when none is configured.
pub const DEFAULT_BING_KEY_ENV: &str = "BING_TRANSLATOR_KEY";

/// Default settings in the `[defaults]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Backend used when `--backend` is not given.
    pub backend: Option<Backend>,
    /// Default target language.
    pub to: Option<String>,
    /// Default source language; leave unset to let the backend detect it.
    pub from: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// The `[google]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleConfig {
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub quota_user: Option<String>,
    #[serde(default)]
    pub referer: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl GoogleConfig {
    /// Gets the API key: named env var, then config value, then the default env var.
    pub fn get_api_key(&self) -> Option<String> {
        self.locate_api_key().map(|(key, _)| key)
    }

    /// Where [`get_api_key`](Self::get_api_key) finds the key, if anywhere.
    pub fn api_key_source(&self) -> Option<KeySource> {
        self.locate_api_key().map(|(_, source)| source)
    }

    fn locate_api_key(&self) -> Option<(String, KeySource)> {
        lookup_api_key(
            self.api_key_env.as_deref(),
            self.api_key.as_deref(),
            DEFAULT_GOOGLE_KEY_ENV,
        )
    }
}

/// The `[bing]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BingConfig {
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Azure region of the Translator resource.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl BingConfig {
    /// Gets the API key: named env var, then config value, then the default env var.
    pub fn get_api_key(&self) -> Option<String> {
        self.locate_api_key().map(|(key, _)| key)
    }

    /// Where [`get_api_key`](Self::get_api_key) finds the key, if anywhere.
    pub fn api_key_source(&self) -> Option<KeySource> {
        self.locate_api_key().map(|(_, source)| source)
    }

    fn locate_api_key(&self) -> Option<(String, KeySource)> {
        lookup_api_key(
            self.api_key_env.as_deref(),
            self.api_key.as_deref(),
            DEFAULT_BING_KEY_ENV,
        )
    }
}

/// Where a configured API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// The named environment variable.
    Env(String),
    /// `api_key` in the config file.
    ConfigFile,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(name) => write!(f, "env {name}"),
            Self::ConfigFile => f.write_str("config file"),
        }
    }
}

fn lookup_api_key(
    api_key_env: Option<&str>,
    api_key: Option<&str>,
    default_env: &str,
) -> Option<(String, KeySource)> {
    let from_env = |name: &str| {
        std::env::var(name)
            .ok()
            .filter(|key| !key.is_empty())
            .map(|key| (key, KeySource::Env(name.to_string())))
    };

    api_key_env
        .and_then(from_env)
        .or_else(|| {
            api_key
                .filter(|key| !key.is_empty())
                .map(|key| (key.to_string(), KeySource::ConfigFile))
        })
        .or_else(|| from_env(default_env))
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/mtgate/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub bing: BingConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: Backend,
    pub credentials: Credentials,
    /// Source language, `None` for auto-detect.
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
}

impl ResolvedConfig {
    /// Returns the target language or explains how to set one.
    pub fn require_target(&self) -> Result<&str> {
        self.target_language.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: mtgate --to <lang>\n  \
                 - Config file: ~/.config/mtgate/config.toml ([defaults] to = \"...\")"
            )
        })
    }

    /// Builds a gateway for the resolved backend.
    pub fn gateway(&self) -> Result<Gateway> {
        let mut builder = Gateway::builder(self.credentials.clone());
        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint(endpoint.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub backend: Option<Backend>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// API key for whichever backend is selected.
    pub key: Option<String>,
    pub quota_user: Option<String>,
    pub referer: Option<String>,
    pub region: Option<String>,
    /// Base URL override for the selected backend.
    pub endpoint: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values.
///
/// # Errors
///
/// Returns an error wrapping [`TranslationError::NoToken`] if no API key can
/// be found for the selected backend.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let backend = options
        .backend
        .or(config_file.defaults.backend)
        .unwrap_or_default();

    let cli_key = options.key.clone().filter(|key| !key.is_empty());

    let (credentials, endpoint) = match backend {
        Backend::Google => {
            let google = &config_file.google;
            let key = cli_key
                .or_else(|| google.get_api_key())
                .ok_or_else(|| missing_key(backend, google.api_key_env.as_deref()))?;
            let credentials = GoogleCredentials {
                key,
                quota_user: options
                    .quota_user
                    .clone()
                    .or_else(|| google.quota_user.clone()),
                referer: options.referer.clone().or_else(|| google.referer.clone()),
            };
            (Credentials::Google(credentials), google.endpoint.clone())
        }
        Backend::Bing => {
            let bing = &config_file.bing;
            let api_key = cli_key
                .or_else(|| bing.get_api_key())
                .ok_or_else(|| missing_key(backend, bing.api_key_env.as_deref()))?;
            let credentials = BingCredentials {
                api_key,
                region: options.region.clone().or_else(|| bing.region.clone()),
            };
            (Credentials::Bing(credentials), bing.endpoint.clone())
        }
    };

    let endpoint = options.endpoint.clone().or(endpoint);

    let source_language = options
        .from
        .as_deref()
        .or(config_file.defaults.from.as_deref())
        .and_then(normalize_source)
        .map(str::to_string);

    let target_language = options
        .to
        .as_ref()
        .or(config_file.defaults.to.as_ref())
        .cloned();

    Ok(ResolvedConfig {
        backend,
        credentials,
        source_language,
        target_language,
        endpoint,
        timeout: config_file.defaults.timeout_secs.map(Duration::from_secs),
    })
}

fn missing_key(backend: Backend, api_key_env: Option<&str>) -> anyhow::Error {
    let env_var = api_key_env.unwrap_or(match backend {
        Backend::Google => DEFAULT_GOOGLE_KEY_ENV,
        Backend::Bing => DEFAULT_BING_KEY_ENV,
    });

    anyhow::Error::new(TranslationError::no_token(format!(
        "no API key configured for backend '{backend}'"
    )))
    .context(format!(
        "Backend '{backend}' requires an API key\n\n\
         Set the {env_var} environment variable:\n  \
         export {env_var}=\"your-api-key\"\n\n\
         Or pass --key, or set api_key in the [{backend}] section of ~/.config/mtgate/config.toml"
    ))
}

/// Commented starting point written by `mtgate configure --init`.
pub const CONFIG_TEMPLATE: &str = r#"# mtgate configuration

[defaults]
backend = "google"
to = "en"
# from = "ja"          # omit to let the backend detect the source language
# timeout_secs = 30

[google]
api_key_env = "GOOGLE_TRANSLATE_API_KEY"
# quota_user = "user-42"
# referer = "https://example.com/"

[bing]
api_key_env = "BING_TRANSLATOR_KEY"
# region = "westeurope"
"#;

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/mtgate/config.toml`
    /// or `~/.config/mtgate/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    /// Writes [`CONFIG_TEMPLATE`]; refuses to overwrite an existing file.
    pub fn init(&self) -> Result<()> {
        if self.exists() {
            anyhow::bail!(
                "Config file already exists: {}",
                self.config_path.display()
            );
        }
        self.write(CONFIG_TEMPLATE)
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        atomic_write(&self.config_path, contents)
    }
}
