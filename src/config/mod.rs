//! Configuration file management and backend settings.

mod manager;

pub use manager::{
    BingConfig, CONFIG_TEMPLATE, ConfigFile, ConfigManager, DEFAULT_BING_KEY_ENV,
    DEFAULT_GOOGLE_KEY_ENV, DefaultsConfig, GoogleConfig, KeySource, ResolveOptions,
    ResolvedConfig, resolve_config,
};
