//! Configure command handler for inspecting and creating the config file.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, KeySource};
use crate::ui::{Style, or_not_set};

/// What `mtgate configure` was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureAction {
    /// Config path and whether each backend has a key.
    Summary,
    /// Every setting, plus where each API key comes from.
    Show,
    /// Write the commented template.
    Init,
}

impl ConfigureAction {
    pub const fn from_flags(show: bool, init: bool) -> Self {
        if init {
            Self::Init
        } else if show {
            Self::Show
        } else {
            Self::Summary
        }
    }
}

pub fn run_configure(action: ConfigureAction) -> Result<()> {
    let manager = ConfigManager::new()?;

    if action == ConfigureAction::Init {
        manager.init()?;
        println!(
            "{} Wrote config template to {}",
            Style::success("✓"),
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }

    let config = manager.load_or_default()?;
    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    if !manager.exists() {
        println!(
            "{}",
            Style::secondary("(file not found; run 'mtgate configure --init' to create it)")
        );
    }
    println!();

    if action == ConfigureAction::Show {
        print_config(&config);
    } else {
        print_summary(&config);
    }

    Ok(())
}

fn print_summary(config: &ConfigFile) {
    let backend = config.defaults.backend.unwrap_or_default().to_string();
    print_setting("backend", Some(&backend));
    print_setting("to", config.defaults.to.as_deref());
    println!(
        "  {:<12} {}",
        Style::label("google key"),
        key_status(config.google.api_key_source().as_ref())
    );
    println!(
        "  {:<12} {}",
        Style::label("bing key"),
        key_status(config.bing.api_key_source().as_ref())
    );
    println!();
    println!("{}", Style::secondary("Run 'mtgate configure --show' for every setting."));
}

fn print_config(config: &ConfigFile) {
    let defaults = &config.defaults;
    let backend = defaults.backend.unwrap_or_default().to_string();
    let timeout = defaults.timeout_secs.map(|secs| format!("{secs}s"));

    println!("{}", Style::header("[defaults]"));
    print_setting("backend", Some(&backend));
    print_setting("to", defaults.to.as_deref());
    print_setting("from", defaults.from.as_deref());
    print_setting("timeout", timeout.as_deref());

    let google = &config.google;
    println!();
    println!("{}", Style::header("[google]"));
    print_key(google.api_key_source().as_ref());
    print_setting("api_key_env", google.api_key_env.as_deref());
    print_setting("quota_user", google.quota_user.as_deref());
    print_setting("referer", google.referer.as_deref());
    print_setting("endpoint", google.endpoint.as_deref());

    let bing = &config.bing;
    println!();
    println!("{}", Style::header("[bing]"));
    print_key(bing.api_key_source().as_ref());
    print_setting("api_key_env", bing.api_key_env.as_deref());
    print_setting("region", bing.region.as_deref());
    print_setting("endpoint", bing.endpoint.as_deref());
}

fn print_setting(label: &str, value: Option<&str>) {
    println!("  {:<12} {}", Style::label(label), or_not_set(value));
}

fn print_key(source: Option<&KeySource>) {
    println!("  {:<12} {}", Style::label("api_key"), key_status(source));
}

fn key_status(source: Option<&KeySource>) -> String {
    source.map_or_else(
        || Style::secondary("(not set)"),
        |source| {
            format!(
                "{} {}",
                Style::success("(set)"),
                Style::secondary(format!("from {source}"))
            )
        },
    )
}
