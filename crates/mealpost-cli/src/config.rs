//! Configuration resolution: CLI flags + environment → Settings.
//!
//! # Webhook URL の優先順位
//! 1. `--webhook-url`（直接指定）
//! 2. `--webhook-env-var NAME`（環境変数名を指定）
//! 3. `--room N`（deprecated: `KAKAOWORK_WEBHOOK_URL_N`、0 は未指定扱い）
//! 4. `KAKAOWORK_WEBHOOK_URL`（デフォルト）
//!
//! 環境変数の参照は関数として注入するので、テストでプロセスの環境を触りません。

use std::path::PathBuf;

use mealpost_core::app::{CacheMode, Delivery};
use mealpost_core::domain::{DateQuery, ErrorKind};
use thiserror::Error;
use tracing::warn;

use crate::cli::Cli;

pub const DEFAULT_WEBHOOK_ENV: &str = "KAKAOWORK_WEBHOOK_URL";

pub const USAGE: &str =
    "Usage: mealpost [--username USER] [--webhook-url URL | --webhook-env-var ENV_VAR_NAME]";

/// Where the webhook URL comes from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookSource {
    Direct(String),
    EnvVar(String),
    /// Deprecated room number indirection.
    Room(u32),
    Default,
}

impl WebhookSource {
    pub fn from_cli(cli: &Cli) -> Self {
        if let Some(url) = cli.webhook_url.as_ref().filter(|u| !u.is_empty()) {
            WebhookSource::Direct(url.clone())
        } else if let Some(name) = cli.webhook_env_var.as_ref().filter(|n| !n.is_empty()) {
            WebhookSource::EnvVar(name.clone())
        } else if let Some(room) = cli.room.filter(|&room| room != 0) {
            WebhookSource::Room(room)
        } else {
            WebhookSource::Default
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not determine webhook URL ({0} is empty or not set). Please check your arguments and .env file.")]
    MissingWebhook(String),

    #[error("could not determine username (--username or TARGET_INSTAGRAM_ID). Please check your arguments and .env file.")]
    MissingAccount,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

/// Resolves the webhook URL for `source`. Empty values count as unset.
pub fn resolve_webhook(
    source: &WebhookSource,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let name = match source {
        WebhookSource::Direct(url) => return Ok(url.clone()),
        WebhookSource::EnvVar(name) => name.clone(),
        WebhookSource::Room(room) => {
            let name = format!("{DEFAULT_WEBHOOK_ENV}_{room}");
            warn!("--room option is deprecated. Use --webhook-env-var {name} instead.");
            name
        }
        WebhookSource::Default => DEFAULT_WEBHOOK_ENV.to_string(),
    };

    match env(&name).filter(|value| !value.is_empty()) {
        Some(url) => Ok(url),
        None => Err(ConfigError::MissingWebhook(name)),
    }
}

/// Everything a run needs, resolved from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub account: String,
    pub delivery: Delivery,
    pub cache_mode: CacheMode,
    pub cache_file: PathBuf,

    /// `None` means today (UTC+9), decided at run time.
    pub target_date: Option<DateQuery>,
    pub scan_limit: Option<usize>,
}

impl Settings {
    /// The webhook is only resolved when the run will send.
    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let delivery = if cli.crawl_only {
            Delivery::Skip
        } else {
            Delivery::Webhook(resolve_webhook(&WebhookSource::from_cli(cli), &env)?)
        };

        let account = cli
            .username
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingAccount)?;

        Ok(Self {
            account,
            delivery,
            cache_mode: if cli.no_cache {
                CacheMode::Bypass
            } else {
                CacheMode::Use
            },
            cache_file: cli.cache_file.clone(),
            target_date: cli.date,
            scan_limit: cli.scan_limit,
        })
    }
}
