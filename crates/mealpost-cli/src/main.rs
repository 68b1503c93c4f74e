mod cli;
mod config;

use std::process::ExitCode;

use clap::Parser;
use mealpost_core::app::{MenuApp, MenuAppBuilder, RunReport, RunRequest};
use mealpost_core::impls::{InstagramFeed, JsonFileCache, KakaoWorkSender};
use mealpost_core::ports::SystemClock;
use tracing::{error, info};

use crate::cli::Cli;
use crate::config::{Settings, USAGE};

/// Initializes the tracing subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mealpost=info,mealpost_core=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Wires the production ports.
fn build_app(settings: &Settings) -> Result<MenuApp, String> {
    let feed = InstagramFeed::new().map_err(|e| format!("feed client: {e}"))?;
    let sender = KakaoWorkSender::new().map_err(|e| format!("webhook client: {e}"))?;

    MenuAppBuilder::new()
        .feed(feed)
        .sender(sender)
        .cache(JsonFileCache::new(&settings.cache_file, SystemClock))
        .clock(SystemClock)
        .build()
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    // (A) .env があれば読み込む（無くてもよい）
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    // (B) 設定の解決（webhook URL, アカウント）
    let settings = match Settings::resolve(&cli, |name| std::env::var(name).ok()) {
        Ok(settings) => settings,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // (C) ports を組み立てる
    let app = match build_app(&settings) {
        Ok(app) => app,
        Err(e) => {
            error!("could not start: {e}");
            return ExitCode::FAILURE;
        }
    };

    // (D) 1 回分の実行
    let request = RunRequest {
        account: settings.account.clone(),
        target_date: settings.target_date.unwrap_or_else(|| app.today()),
        scan_limit: settings.scan_limit,
        cache_mode: settings.cache_mode,
        delivery: settings.delivery.clone(),
    };

    match app.run(&request).await {
        Ok(RunReport::Delivered { image_url, from_cache }) => {
            info!(%image_url, from_cache, "sent menu to webhook");
            ExitCode::SUCCESS
        }
        Ok(RunReport::Collected { image_url, from_cache }) => {
            info!(%image_url, from_cache, "crawl-only: cache saved, exiting without sending");
            ExitCode::SUCCESS
        }
        Ok(RunReport::NotFound) => {
            error!(date = %request.target_date, "no menu post found");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            ExitCode::FAILURE
        }
    }
}
