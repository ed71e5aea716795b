//! Duty Admin
//!
//! Administrative console for the cleaning duty scheduling API. Mirrors the API's
//! collections in memory and keeps every derived view consistent after each write.

mod cli;
mod config;
mod coordinator;
mod errors;
mod models;
mod report;
mod store;
mod sync;
mod transport;
mod view;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{parse_line, Console, Reply};
use config::Config;
use report::Reporter;
use transport::HttpTransport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Duty Admin");
    tracing::info!("API base URL: {}", config.base_url);
    tracing::info!("Request timeout: {:?}", config.request_timeout);

    let transport = Arc::new(HttpTransport::new(
        &config.base_url,
        config.request_timeout,
    )?);
    let reporter = Reporter::new(config.activity_limit).with_hook(Box::new(|outcome| {
        tracing::debug!(
            operation = %outcome.operation,
            ok = outcome.ok,
            status = ?outcome.status,
            "{}",
            outcome.message
        );
    }));
    let console = Console::new(transport, reporter);

    console.bootstrap().await;
    if let Some(state) = console.reporter().server_state() {
        tracing::info!("{}", state.text);
    }

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(b"duty> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match parse_line(&line) {
            Ok(Some(command)) => console.execute(command).await,
            Ok(None) => Reply::Text(String::new()),
            Err(e) => Reply::Text(e.message()),
        };

        match reply {
            Reply::Quit => break,
            Reply::Text(text) if !text.is_empty() => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Reply::Text(_) => {}
        }
        stdout.write_all(b"duty> ").await?;
        stdout.flush().await?;
    }

    tracing::info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests;
