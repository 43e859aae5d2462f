//! Terminal drug interaction checker.

use std::sync::Arc;

use ddi_checker_app::{
    Command, Config, HttpDrugService, Session, TerminalView, DEFAULT_LOG_FILTER, USAGE,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::load()?;
    info!(base_url = %config.base_url, "DDI checker starting v{}", env!("CARGO_PKG_VERSION"));

    let service = Arc::new(HttpDrugService::new(&config.base_url, config.request_timeout)?);
    let (session, handle) = Session::new(&config, service, TerminalView::new(std::io::stdout()));
    let runner = tokio::spawn(session.run());

    println!("{USAGE}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Some(Command::Event(event))) => {
                if handle.send(event).is_err() {
                    break;
                }
            }
            Ok(Some(Command::Help)) => println!("{USAGE}"),
            Ok(Some(Command::Quit)) => {
                // Already stopped if this fails
                let _ = handle.quit();
                break;
            }
            Ok(None) => {}
            Err(e) => eprintln!("{e}\n{USAGE}"),
        }
    }

    // At end of input the session finishes any pending search or check first
    drop(handle);
    runner.await?;
    Ok(())
}
