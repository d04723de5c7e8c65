use std::io::{self, Write};

use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use backend::{Config, ElectionApp, Screen, Store};

mod console;
mod home;
mod admin_login;
mod admin_panel;
mod register;
mod voter_login;
mod vote_ballot;
mod vote_results;

use crate::console::{Console, Flow};

/// Renders the current screen and dispatches one action, until the user
/// quits or input ends.
pub async fn run<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<()> {
    loop {
        let flow = match app.screen() {
            Screen::Home => home::show(app, console).await?,
            Screen::AdminLogin => admin_login::show(app, console).await?,
            Screen::AdminPanel => admin_panel::show(app, console).await?,
            Screen::Register => register::show(app, console).await?,
            Screen::VoterLogin => voter_login::show(app, console).await?,
            Screen::Ballot => vote_ballot::show(app, console).await?,
            Screen::Results => vote_results::show(app, console).await?,
        };
        if let Flow::Quit = flow {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    info!("🚀 Starting election terminal");
    let config = Config::from_env();

    let store = match Store::open(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open {}: {}", config.database_url, e);
            return Err(e.into());
        }
    };

    let mut app = ElectionApp::new(store.clone(), config);
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), io::stdout());
    run(&mut app, &mut console).await?;

    store.close().await;
    info!("👋 Election terminal closed");
    Ok(())
}
