//! Binary entry point that glues the HTTP gateway to the TUI. The
//! bootstrapping pipeline is deliberately linear: set up logging, detect the
//! host environment, start the API worker, hydrate the first view, and drive
//! the Ratatui event loop until the user exits.
use anyhow::Context;

use lending_desk::host::Host;
use lending_desk::{config, logging, run_app, worker, ApiClient, App};

fn main() -> anyhow::Result<()> {
    logging::init();

    let host = Host::detect();
    host.expand();

    let client = ApiClient::new(config::api_base_url());
    let (commands, events) = worker::spawn(client).context("failed to start api worker")?;

    let mut app = App::new(commands, host.closing_confirmation());
    app.reload_active();
    run_app(&mut app, &events)
}
