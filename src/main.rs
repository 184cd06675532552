// Entrypoint for the CLI application.
// - Keeps `main` small: resolve credentials, build the API client, fetch
//   the ticket set once, then hand everything to the session loop.
// - Returns `anyhow::Result` so any fatal startup error prints as a single
//   human-readable line with a non-zero exit code.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use log::info;

use deskview_cli::api::ApiClient;
use deskview_cli::config::load_credentials;
use deskview_cli::session::Session;
use deskview_cli::ui::{self, TerminalPresenter};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional config path as the only positional argument; defaults to
    // `config.txt`, then `~/.deskview/config.txt`.
    let config_path = env::args().nth(1).map(PathBuf::from);
    let credentials = load_credentials(config_path.as_deref())?;

    let api = ApiClient::new(credentials)?;
    api.health_check().context("API unreachable")?;

    info!("starting session for {}", api.subdomain());
    let spinner = ui::spinner(&format!("Fetching tickets from {}...", api.subdomain()));
    let fetched = api.fetch_all_tickets();
    spinner.finish_and_clear();
    let tickets = fetched.context("could not fetch the ticket set")?;

    let mut session = Session::new(tickets);
    session.run(&mut TerminalPresenter, &api)
}
