// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive ticket
// browsing session.
//
// Module responsibilities:
// - `config`: resolves the `key:value` credentials file into the account
//   credentials used for HTTP Basic auth.
// - `error`: the typed failure taxonomy shared across modules.
// - `api`: encapsulates HTTP interactions with the ticketing backend
//   (ticket listing, submitter identity lookup, health check).
// - `pagination`: pure page arithmetic over the fetched ticket sequence.
// - `session`: the command-loop state machine tying the above together.
// - `ui`: the terminal presenter (prompt, page and detail rendering).
//
// Keeping this separation makes it easier to test the session logic or
// replace the UI in the future (for example, adding a TUI).
pub mod api;
pub mod config;
pub mod error;
pub mod pagination;
pub mod session;
pub mod ui;
