// Configuration module: reads the line-oriented `key:value` credentials
// file and resolves it into the account credentials used for HTTP Basic
// auth against the ticketing API.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;

/// Conventional config file name, looked up in the working directory and
/// then under `~/.deskview/`.
pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

/// Account credentials for the ticketing API: the Basic-auth pair plus the
/// account subdomain. Built once by [`Credentials::from_config_text`] and
/// owned by the API client for the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Basic-auth username: the account email, or `"{email}/token"` when
    /// authenticating with an API token.
    pub username: String,
    /// Basic-auth secret: the password or the API token.
    pub secret: String,
    /// Account-specific namespace segment of the API host name.
    pub subdomain: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .finish()
    }
}

impl Credentials {
    /// Parse the text content of a config file. Recognized keys are
    /// `subdomain`, `email`, `password` and `token`; only the first colon on
    /// a line splits key from value, so values may themselves contain
    /// colons. Unknown keys and lines without a colon are ignored.
    ///
    /// When both a password and a token are given, the token wins and the
    /// username becomes `"{email}/token"`. Documented precedence, not a
    /// defect.
    pub fn from_config_text(text: &str) -> Result<Self, Error> {
        let mut subdomain = String::new();
        let mut email = String::new();
        let mut password = String::new();
        let mut token = String::new();

        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key {
                "subdomain" => subdomain = value.to_owned(),
                "email" => email = value.to_owned(),
                "password" => password = value.to_owned(),
                "token" => token = value.to_owned(),
                _ => {}
            }
        }

        if subdomain.is_empty() {
            return Err(Error::Config("missing subdomain".to_owned()));
        }
        if email.is_empty() {
            return Err(Error::Config("missing email".to_owned()));
        }
        if password.is_empty() && token.is_empty() {
            return Err(Error::Config("missing credential".to_owned()));
        }

        if token.is_empty() {
            Ok(Self {
                username: email,
                secret: password,
                subdomain,
            })
        } else {
            Ok(Self {
                username: format!("{email}/token"),
                secret: token,
                subdomain,
            })
        }
    }
}

/// Read and resolve credentials from `path`, or from the default locations
/// when no path is given: `config.txt` in the working directory, then
/// `~/.deskview/config.txt`.
pub fn load_credentials(path: Option<&Path>) -> Result<Credentials, Error> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path(),
    };
    debug!("reading credentials from {}", path.display());

    let text = fs::read_to_string(&path)
        .map_err(|err| Error::Config(format!("could not read {}: {err}", path.display())))?;
    Credentials::from_config_text(&text)
}

fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".deskview").join(DEFAULT_CONFIG_FILE)
}
