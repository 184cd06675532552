// API client module: a small blocking HTTP client that talks to the
// account's ticketing REST API. One client instance holds the credentials
// for the process lifetime; every request authenticates with HTTP Basic
// auth and carries a bounded timeout so a hung request can never stall the
// session indefinitely.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Credentials;
use crate::error::Error;

const PROVIDER_DOMAIN: &str = "zendesk.com";
const REQUEST_TIMEOUT_SECS: u64 = 20;
const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Placeholder shown when a submitter identity cannot be resolved.
pub const IDENTITY_NOT_AVAILABLE: &str = "N/A";

/// One ticket as returned by the listing endpoint. Read-only after the
/// initial fetch; fields the browser does not render are dropped on decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub submitter_id: u64,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Result of a submitter lookup: a display value, or the `"N/A"` sentinel
/// when the lookup failed or returned nothing. Fetched per ticket view,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    value: String,
}

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn not_available() -> Self {
        Self::new(IDENTITY_NOT_AVAILABLE)
    }

    pub fn display(&self) -> &str {
        &self.value
    }
}

/// Seam for resolving a ticket submitter's identity, so the session loop
/// can be exercised without a network. Implemented by [`ApiClient`].
pub trait SubmitterLookup {
    fn submitter_identity(&self, user_id: u64) -> Identity;
}

#[derive(Debug, Deserialize)]
struct TicketPage {
    tickets: Vec<Ticket>,
}

#[derive(Debug, Deserialize)]
struct IdentityPage {
    #[serde(default)]
    identities: Vec<IdentityRecord>,
}

#[derive(Debug, Deserialize)]
struct IdentityRecord {
    #[serde(default)]
    value: Option<String>,
}

/// Blocking client for the ticketing API, bound to one account.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| Error::Transport(format!("failed to build HTTP client: {err}")))?;
        let base_url = format!("https://{}.{PROVIDER_DOMAIN}/api/v2", credentials.subdomain);
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn subdomain(&self) -> &str {
        &self.credentials.subdomain
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.secret))
    }

    /// Lightweight authenticated probe of the API root, run before the full
    /// fetch so an unreachable API fails fast with a clear error instead of
    /// an opaque downstream one. Non-2xx is fatal, same as the ticket-fetch
    /// path.
    pub fn health_check(&self) -> Result<(), Error> {
        let url = self.endpoint("");
        debug!("health check against {url}");
        let response = self
            .get(&url)
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .send()
            .map_err(|err| Error::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(status.as_u16()));
        }
        Ok(())
    }

    /// Fetch the account's full ticket collection with one authenticated
    /// GET to the incremental listing, starting at the epoch. The response
    /// order is kept as-is and becomes the browsing order for the session.
    pub fn fetch_all_tickets(&self) -> Result<Vec<Ticket>, Error> {
        let url = self.endpoint("incremental/tickets/cursor.json?start_time=0");
        debug!("fetching all tickets from {}", self.credentials.subdomain);
        let response = self
            .get(&url)
            .send()
            .map_err(|err| Error::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|err| Error::Transport(err.to_string()))?;
        parse_ticket_page(&body)
    }
}

impl SubmitterLookup for ApiClient {
    /// Resolve the submitter's identity records and keep the first value.
    /// This lookup never propagates an error outward: any transport
    /// failure, non-2xx response or empty record degrades to `"N/A"`.
    fn submitter_identity(&self, user_id: u64) -> Identity {
        let url = self.endpoint(&format!("users/{user_id}/identities.json"));
        let response = match self.get(&url).send() {
            Ok(response) => response,
            Err(err) => {
                debug!("identity lookup for user {user_id} failed: {err}");
                return Identity::not_available();
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("identity lookup for user {user_id} returned status {status}");
            return Identity::not_available();
        }

        match response.text() {
            Ok(body) => parse_first_identity(&body),
            Err(err) => {
                debug!("identity response read for user {user_id} failed: {err}");
                Identity::not_available()
            }
        }
    }
}

fn parse_ticket_page(body: &str) -> Result<Vec<Ticket>, Error> {
    let page: TicketPage =
        serde_json::from_str(body).map_err(|err| Error::Decode(err.to_string()))?;
    Ok(page.tickets)
}

fn parse_first_identity(body: &str) -> Identity {
    let page: IdentityPage = match serde_json::from_str(body) {
        Ok(page) => page,
        Err(err) => {
            debug!("identity payload was malformed JSON: {err}");
            return Identity::not_available();
        }
    };
    page.identities
        .into_iter()
        .next()
        .and_then(|record| record.value)
        .filter(|value| !value.is_empty())
        .map(Identity::new)
        .unwrap_or_else(Identity::not_available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::from_config_text("subdomain:acme\nemail:agent@acme.test\ntoken:t0ken\n")
            .unwrap()
    }

    #[test]
    fn base_url_is_built_from_the_subdomain() {
        let api = ApiClient::new(credentials()).unwrap();
        assert_eq!(api.base_url(), "https://acme.zendesk.com/api/v2");
        assert_eq!(
            api.endpoint("users/7/identities.json"),
            "https://acme.zendesk.com/api/v2/users/7/identities.json"
        );
    }

    #[test]
    fn ticket_page_decodes_in_response_order() {
        let body = r#"{
            "tickets": [
                {"id": 3, "subject": "printer on fire", "status": "open",
                 "description": "it burns", "submitter_id": 9, "priority": "high",
                 "organization_id": 12, "tags": ["hw"]},
                {"id": 1, "subject": "login broken", "status": "pending",
                 "description": "cannot sign in", "submitter_id": 4}
            ],
            "end_of_stream": true
        }"#;
        let tickets = parse_ticket_page(body).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id, 3);
        assert_eq!(tickets[0].priority.as_deref(), Some("high"));
        assert_eq!(tickets[1].id, 1);
        assert_eq!(tickets[1].priority, None);
    }

    #[test]
    fn ticket_page_without_the_tickets_key_is_a_decode_error() {
        let err = parse_ticket_page(r#"{"count": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn malformed_ticket_json_is_a_decode_error() {
        let err = parse_ticket_page("{\"tickets\": [").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn first_identity_value_is_used() {
        let body = r#"{"identities": [
            {"value": "ada@example.com", "type": "email"},
            {"value": "ada@other.example", "type": "email"}
        ]}"#;
        assert_eq!(parse_first_identity(body).display(), "ada@example.com");
    }

    #[test]
    fn empty_or_missing_identity_value_degrades_to_the_sentinel() {
        assert_eq!(
            parse_first_identity(r#"{"identities": [{"value": ""}]}"#).display(),
            IDENTITY_NOT_AVAILABLE
        );
        assert_eq!(
            parse_first_identity(r#"{"identities": [{"type": "email"}]}"#).display(),
            IDENTITY_NOT_AVAILABLE
        );
        assert_eq!(
            parse_first_identity(r#"{"identities": []}"#).display(),
            IDENTITY_NOT_AVAILABLE
        );
    }

    #[test]
    fn malformed_identity_json_degrades_to_the_sentinel() {
        assert_eq!(
            parse_first_identity("not json").display(),
            IDENTITY_NOT_AVAILABLE
        );
    }
}
