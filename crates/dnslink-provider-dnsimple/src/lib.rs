// # DNSimple Zone API Client
//
// This crate implements `ZoneApi` against the DNSimple API v2.
//
// ## Behaviour
//
// - One HTTP request per trait call
// - Errors are returned to the caller as-is (no retry, no backoff)
// - HTTP status codes are mapped to specific errors (401/403, 404, 429, 5xx)
// - Dry-run mode performs reads and logs writes without sending them
// - No caching and no background tasks
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - Client construction fails if the token is empty
//
// ## API Reference
//
// - DNSimple API v2: https://developer.dnsimple.com/v2/
// - List Accounts: GET `/v2/accounts`
// - List Zone Records: GET `/v2/:account/zones/:zone/records?name=...&type=...`
// - Create Zone Record: POST `/v2/:account/zones/:zone/records`
// - Update Zone Record: PATCH `/v2/:account/zones/:zone/records/:record`

use async_trait::async_trait;
use dnslink_core::config::{ApiToken, ProviderConfig};
use dnslink_core::traits::{Account, RecordDraft, RecordFilter, ZoneApi, ZoneRecord};
use dnslink_core::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Provider name used in errors and logs
pub const PROVIDER_NAME: &str = "dnsimple";

/// Sandbox endpoint, for testing against a throwaway account
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.dnsimple.com";

const USER_AGENT: &str = concat!("dnslink-dnsimple/", env!("CARGO_PKG_VERSION"));

/// Every successful DNSimple response wraps its payload in `data`
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// DNSimple error body
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// DNSimple API v2 client
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the client will:
/// - Perform all GET requests (accounts, zone records)
/// - Log the intended POST/PATCH payload
/// - **NOT** modify any record, returning the record the write would produce
pub struct DnsimpleClient {
    /// ⚠️ NEVER log this value
    api_token: ApiToken,

    /// API endpoint without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// If true, perform reads but skip writes
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DnsimpleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsimpleClient")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl DnsimpleClient {
    /// Create a client from provider configuration
    ///
    /// Fails if the token is empty or the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        if config.dry_run {
            tracing::warn!("DNSimple client running in DRY-RUN mode - no changes will be made");
        }

        Ok(Self {
            api_token: config.api_token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            dry_run: config.dry_run,
        })
    }

    /// Create a live client against the production endpoint
    pub fn new_live(api_token: impl Into<String>) -> Result<Self> {
        Self::new(&ProviderConfig::new(api_token))
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn records_url(&self, account_id: &str, zone: &str) -> String {
        format!(
            "{}/v2/{}/zones/{}/records",
            self.base_url, account_id, zone
        )
    }

    /// Send a request and unwrap the `data` envelope of a success response
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T> {
        let response = request
            .bearer_auth(self.api_token.expose())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                Error::http(
                    self.api_token
                        .redact(&format!("{} request failed: {}", context, e)),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            // DNSimple echoes request input back in some error messages
            return Err(status_error(status, &self.api_token.redact(&body), context));
        }

        let envelope: DataEnvelope<T> = response.json().await.map_err(|e| {
            Error::provider(
                PROVIDER_NAME,
                self.api_token
                    .redact(&format!("Failed to parse {} response: {}", context, e)),
            )
        })?;
        Ok(envelope.data)
    }
}

/// Map a non-success status to an error, preferring DNSimple's message
fn status_error(status: StatusCode, body: &str, context: &str) -> Error {
    let detail = serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "{}: invalid API token or insufficient permissions. Status: {} - {}",
            context, status, detail
        )),
        404 => Error::not_found(format!("{}: {}", context, detail)),
        429 => Error::rate_limited(format!(
            "{}: rate limit exceeded. Status: {}",
            context, status
        )),
        500..=599 => Error::provider(
            PROVIDER_NAME,
            format!("{}: server error (transient): {} - {}", context, status, detail),
        ),
        _ => Error::provider(
            PROVIDER_NAME,
            format!("{} failed: {} - {}", context, status, detail),
        ),
    }
}

#[async_trait]
impl ZoneApi for DnsimpleClient {
    /// ```http
    /// GET /v2/accounts
    /// Authorization: Bearer <token>
    /// ```
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let url = format!("{}/v2/accounts", self.base_url);
        tracing::debug!("Listing accounts: {}", url);
        self.execute(self.client.get(&url), "ListAccounts").await
    }

    /// ```http
    /// GET /v2/:account/zones/:zone/records?name=_dnslink&type=TXT
    /// Authorization: Bearer <token>
    /// ```
    async fn list_zone_records(
        &self,
        account_id: &str,
        zone: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<ZoneRecord>> {
        let url = self.records_url(account_id, zone);
        tracing::debug!(
            "Listing records: {} (name: {}, type: {})",
            url,
            filter.name,
            filter.record_type
        );

        let request = self.client.get(&url).query(&[
            ("name", filter.name.as_str()),
            ("type", filter.record_type.as_str()),
        ]);
        self.execute(request, "ListRecords").await
    }

    /// ```http
    /// POST /v2/:account/zones/:zone/records
    /// { "type": "TXT", "name": "_dnslink", "content": "dnslink=...", "ttl": 60 }
    /// ```
    async fn create_zone_record(
        &self,
        account_id: &str,
        zone: &str,
        draft: &RecordDraft,
    ) -> Result<ZoneRecord> {
        let url = self.records_url(account_id, zone);

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send POST request to {} with payload: {}",
                url,
                serde_json::to_string(draft)?
            );
            return Ok(draft.to_record(zone));
        }

        self.execute(self.client.post(&url).json(draft), "CreateRecord")
            .await
    }

    /// ```http
    /// PATCH /v2/:account/zones/:zone/records/:record
    /// { "zone_id": "example.com", "type": "TXT", "name": "_dnslink", "content": "dnslink=...", "ttl": 60 }
    /// ```
    async fn update_zone_record(
        &self,
        account_id: &str,
        zone: &str,
        record_id: u64,
        draft: &RecordDraft,
    ) -> Result<ZoneRecord> {
        let url = format!("{}/{}", self.records_url(account_id, zone), record_id);

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send PATCH request to {} with payload: {}",
                url,
                serde_json::to_string(draft)?
            );
            let mut record = draft.to_record(zone);
            record.id = record_id;
            return Ok(record);
        }

        self.execute(self.client.patch(&url).json(draft), "UpdateRecord")
            .await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
