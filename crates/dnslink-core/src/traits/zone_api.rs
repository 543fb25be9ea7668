// # Zone API Trait
//
// Defines the interface for reading and writing zone records via a
// provider API.
//
// ## Implementations
//
// - DNSimple: `dnslink-provider-dnsimple` crate
//
// ## Usage
//
// ```rust,ignore
// use dnslink_core::traits::{RecordFilter, ZoneApi};
//
// async fn txt_records(api: &dyn ZoneApi) -> dnslink_core::Result<()> {
//     let accounts = api.list_accounts().await?;
//     let filter = RecordFilter::txt("_dnslink");
//     let records = api
//         .list_zone_records(&accounts[0].api_id(), "example.com", &filter)
//         .await?;
//     println!("{} records", records.len());
//     Ok(())
// }
// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account reachable by the API token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric account identifier
    pub id: u64,
    /// Account e-mail, when the provider exposes it
    #[serde(default)]
    pub email: Option<String>,
    /// Billing plan
    #[serde(default)]
    pub plan_identifier: Option<String>,
}

impl Account {
    /// Create an account with only an identifier
    pub fn new(id: u64) -> Self {
        Self {
            id,
            email: None,
            plan_identifier: None,
        }
    }

    /// Identifier as used in API paths
    pub fn api_id(&self) -> String {
        self.id.to_string()
    }
}

/// A record in a zone, as returned by the provider
///
/// Read-only snapshot; nothing is cached between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Record identifier
    pub id: u64,
    /// Zone the record belongs to (the zone name for DNSimple)
    pub zone_id: String,
    /// Parent record, if any
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Record type, e.g. "TXT"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record name relative to the zone
    pub name: String,
    /// Record content
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Priority (MX/SRV only)
    #[serde(default)]
    pub priority: Option<u32>,
    /// Provider-managed record
    #[serde(default)]
    pub system_record: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for listing zone records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact record name
    pub name: String,
    /// Record type
    pub record_type: String,
}

impl RecordFilter {
    /// Filter TXT records by exact name
    pub fn txt(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: crate::config::TXT.to_string(),
        }
    }
}

/// Write payload for creating or updating a record
///
/// Only the fields present here are sent. Absent optional fields are left
/// out of the body so the provider does not apply defaults (such as
/// regions) the plan may not allow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDraft {
    /// Identifier of the record being replaced; travels in the URL, not the body
    #[serde(skip)]
    pub id: Option<u64>,
    /// Zone identifier of the record being replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Parent identifier of the record being replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record name
    pub name: String,
    /// Record content
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
}

impl RecordDraft {
    /// Payload for a fresh record
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            id: None,
            zone_id: None,
            parent_id: None,
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            ttl,
        }
    }

    /// Carry over the identity of an existing record
    pub fn with_identity_of(mut self, existing: &ZoneRecord) -> Self {
        self.id = Some(existing.id);
        self.zone_id = Some(existing.zone_id.clone());
        self.parent_id = existing.parent_id;
        self
    }

    /// The record this draft would produce, assuming the provider accepts it
    ///
    /// Used by dry-run mode. Unknown identifiers are zero/empty.
    pub fn to_record(&self, zone: &str) -> ZoneRecord {
        ZoneRecord {
            id: self.id.unwrap_or_default(),
            zone_id: self.zone_id.clone().unwrap_or_else(|| zone.to_string()),
            parent_id: self.parent_id,
            record_type: self.record_type.clone(),
            name: self.name.clone(),
            content: self.content.clone(),
            ttl: self.ttl,
            priority: None,
            system_record: false,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Trait for provider API clients
///
/// The four operations a dnslink publish needs. The token lives inside the
/// implementation.
///
/// Implementations are single-shot: one API call per method, no retries,
/// no backoff and no caching beyond a single request. A failure is returned
/// to the caller as-is.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// List every account visible to the token
    async fn list_accounts(&self) -> Result<Vec<Account>, crate::Error>;

    /// List records of `zone` under `account_id` matching `filter`
    ///
    /// Fails when the account does not own or administer the zone.
    async fn list_zone_records(
        &self,
        account_id: &str,
        zone: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<ZoneRecord>, crate::Error>;

    /// Create a record in `zone`
    async fn create_zone_record(
        &self,
        account_id: &str,
        zone: &str,
        draft: &RecordDraft,
    ) -> Result<ZoneRecord, crate::Error>;

    /// Update record `record_id` in `zone`
    async fn update_zone_record(
        &self,
        account_id: &str,
        zone: &str,
        record_id: u64,
        draft: &RecordDraft,
    ) -> Result<ZoneRecord, crate::Error>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}
