//! Configuration types for dnslink publishing
//!
//! This module defines the target record and provider settings used
//! throughout the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content prefix of every dnslink TXT record
pub const DNSLINK_PREFIX: &str = "dnslink=";

/// TTL applied when none is given (seconds)
pub const DEFAULT_TTL: u32 = 60;

/// Conventional record name for dnslink
pub const DEFAULT_RECORD_NAME: &str = "_dnslink";

/// Record type used for dnslink
pub const TXT: &str = "TXT";

/// Production DNSimple API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.dnsimple.com";

/// Bearer token for the provider API
///
/// Never persisted. The Debug implementation does not expose the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value, for the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Strip this token from arbitrary text (error messages, logs)
    pub fn redact(&self, text: &str) -> String {
        crate::error::redact_secret(text, &self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

/// The record to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnslinkTarget {
    /// Zone managed by the provider (e.g. "example.com")
    pub domain: String,

    /// Record name within the zone (e.g. "_dnslink")
    #[serde(default = "default_record_name")]
    pub record_name: String,

    /// Opaque dnslink value, e.g. an IPFS path
    pub link: String,

    /// Time-to-live in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl DnslinkTarget {
    /// Create a target with the default TTL
    pub fn new(
        domain: impl Into<String>,
        record_name: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_name: record_name.into(),
            link: link.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Stored TXT content: `dnslink=<link>`
    pub fn content(&self) -> String {
        format!("{}{}", DNSLINK_PREFIX, self.link)
    }

    /// Fully qualified record name
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.record_name, self.domain)
    }

    /// Validate the target
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.domain.is_empty() {
            return Err(crate::Error::config("domain is required"));
        }
        if self.record_name.is_empty() {
            return Err(crate::Error::config("record name is required"));
        }
        if self.link.is_empty() {
            return Err(crate::Error::config("link is required"));
        }
        Ok(())
    }
}

fn default_record_name() -> String {
    DEFAULT_RECORD_NAME.to_string()
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// DNSimple provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API token
    pub api_token: ApiToken,

    /// API endpoint (production or sandbox)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Perform reads but only log writes
    #[serde(default)]
    pub dry_run: bool,
}

impl ProviderConfig {
    /// Create a live configuration against the production endpoint
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: ApiToken::new(api_token),
            base_url: default_base_url(),
            dry_run: false,
        }
    }

    /// Override the API endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_token.is_empty() {
            return Err(crate::Error::config("DNSIMPLE_TOKEN is required"));
        }
        if self.base_url.is_empty() {
            return Err(crate::Error::config("API base URL cannot be empty"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Everything a single publish run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Provider settings
    pub provider: ProviderConfig,

    /// Record to publish
    pub target: DnslinkTarget,
}

impl PublishConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;
        self.target.validate()?;
        Ok(())
    }
}
