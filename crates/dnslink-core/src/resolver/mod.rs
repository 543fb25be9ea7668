//! Account/zone resolution
//!
//! Finds the account that owns a zone, together with the TXT records
//! already present under the target name.
//!
//! ## Search Contract
//!
//! 1. List every account visible to the token (one call)
//! 2. Walk the accounts in the order the provider returned them
//! 3. For each, list TXT records named `record_name` in `domain`
//! 4. The first account whose listing succeeds owns the zone; its records
//!    are returned immediately, even when there are none
//! 5. If every listing fails, resolution fails with
//!    [`Error::ZoneNotFound`] naming the domain
//!
//! This is a first-success search, not a ranking: ownership of a zone is
//! assumed to be unambiguous, and later accounts are never queried once
//! one succeeds.

use crate::error::{Error, Result};
use crate::traits::{Account, RecordFilter, ZoneApi, ZoneRecord};
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, debug, info};

/// The owning account and the matching records found in its zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Account that owns the zone
    pub account: Account,
    /// TXT records at the target name (possibly empty)
    pub records: Vec<ZoneRecord>,
}

/// Resolves which account owns a zone
pub struct ZoneResolver<'a> {
    api: &'a dyn ZoneApi,
    dispatch: Dispatch,
}

impl<'a> ZoneResolver<'a> {
    /// Create a resolver that logs nowhere
    pub fn new(api: &'a dyn ZoneApi) -> Self {
        Self {
            api,
            dispatch: Dispatch::none(),
        }
    }

    /// Send log output to `dispatch`
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Find the account owning `domain` and its TXT records named `record_name`
    pub async fn resolve(&self, domain: &str, record_name: &str) -> Result<Resolution> {
        self.search(domain, record_name)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn search(&self, domain: &str, record_name: &str) -> Result<Resolution> {
        let accounts = self.api.list_accounts().await?;
        info!(
            "found {} accounts for token: {}",
            accounts.len(),
            accounts
                .first()
                .and_then(|a| a.email.as_deref())
                .unwrap_or("<unknown>")
        );

        let filter = RecordFilter::txt(record_name);

        for account in accounts {
            let account_id = account.api_id();
            match self
                .api
                .list_zone_records(&account_id, domain, &filter)
                .await
            {
                Ok(records) => {
                    info!(
                        "found domain {} in account {} with {} records",
                        domain,
                        account_id,
                        records.len()
                    );
                    return Ok(Resolution { account, records });
                }
                Err(e) => {
                    debug!("error listing records of account {}: {}", account_id, e);
                }
            }
        }

        Err(Error::zone_not_found(domain))
    }
}
