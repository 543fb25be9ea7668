//! Record reconciliation
//!
//! Decides whether the dnslink record must be created or updated, builds
//! the write payload and issues exactly one write.
//!
//! ## Classification
//!
//! A TXT record is "the" dnslink record when its content, after stripping
//! one optional surrounding quote character on each side, starts with
//! `dnslink`. Any other TXT content at the same name is left alone. When
//! several records qualify, the last one in listing order wins.

use crate::config::{DnslinkTarget, TXT};
use crate::error::{Error, Result};
use crate::traits::{Account, RecordDraft, ZoneApi, ZoneRecord};
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, info};

const DNSLINK_MARKER: &str = "dnslink";

/// Strip one optional leading and one optional trailing double quote
pub fn normalize_content(content: &str) -> &str {
    let content = content.strip_prefix('"').unwrap_or(content);
    content.strip_suffix('"').unwrap_or(content)
}

/// Whether TXT content holds a dnslink value
pub fn is_dnslink_content(content: &str) -> bool {
    normalize_content(content).starts_with(DNSLINK_MARKER)
}

/// The existing dnslink record among `records`, if any (last match wins)
pub fn find_dnslink_record(records: &[ZoneRecord]) -> Option<&ZoneRecord> {
    records.iter().rev().find(|r| is_dnslink_content(&r.content))
}

/// What a reconcile did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No dnslink record existed; one was created
    Created {
        /// The record as returned by the provider
        record: ZoneRecord,
    },
    /// An existing dnslink record was updated in place
    Updated {
        /// The record before the update
        previous: ZoneRecord,
        /// The record as returned by the provider
        record: ZoneRecord,
    },
}

impl ReconcileOutcome {
    /// The resulting record
    pub fn record(&self) -> &ZoneRecord {
        match self {
            Self::Created { record } | Self::Updated { record, .. } => record,
        }
    }
}

/// Applies the create-or-update decision
pub struct RecordReconciler<'a> {
    api: &'a dyn ZoneApi,
    dispatch: Dispatch,
}

impl<'a> RecordReconciler<'a> {
    /// Create a reconciler that logs nowhere
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

    /// Create or update the dnslink record for `target` under `account`
    ///
    /// `records` are the TXT records already at the target name. No retry
    /// and no fallback from one write to the other.
    pub async fn reconcile(
        &self,
        account: &Account,
        target: &DnslinkTarget,
        records: &[ZoneRecord],
    ) -> Result<ReconcileOutcome> {
        self.apply(account, target, records)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn apply(
        &self,
        account: &Account,
        target: &DnslinkTarget,
        records: &[ZoneRecord],
    ) -> Result<ReconcileOutcome> {
        match find_dnslink_record(records) {
            None => {
                info!("existing dnslink record: not found");
                let record = self.create(account, target).await?;
                Ok(ReconcileOutcome::Created { record })
            }
            Some(existing) => {
                info!(
                    "existing dnslink record: {} {} {} {}",
                    existing.zone_id, existing.record_type, existing.name, existing.content
                );
                let record = self.update(account, target, existing).await?;
                Ok(ReconcileOutcome::Updated {
                    previous: existing.clone(),
                    record,
                })
            }
        }
    }

    async fn create(&self, account: &Account, target: &DnslinkTarget) -> Result<ZoneRecord> {
        let draft = fresh_draft(target);
        info!(
            "will CreateRecord: {} {} {}",
            draft.record_type, draft.name, draft.content
        );

        let record = self
            .api
            .create_zone_record(&account.api_id(), &target.domain, &draft)
            .await
            .map_err(|e| Error::operation("CreateRecord", e))?;

        info!(
            "did CreateRecord: {} {} {} {}",
            record.zone_id, record.record_type, record.name, record.content
        );
        Ok(record)
    }

    async fn update(
        &self,
        account: &Account,
        target: &DnslinkTarget,
        existing: &ZoneRecord,
    ) -> Result<ZoneRecord> {
        // Same fields as a fresh record; only the identity is carried over.
        let draft = fresh_draft(target).with_identity_of(existing);
        info!(
            "will UpdateRecord: {} {} {} {}",
            existing.zone_id, draft.record_type, draft.name, draft.content
        );

        let record = self
            .api
            .update_zone_record(&account.api_id(), &target.domain, existing.id, &draft)
            .await
            .map_err(|e| Error::operation("UpdateRecord", e))?;

        info!(
            "did UpdateRecord: {} {} {} {}",
            record.zone_id, record.record_type, record.name, record.content
        );
        Ok(record)
    }
}

fn fresh_draft(target: &DnslinkTarget) -> RecordDraft {
    RecordDraft::new(TXT, &target.record_name, target.content(), target.ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(id: u64, content: &str) -> ZoneRecord {
        ZoneRecord {
            id,
            zone_id: "example.com".to_string(),
            parent_id: None,
            record_type: "TXT".to_string(),
            name: "_dnslink".to_string(),
            content: content.to_string(),
            ttl: 60,
            priority: None,
            system_record: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn recognizes_quoted_and_unquoted_dnslink() {
        assert!(is_dnslink_content("dnslink=/ipfs/QmFoo"));
        assert!(is_dnslink_content("\"dnslink=/ipfs/QmFoo\""));
        assert!(!is_dnslink_content("someotherdata"));
        assert!(!is_dnslink_content("\"v=spf1 -all\""));
        assert!(!is_dnslink_content(""));
    }

    #[test]
    fn normalization_strips_at_most_one_quote_per_side() {
        assert_eq!(normalize_content("\"abc\""), "abc");
        assert_eq!(normalize_content("\"\"abc"), "\"abc");
        assert_eq!(normalize_content("abc"), "abc");
    }

    #[test]
    fn unrelated_txt_is_not_a_dnslink_record() {
        let records = vec![txt(1, "someotherdata")];
        assert!(find_dnslink_record(&records).is_none());
    }

    #[test]
    fn last_qualifying_record_wins() {
        let records = vec![
            txt(1, "dnslink=/ipfs/QmA"),
            txt(2, "unrelated"),
            txt(3, "\"dnslink=/ipfs/QmB\""),
            txt(4, "also unrelated"),
        ];
        assert_eq!(find_dnslink_record(&records).map(|r| r.id), Some(3));
    }

    #[test]
    fn fresh_draft_uses_target_fields() {
        let target = DnslinkTarget::new("example.com", "_dnslink", "/ipfs/QmFoo").with_ttl(120);
        let draft = fresh_draft(&target);
        assert_eq!(draft.record_type, "TXT");
        assert_eq!(draft.name, "_dnslink");
        assert_eq!(draft.content, "dnslink=/ipfs/QmFoo");
        assert_eq!(draft.ttl, 120);
        assert_eq!(draft.id, None);
    }
}
