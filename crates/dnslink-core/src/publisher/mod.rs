//! dnslink publisher
//!
//! The DnslinkPublisher runs one publish:
//! - Resolving the account that owns the zone via ZoneResolver
//! - Creating or updating the dnslink record via RecordReconciler
//! - Reporting the resulting record
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    Resolution    ┌──────────────────┐    ReconcileOutcome
//! │ ZoneResolver │ ───────────────▶ │ RecordReconciler │ ───────────────────▶ PublishReport
//! └──────────────┘                  └──────────────────┘
//!         │                                  │
//!         └──────────────┬───────────────────┘
//!                        ▼
//!                 ┌─────────────┐
//!                 │   ZoneApi   │
//!                 └─────────────┘
//! ```
//!
//! Control flows strictly left to right. No retries, no feedback loop: a
//! run either completes or returns the first error.

use crate::config::DnslinkTarget;
use crate::error::Result;
use crate::reconciler::{ReconcileOutcome, RecordReconciler};
use crate::resolver::ZoneResolver;
use crate::traits::{Account, ZoneApi, ZoneRecord};
use tracing::Dispatch;

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Account that owns the zone
    pub account: Account,
    /// Zone the record was written to
    pub domain: String,
    /// What the reconciler did
    pub outcome: ReconcileOutcome,
}

impl PublishReport {
    /// The record as the provider returned it
    pub fn record(&self) -> &ZoneRecord {
        self.outcome.record()
    }

    /// Whether the record was newly created
    pub fn created(&self) -> bool {
        matches!(self.outcome, ReconcileOutcome::Created { .. })
    }

    /// `updated TXT <name>.<domain> to <content>`
    pub fn summary_line(&self) -> String {
        let record = self.record();
        format!(
            "updated TXT {}.{} to {}",
            record.name, self.domain, record.content
        )
    }
}

/// Publishes dnslink records through a provider API
pub struct DnslinkPublisher {
    api: Box<dyn ZoneApi>,
    dispatch: Dispatch,
}

impl DnslinkPublisher {
    /// Create a publisher that logs nowhere
    pub fn new(api: Box<dyn ZoneApi>) -> Self {
        Self {
            api,
            dispatch: Dispatch::none(),
        }
    }

    /// Send log output of resolution and reconciliation to `dispatch`
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Resolve the owning account, then create or update the record
    pub async fn publish(&self, target: &DnslinkTarget) -> Result<PublishReport> {
        target.validate()?;

        let resolution = ZoneResolver::new(self.api.as_ref())
            .with_dispatch(self.dispatch.clone())
            .resolve(&target.domain, &target.record_name)
            .await?;

        let outcome = RecordReconciler::new(self.api.as_ref())
            .with_dispatch(self.dispatch.clone())
            .reconcile(&resolution.account, target, &resolution.records)
            .await?;

        Ok(PublishReport {
            account: resolution.account,
            domain: target.domain.clone(),
            outcome,
        })
    }
}
