// # dnslink-core
//
// Core library for publishing dnslink TXT records.
//
// ## Architecture Overview
//
// - **ZoneApi**: Trait for the provider API (accounts, zone records)
// - **ZoneResolver**: Finds the account that owns the target zone
// - **RecordReconciler**: Creates or updates the dnslink record in place
// - **DnslinkPublisher**: Sequences resolver → reconciler → report
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from HTTP clients
// 2. **Single-shot**: One publish per run, no retries, no state between runs
// 3. **Identity-preserving**: Updates target the existing record's identifiers
// 4. **Explicit logging**: Log output goes to a `tracing::Dispatch` handed in
//    by the caller, discarded by default

pub mod config;
pub mod error;
pub mod publisher;
pub mod reconciler;
pub mod resolver;
pub mod traits;

// Re-export core types for convenience
pub use config::{ApiToken, DnslinkTarget, ProviderConfig, PublishConfig};
pub use error::{Error, Result, redact_secret};
pub use publisher::{DnslinkPublisher, PublishReport};
pub use reconciler::{ReconcileOutcome, RecordReconciler, find_dnslink_record, is_dnslink_content};
pub use resolver::{Resolution, ZoneResolver};
pub use traits::{Account, RecordDraft, RecordFilter, ZoneApi, ZoneRecord};
