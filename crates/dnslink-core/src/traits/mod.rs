//! Core traits for dnslink publishing
//!
//! This module defines the abstract interface that provider clients implement.
//!
//! - [`ZoneApi`]: List accounts and read/write zone records via a provider API

pub mod zone_api;

pub use zone_api::{Account, RecordDraft, RecordFilter, ZoneApi, ZoneRecord};
