//! Test doubles and common utilities for publish contract tests
//!
//! `InMemoryZoneApi` behaves like a provider holding a set of accounts, each
//! owning zero or more zones. Clones share state and counters, so a test can
//! hand one clone to the publisher and inspect another.

#![allow(dead_code)]

use dnslink_core::error::{Error, Result};
use dnslink_core::traits::{Account, RecordDraft, RecordFilter, ZoneApi, ZoneRecord};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    /// (account id, zone) -> records
    zones: HashMap<(String, String), Vec<ZoneRecord>>,
    next_id: u64,
    list_accounts_calls: usize,
    /// Account ids in the order their zones were listed
    listed_accounts: Vec<String>,
    creates: Vec<RecordDraft>,
    updates: Vec<(u64, RecordDraft)>,
    fail_creates: bool,
    fail_updates: bool,
}

/// A provider double backed by in-memory zones
#[derive(Clone, Default)]
pub struct InMemoryZoneApi {
    state: Arc<Mutex<State>>,
}

impl InMemoryZoneApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.lock().unwrap().next_id = 100;
        api
    }

    /// Add an account visible to the token
    pub fn with_account(self, id: u64) -> Self {
        self.state.lock().unwrap().accounts.push(Account {
            id,
            email: Some(format!("owner{}@example.com", id)),
            plan_identifier: None,
        });
        self
    }

    /// Give `account` ownership of an empty `zone`
    pub fn with_zone(self, account: u64, zone: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .zones
            .insert((account.to_string(), zone.to_string()), Vec::new());
        self
    }

    /// Seed a TXT record into an owned zone; returns its id
    pub fn seed_txt(&self, account: u64, zone: &str, name: &str, content: &str) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        let records = state
            .zones
            .get_mut(&(account.to_string(), zone.to_string()))
            .expect("zone must exist before seeding");
        records.push(txt_record(id, zone, name, content, 3600));
        id
    }

    /// Make every create fail
    pub fn failing_creates(self) -> Self {
        self.state.lock().unwrap().fail_creates = true;
        self
    }

    /// Make every update fail
    pub fn failing_updates(self) -> Self {
        self.state.lock().unwrap().fail_updates = true;
        self
    }

    pub fn records(&self, account: u64, zone: &str) -> Vec<ZoneRecord> {
        self.state
            .lock()
            .unwrap()
            .zones
            .get(&(account.to_string(), zone.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn list_accounts_calls(&self) -> usize {
        self.state.lock().unwrap().list_accounts_calls
    }

    pub fn listed_accounts(&self) -> Vec<String> {
        self.state.lock().unwrap().listed_accounts.clone()
    }

    pub fn creates(&self) -> Vec<RecordDraft> {
        self.state.lock().unwrap().creates.clone()
    }

    pub fn updates(&self) -> Vec<(u64, RecordDraft)> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn write_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.creates.len() + state.updates.len()
    }
}

pub fn txt_record(id: u64, zone: &str, name: &str, content: &str, ttl: u32) -> ZoneRecord {
    ZoneRecord {
        id,
        zone_id: zone.to_string(),
        parent_id: None,
        record_type: "TXT".to_string(),
        name: name.to_string(),
        content: content.to_string(),
        ttl,
        priority: None,
        system_record: false,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait::async_trait]
impl ZoneApi for InMemoryZoneApi {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut state = self.state.lock().unwrap();
        state.list_accounts_calls += 1;
        Ok(state.accounts.clone())
    }

    async fn list_zone_records(
        &self,
        account_id: &str,
        zone: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<ZoneRecord>> {
        let mut state = self.state.lock().unwrap();
        state.listed_accounts.push(account_id.to_string());
        let records = state
            .zones
            .get(&(account_id.to_string(), zone.to_string()))
            .ok_or_else(|| Error::not_found(format!("Zone `{}` not found", zone)))?;
        Ok(records
            .iter()
            .filter(|r| r.name == filter.name && r.record_type == filter.record_type)
            .cloned()
            .collect())
    }

    async fn create_zone_record(
        &self,
        account_id: &str,
        zone: &str,
        draft: &RecordDraft,
    ) -> Result<ZoneRecord> {
        let mut state = self.state.lock().unwrap();
        state.creates.push(draft.clone());
        if state.fail_creates {
            return Err(Error::provider("memory", "create rejected"));
        }
        state.next_id += 1;
        let id = state.next_id;
        let records = state
            .zones
            .get_mut(&(account_id.to_string(), zone.to_string()))
            .ok_or_else(|| Error::not_found(format!("Zone `{}` not found", zone)))?;
        let record = txt_record(id, zone, &draft.name, &draft.content, draft.ttl);
        records.push(record.clone());
        Ok(record)
    }

    async fn update_zone_record(
        &self,
        account_id: &str,
        zone: &str,
        record_id: u64,
        draft: &RecordDraft,
    ) -> Result<ZoneRecord> {
        let mut state = self.state.lock().unwrap();
        state.updates.push((record_id, draft.clone()));
        if state.fail_updates {
            return Err(Error::provider("memory", "update rejected"));
        }
        let records = state
            .zones
            .get_mut(&(account_id.to_string(), zone.to_string()))
            .ok_or_else(|| Error::not_found(format!("Zone `{}` not found", zone)))?;
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::not_found(format!("Record `{}` not found", record_id)))?;
        record.record_type = draft.record_type.clone();
        record.name = draft.name.clone();
        record.content = draft.content.clone();
        record.ttl = draft.ttl;
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}

/// A writer that collects formatted log output for assertions
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// A dispatch that writes plain lines into this buffer
    pub fn dispatch(&self) -> tracing::Dispatch {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();
        tracing::Dispatch::new(subscriber)
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
