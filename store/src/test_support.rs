//! Shared test doubles for domain service tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{RecordBackend, RecordBackendError};
use crate::domain::{CompanyRecord, RecordId};

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Default)]
struct BackendState {
    records: Vec<CompanyRecord>,
    failure: Option<RecordBackendError>,
    calls: usize,
}

/// Vec-backed backend that can be told to fail every call.
#[derive(Default)]
pub struct InMemoryRecordBackend {
    state: Mutex<BackendState>,
}

impl InMemoryRecordBackend {
    pub fn with_records(records: Vec<CompanyRecord>) -> Self {
        Self {
            state: Mutex::new(BackendState {
                records,
                ..BackendState::default()
            }),
        }
    }

    pub fn fail_with(&self, error: RecordBackendError) {
        self.lock_state().failure = Some(error);
    }

    pub fn records(&self) -> Vec<CompanyRecord> {
        self.lock_state().records.clone()
    }

    pub fn calls(&self) -> usize {
        self.lock_state().calls
    }

    fn lock_state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("backend state lock")
    }

    fn begin(&self) -> Result<MutexGuard<'_, BackendState>, RecordBackendError> {
        let mut state = self.lock_state();
        state.calls += 1;
        match state.failure.clone() {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl RecordBackend for InMemoryRecordBackend {
    fn is_configured(&self) -> bool {
        true
    }

    async fn get_all(&self) -> Result<Vec<CompanyRecord>, RecordBackendError> {
        Ok(self.begin()?.records.clone())
    }

    async fn add(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        self.begin()?.records.insert(0, record.clone());
        Ok(())
    }

    async fn update(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        let mut state = self.begin()?;
        let slot = state
            .records
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or_else(|| RecordBackendError::not_found(record.id.to_string()))?;
        *slot = record.clone();
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordBackendError> {
        self.begin()?.records.retain(|stored| &stored.id != id);
        Ok(())
    }

    async fn initialize(&self) -> Result<(), RecordBackendError> {
        self.begin().map(|_| ())
    }
}
