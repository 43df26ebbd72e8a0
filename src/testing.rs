/// In-memory doubles for the roster store and the message gateway
use async_trait::async_trait;
use poise::serenity_prelude::ChannelId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::Instant;

use crate::database::{RosterStore, StoreError};
use crate::gateway::{GatewayError, MessageGateway};
use crate::models::{BirthdayEntry, BirthdayRecord};

/// Vec-backed roster that mirrors the ordering of the SQLite store
#[derive(Default)]
pub struct MemoryRoster {
    records: Mutex<Vec<BirthdayRecord>>,
    fail_reads: bool,
}

impl MemoryRoster {
    pub fn with(entries: &[BirthdayEntry]) -> Self {
        let roster = Self::default();
        {
            let mut records = roster.records.lock().unwrap();
            for (i, entry) in entries.iter().enumerate() {
                records.push(BirthdayRecord {
                    id: i as i64 + 1,
                    name: entry.name.clone(),
                    month: entry.month,
                    day: entry.day,
                    gender: entry.gender,
                    external_id: entry.external_id.clone(),
                });
            }
        }
        roster
    }

    /// A roster whose reads always fail
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    fn select(
        &self,
        filter: impl Fn(&BirthdayRecord) -> bool,
        key: impl Fn(&BirthdayRecord) -> (u32, u32, i64),
    ) -> Result<Vec<BirthdayRecord>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Query("disk on fire".to_string()));
        }
        let mut selected: Vec<BirthdayRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter(r))
            .cloned()
            .collect();
        selected.sort_by_key(|r| key(r));
        Ok(selected)
    }
}

#[async_trait]
impl RosterStore for MemoryRoster {
    async fn insert(&self, entry: &BirthdayEntry) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.name == entry.name) {
            return Err(StoreError::AlreadyExists(entry.name.clone()));
        }
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(BirthdayRecord {
            id,
            name: entry.name.clone(),
            month: entry.month,
            day: entry.day,
            gender: entry.gender,
            external_id: entry.external_id.clone(),
        });
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<BirthdayRecord>, StoreError> {
        Ok(self.select(|r| r.name == name, |r| (0, 0, r.id))?.into_iter().next())
    }

    async fn get_all(&self) -> Result<Vec<BirthdayRecord>, StoreError> {
        self.select(|_| true, |r| (r.month, r.day, r.id))
    }

    async fn get_by_month(&self, month: u32) -> Result<Vec<BirthdayRecord>, StoreError> {
        self.select(|r| r.month == month, |r| (0, r.day, r.id))
    }

    async fn get_by_date(&self, month: u32, day: u32) -> Result<Vec<BirthdayRecord>, StoreError> {
        self.select(|r| r.month == month && r.day == day, |r| (0, 0, r.id))
    }

    async fn update(&self, entry: &BirthdayEntry) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.name == entry.name)
            .ok_or_else(|| StoreError::NotFound(entry.name.clone()))?;
        record.month = entry.month;
        record.day = entry.day;
        record.gender = entry.gender;
        record.external_id = entry.external_id.clone();
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.name != name);
        if records.len() == before {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

/// A message captured by `RecordingGateway`
#[derive(Clone, Debug)]
pub struct SentMessage {
    pub channel: ChannelId,
    pub text: String,
    pub at: Instant,
}

/// Gateway that records every send and can fail selected attempts
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<SentMessage>>,
    attempts: AtomicUsize,
    fail_attempts: Vec<usize>,
}

impl RecordingGateway {
    /// Fail the given zero-based send attempts
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_attempts: attempts.to_vec(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageGateway for RecordingGateway {
    async fn send(&self, destination: ChannelId, text: &str) -> Result<(), GatewayError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_attempts.contains(&attempt) {
            return Err(GatewayError::Transport {
                channel: destination,
                reason: "connection reset".to_string(),
            });
        }
        self.sent.lock().unwrap().push(SentMessage {
            channel: destination,
            text: text.to_string(),
            at: Instant::now(),
        });
        Ok(())
    }
}
