//! External collaborator interfaces
//!
//! The engine reads profiles and intake history through these traits; the
//! real implementations (storage, platform bridges) live outside this
//! repository and are consumed as opaque async sources. The in-memory
//! implementations back the tests and double as reference implementations.

use crate::error::EngineResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use nutrition_insights_shared::{IntakeRecord, UserProfile};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Read-only access to user profiles
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch a user's profile; `None` for unknown users.
    async fn profile(&self, user_id: Uuid) -> EngineResult<Option<UserProfile>>;
}

/// Read-only access to logged intake history
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch a user's intake records inside `[start, end]` (inclusive).
    async fn records(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<IntakeRecord>>;
}

/// In-memory profile store
#[derive(Default)]
pub struct InMemoryProfileProvider {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: Uuid, profile: UserProfile) {
        self.profiles
            .write()
            .expect("profile lock poisoned")
            .insert(user_id, profile);
    }
}

#[async_trait]
impl ProfileProvider for InMemoryProfileProvider {
    async fn profile(&self, user_id: Uuid) -> EngineResult<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .expect("profile lock poisoned")
            .get(&user_id)
            .cloned())
    }
}

/// In-memory intake history store
#[derive(Default)]
pub struct InMemoryHistoryProvider {
    records: RwLock<HashMap<Uuid, Vec<IntakeRecord>>>,
}

impl InMemoryHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, user_id: Uuid, record: IntakeRecord) {
        self.records
            .write()
            .expect("history lock poisoned")
            .entry(user_id)
            .or_default()
            .push(record);
    }
}

#[async_trait]
impl HistoryProvider for InMemoryHistoryProvider {
    async fn records(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<IntakeRecord>> {
        Ok(self
            .records
            .read()
            .expect("history lock poisoned")
            .get(&user_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.date >= start && r.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
