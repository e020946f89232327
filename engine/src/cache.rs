//! Caller-owned analysis result cache
//!
//! The engine never caches internally; a caller may keep completed reports
//! keyed by (user, date range) and must invalidate when new intake data for
//! a covered range arrives. Eviction beyond that is the caller's policy.

use crate::service::AnalysisReport;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
}

/// In-memory report cache keyed by (user, date range)
#[derive(Default)]
pub struct AnalysisCache {
    entries: RwLock<HashMap<CacheKey, AnalysisReport>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Option<AnalysisReport> {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .get(&CacheKey {
                user_id,
                start,
                end,
            })
            .cloned()
    }

    pub fn insert(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        report: AnalysisReport,
    ) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(
                CacheKey {
                    user_id,
                    start,
                    end,
                },
                report,
            );
    }

    /// Drop every cached report for this user whose range covers `date`.
    ///
    /// Called when a new intake record lands on that date.
    pub fn invalidate(&self, user_id: Uuid, date: NaiveDate) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .retain(|key, _| {
                key.user_id != user_id || date < key.start || date > key.end
            });
    }

    /// Drop every cached report for a user
    pub fn clear_user(&self, user_id: Uuid) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .retain(|key, _| key.user_id != user_id);
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let cache = AnalysisCache::new();
        let user = Uuid::new_v4();
        cache.insert(user, day(1), day(14), AnalysisReport::empty());

        assert!(cache.get(user, day(1), day(14)).is_some());
        // Different range is a different key
        assert!(cache.get(user, day(1), day(7)).is_none());
        // Different user never sees the entry
        assert!(cache.get(Uuid::new_v4(), day(1), day(14)).is_none());
    }

    #[test]
    fn test_invalidate_covering_ranges_only() {
        let cache = AnalysisCache::new();
        let user = Uuid::new_v4();
        cache.insert(user, day(1), day(14), AnalysisReport::empty());
        cache.insert(user, day(20), day(27), AnalysisReport::empty());

        // New record on day 10 only touches the first range
        cache.invalidate(user, day(10));
        assert!(cache.get(user, day(1), day(14)).is_none());
        assert!(cache.get(user, day(20), day(27)).is_some());
    }

    #[test]
    fn test_invalidate_is_per_user() {
        let cache = AnalysisCache::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        cache.insert(alice, day(1), day(14), AnalysisReport::empty());
        cache.insert(bob, day(1), day(14), AnalysisReport::empty());

        cache.invalidate(alice, day(5));
        assert!(cache.get(alice, day(1), day(14)).is_none());
        assert!(cache.get(bob, day(1), day(14)).is_some());
    }

    #[test]
    fn test_clear_user() {
        let cache = AnalysisCache::new();
        let user = Uuid::new_v4();
        cache.insert(user, day(1), day(7), AnalysisReport::empty());
        cache.insert(user, day(8), day(14), AnalysisReport::empty());
        cache.clear_user(user);
        assert!(cache.is_empty());
    }
}
