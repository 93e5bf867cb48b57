//! Daily Quota Tracker
//!
//! Owns the persisted daily counter and decides whether a generation may
//! proceed without the passcode. Reads are lazy: every query recomputes
//! "today" and re-reads the store, so a date rollover or an externally
//! repaired record takes effect immediately.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use super::clock::Clock;
use super::record::DailyRecord;
use super::store::RecordStore;
use super::unlock::SessionUnlock;

/// Default number of free generations per calendar day
pub const DEFAULT_DAILY_LIMIT: u32 = 3;

/// Tracks generations against the per-day limit
pub struct QuotaTracker<S, C> {
    store: S,
    clock: C,
    limit: u32,
    session: Arc<SessionUnlock>,
}

impl<S: RecordStore, C: Clock> QuotaTracker<S, C> {
    /// Create a tracker over the given store, clock, and session state
    pub fn new(store: S, clock: C, limit: u32, session: Arc<SessionUnlock>) -> Self {
        Self {
            store,
            clock,
            limit,
            session,
        }
    }

    /// Today's record, falling back to a fresh one when the stored record
    /// is absent, corrupt, or from an earlier day
    fn today_record(&self) -> DailyRecord {
        let today = self.clock.today();
        match self.store.load() {
            Some(record) if record.is_for(today) => record,
            Some(stale) => {
                debug!(
                    "Stored record is for {}, not today; starting a fresh count",
                    stale.date
                );
                DailyRecord::fresh(today)
            }
            None => DailyRecord::fresh(today),
        }
    }

    /// Free generations left today
    ///
    /// Callable at any time; never mutates state.
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.today_record().count)
    }

    /// Whether a new generation may proceed without the passcode prompt
    ///
    /// True when the session is unlocked or free generations remain.
    pub fn can_proceed(&self) -> bool {
        self.session.is_unlocked() || self.remaining() > 0
    }

    /// Charge one generation against today's quota and persist the count
    ///
    /// Called once per generation, before the generation attempt: the
    /// quota is charged even if the downstream generation fails, so a
    /// failing request cannot be retried for free. A stale record is
    /// overwritten with a fresh one, never merged.
    pub fn record_generation(&self) -> Result<()> {
        let mut record = self.today_record();
        record.count += 1;
        self.store
            .save(&record)
            .context("failed to record generation")?;
        debug!(
            "Recorded generation {} of {} for {}",
            record.count, self.limit, record.date
        );
        Ok(())
    }

    /// Configured daily limit
    pub fn limit(&self) -> u32 {
        self.limit
    }
}
