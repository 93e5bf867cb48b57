//! Daily Quota and Passcode Override Gate
//!
//! This module decides whether a generation request may proceed, tracks
//! the decision in a persisted per-day counter, and lets a secret
//! passcode disable the quota check for the remainder of the session.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     RequestFlow                      │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌───────────────┐           ┌────────────────────┐  │
//! │  │ QuotaTracker  │◄─shared──►│ OverrideGate       │  │
//! │  │ (daily count) │  session  │ (Locked/Unlocked)  │  │
//! │  └───────┬───────┘           └────────────────────┘  │
//! ├──────────┼───────────────────────────────────────────┤
//! │  ┌───────▼───────────────────────────────────────┐   │
//! │  │   RecordStore (one JSON record on disk)       │   │
//! │  └───────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod clock;
pub mod error;
pub mod quota;
pub mod record;
pub mod store;
pub mod unlock;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use quota::{QuotaTracker, DEFAULT_DAILY_LIMIT};
pub use record::DailyRecord;
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use unlock::{OverrideGate, SessionUnlock};
