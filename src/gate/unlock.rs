//! Session Unlock State and Passcode Override Gate
//!
//! Two states: Locked (initial) and Unlocked (terminal for the session).
//! A correct passcode flips the session to Unlocked; nothing flips it
//! back, and the state is never persisted, so every new session starts
//! Locked with a fresh quota evaluation.
//!
//! The passcode is a soft quota-override device, not an authentication
//! mechanism: plain trimmed string comparison, no hashing, no attempt
//! counting, no lockout, unlimited retries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

/// Session-scoped unlocked flag, shared between the gate and the tracker
///
/// Starts locked. Flips at most once per session.
#[derive(Debug, Default)]
pub struct SessionUnlock {
    unlocked: AtomicBool,
}

impl SessionUnlock {
    /// Create a fresh locked session state
    pub fn new() -> Self {
        Self {
            unlocked: AtomicBool::new(false),
        }
    }

    /// Whether the session has been unlocked
    pub fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::SeqCst)
    }

    fn unlock(&self) {
        self.unlocked.store(true, Ordering::SeqCst);
    }
}

/// Passcode gate that unlocks the session for unlimited generations
#[derive(Debug, Clone)]
pub struct OverrideGate {
    passcode: String,
    session: Arc<SessionUnlock>,
}

impl OverrideGate {
    /// Create a gate for the given passcode and session state
    pub fn new(passcode: impl Into<String>, session: Arc<SessionUnlock>) -> Self {
        Self {
            passcode: passcode.into(),
            session,
        }
    }

    /// Verify a submitted passcode
    ///
    /// Input is trimmed, then compared by exact equality. A match unlocks
    /// the session and returns true; a mismatch returns false and leaves
    /// the state untouched. Once unlocked, any input verifies true.
    pub fn verify(&self, code: &str) -> bool {
        if self.session.is_unlocked() {
            debug!("Session already unlocked, passcode ignored");
            return true;
        }

        if code.trim() == self.passcode {
            self.session.unlock();
            info!("Session unlocked, daily quota disabled until restart");
            true
        } else {
            debug!("Incorrect passcode submitted");
            false
        }
    }

    /// Whether the session owning this gate is unlocked
    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }
}
