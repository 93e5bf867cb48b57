//! ColorCraft Generation Gate Library
//!
//! This library decides whether a coloring-page generation request may
//! proceed: it enforces a per-day usage quota persisted on the device and
//! offers a secret passcode that unlocks unlimited access for the
//! remainder of the session.
//!
//! [`gate::QuotaTracker`] owns the persisted daily counter,
//! [`gate::OverrideGate`] validates the passcode, and
//! [`flow::RequestFlow`] drives one request through both and into the
//! [`generator::GenerationService`] collaborator, holding blocked
//! requests as [`flow::PendingRequest`] values while the user decides.

pub mod config;
pub mod flow;
pub mod gate;
pub mod generator;
pub mod prompt;
