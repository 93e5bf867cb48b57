//! Generation Request Flow
//!
//! Orchestrates one generation attempt through the gate:
//!
//! 1. Ask the quota tracker whether the request may proceed.
//! 2. If yes: charge the quota, then invoke the generation service.
//! 3. If no: hand the request back as a [`PendingRequest`]; the caller
//!    collects a passcode and either resumes or cancels.
//!
//! Charging happens before the generation attempt on purpose: a failed
//! generation still costs one use, so failing requests cannot be retried
//! for free. Arbitrary time may pass between a `LimitReached` result and
//! the resume or cancel; the pending value is plain data and nothing is
//! in flight while the caller waits for input.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::gate::{Clock, OverrideGate, QuotaTracker, RecordStore};
use crate::generator::{GeneratedImage, GenerationRequest, GenerationService};

/// A request held while the passcode prompt is open
///
/// Move-only: resuming or cancelling consumes it, so a discarded request
/// cannot be replayed later.
#[derive(Debug)]
pub struct PendingRequest {
    request: GenerationRequest,
}

impl PendingRequest {
    /// The stored request parameters, exactly as originally submitted
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Outcome of submitting a generation request
#[derive(Debug)]
pub enum Submission {
    /// The request was allowed and performed
    Performed(GeneratedImage),

    /// The daily limit is exhausted; resume with a passcode or cancel
    LimitReached(PendingRequest),
}

/// Outcome of resuming a pending request with a passcode
#[derive(Debug)]
pub enum Resume {
    /// The passcode was accepted and the stored request performed
    Performed(GeneratedImage),

    /// The passcode was rejected; the pending request is handed back so
    /// the user can retry or cancel
    Rejected(PendingRequest),
}

/// Gate-enforcing orchestrator around a generation service
pub struct RequestFlow<S, C, G> {
    quota: QuotaTracker<S, C>,
    gate: OverrideGate,
    generator: G,
}

impl<S, C, G> RequestFlow<S, C, G>
where
    S: RecordStore,
    C: Clock,
    G: GenerationService,
{
    /// Create a flow over the given tracker, gate, and generator
    ///
    /// The tracker and gate must share one [`crate::gate::SessionUnlock`]
    /// so an accepted passcode disables the quota check.
    pub fn new(quota: QuotaTracker<S, C>, gate: OverrideGate, generator: G) -> Self {
        Self {
            quota,
            gate,
            generator,
        }
    }

    /// Submit a generation request through the gate
    pub async fn submit(&self, request: GenerationRequest) -> Result<Submission> {
        if !self.quota.can_proceed() {
            info!("Daily limit reached, holding request for passcode");
            return Ok(Submission::LimitReached(PendingRequest { request }));
        }

        let image = self.perform(&request).await?;
        Ok(Submission::Performed(image))
    }

    /// Resume a pending request with a submitted passcode
    ///
    /// On a correct code the session unlocks and the stored request is
    /// performed verbatim, bypassing the quota check. On a wrong code the
    /// pending request is returned unchanged for another attempt.
    pub async fn resume(&self, pending: PendingRequest, code: &str) -> Result<Resume> {
        if !self.gate.verify(code) {
            debug!("Passcode rejected, pending request retained");
            return Ok(Resume::Rejected(pending));
        }

        let image = self.perform(&pending.request).await?;
        Ok(Resume::Performed(image))
    }

    /// Discard a pending request without generating or charging quota
    pub fn cancel(&self, pending: PendingRequest) {
        info!(
            "Cancelled pending generation: {}",
            pending.request.description
        );
        drop(pending);
    }

    /// Charge the quota, then invoke the generator
    async fn perform(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        // Charge before generating: a downstream failure still costs a use
        self.quota.record_generation()?;

        self.generator
            .generate(request)
            .await
            .map_err(|err| {
                warn!("Generation failed after quota was charged: {err:#}");
                err
            })
            .context("generation failed")
    }

    /// Free generations left today
    pub fn remaining(&self) -> u32 {
        self.quota.remaining()
    }

    /// Configured daily limit
    pub fn limit(&self) -> u32 {
        self.quota.limit()
    }

    /// Whether the session has unlimited access
    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }
}
