//! End-to-end tests for the generation gate
//!
//! Drives the full flow the way the UI does: submit requests, hit the
//! daily limit, answer the passcode prompt, and carry on unlocked.

use std::sync::Arc;

use chrono::NaiveDate;
use colorcraft_gate::flow::{RequestFlow, Resume, Submission};
use colorcraft_gate::gate::{
    DailyRecord, FixedClock, JsonFileStore, MemoryStore, OverrideGate, QuotaTracker, RecordStore,
    SessionUnlock, DEFAULT_DAILY_LIMIT,
};
use colorcraft_gate::generator::{GenerationRequest, MockGenerator};
use colorcraft_gate::prompt::{PasscodePrompt, PromptInput};
use tempfile::TempDir;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn flow_over(
    store: MemoryStore,
    clock: FixedClock,
) -> RequestFlow<MemoryStore, FixedClock, MockGenerator> {
    let session = Arc::new(SessionUnlock::new());
    let quota = QuotaTracker::new(store, clock, DEFAULT_DAILY_LIMIT, Arc::clone(&session));
    let gate = OverrideGate::new("1122", session);
    RequestFlow::new(quota, gate, MockGenerator::new())
}

fn default_flow() -> RequestFlow<MemoryStore, FixedClock, MockGenerator> {
    flow_over(MemoryStore::new(), FixedClock::new(day("2026-08-25")))
}

async fn exhaust(flow: &RequestFlow<MemoryStore, FixedClock, MockGenerator>) {
    for _ in 0..DEFAULT_DAILY_LIMIT {
        let outcome = flow.submit(GenerationRequest::new("page")).await.unwrap();
        assert!(matches!(outcome, Submission::Performed(_)));
    }
}

#[tokio::test]
async fn full_scenario_limit_then_passcode_then_fourth_generation() {
    let flow = default_flow();

    // Three generations succeed and use up the quota
    exhaust(&flow).await;
    assert_eq!(flow.remaining(), 0);

    // The fourth is held for a passcode
    let pending = match flow.submit(GenerationRequest::new("a unicorn")).await.unwrap() {
        Submission::LimitReached(pending) => pending,
        other => panic!("expected LimitReached, got {other:?}"),
    };

    // Wrong code: rejected, still blocked
    let pending = match flow.resume(pending, "0000").await.unwrap() {
        Resume::Rejected(pending) => pending,
        other => panic!("expected Rejected, got {other:?}"),
    };
    assert!(!flow.is_unlocked());

    // Correct code: the held request is performed
    let image = match flow.resume(pending, "1122").await.unwrap() {
        Resume::Performed(image) => image,
        other => panic!("expected Performed, got {other:?}"),
    };
    assert_eq!(image.prompt, "a unicorn");
    assert!(flow.is_unlocked());

    // A fifth generation proceeds without the limit blocking it
    let outcome = flow.submit(GenerationRequest::new("a dragon")).await.unwrap();
    assert!(matches!(outcome, Submission::Performed(_)));
}

#[tokio::test]
async fn unlock_lasts_for_the_session_but_not_past_a_restart() {
    let clock = FixedClock::new(day("2026-08-25"));
    let at_limit = || {
        MemoryStore::with_record(DailyRecord {
            date: "2026-08-25".to_string(),
            count: 3,
        })
    };

    let flow = flow_over(at_limit(), clock.clone());
    let pending = match flow.submit(GenerationRequest::new("held")).await.unwrap() {
        Submission::LimitReached(pending) => pending,
        other => panic!("expected LimitReached, got {other:?}"),
    };
    flow.resume(pending, "1122").await.unwrap();
    assert!(flow.is_unlocked());

    // A new session starts locked with a fresh quota evaluation
    let restarted = flow_over(at_limit(), clock);
    assert!(!restarted.is_unlocked());
    let outcome = restarted
        .submit(GenerationRequest::new("after restart"))
        .await
        .unwrap();
    assert!(matches!(outcome, Submission::LimitReached(_)));
}

#[tokio::test]
async fn date_rollover_resets_an_exhausted_quota() {
    let clock = FixedClock::new(day("2026-08-25"));
    let flow = flow_over(MemoryStore::new(), clock.clone());

    exhaust(&flow).await;
    assert_eq!(flow.remaining(), 0);

    clock.advance_days(1);
    assert_eq!(flow.remaining(), DEFAULT_DAILY_LIMIT);

    let outcome = flow.submit(GenerationRequest::new("new day")).await.unwrap();
    assert!(matches!(outcome, Submission::Performed(_)));
}

#[tokio::test]
async fn corrupt_record_on_disk_degrades_to_full_quota() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("daily-generations.json");
    std::fs::write(&path, "\0\0 definitely not json").unwrap();

    let session = Arc::new(SessionUnlock::new());
    let quota = QuotaTracker::new(
        JsonFileStore::new(&path),
        FixedClock::new(day("2026-08-25")),
        DEFAULT_DAILY_LIMIT,
        session,
    );

    assert_eq!(quota.remaining(), DEFAULT_DAILY_LIMIT);
    assert!(quota.can_proceed());

    // The next write replaces the corrupt content with a valid record
    quota.record_generation().unwrap();
    let reloaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(reloaded.count, 1);
    assert_eq!(reloaded.date, "2026-08-25");
}

#[tokio::test]
async fn quota_persists_across_sessions_on_the_same_day() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("daily-generations.json");
    let clock = FixedClock::new(day("2026-08-25"));

    {
        let session = Arc::new(SessionUnlock::new());
        let quota = QuotaTracker::new(
            JsonFileStore::new(&path),
            clock.clone(),
            DEFAULT_DAILY_LIMIT,
            session,
        );
        quota.record_generation().unwrap();
        quota.record_generation().unwrap();
    }

    // A second session the same day sees the persisted count
    let session = Arc::new(SessionUnlock::new());
    let quota = QuotaTracker::new(JsonFileStore::new(&path), clock, DEFAULT_DAILY_LIMIT, session);
    assert_eq!(quota.remaining(), 1);
}

#[tokio::test]
async fn scripted_prompt_drives_retry_then_unlock() {
    let flow = default_flow();
    exhaust(&flow).await;

    let prompt = PasscodePrompt::scripted(vec![
        PromptInput::Code("9999".to_string()),
        PromptInput::Code("1122".to_string()),
    ]);

    let mut pending = match flow.submit(GenerationRequest::new("held")).await.unwrap() {
        Submission::LimitReached(pending) => pending,
        other => panic!("expected LimitReached, got {other:?}"),
    };

    let mut input = prompt.ask(flow.limit()).unwrap();
    let image = loop {
        match input {
            PromptInput::Cancelled => panic!("prompt should not cancel in this script"),
            PromptInput::Code(code) => match flow.resume(pending, &code).await.unwrap() {
                Resume::Performed(image) => break image,
                Resume::Rejected(rejected) => {
                    pending = rejected;
                    input = prompt.ask_again().unwrap();
                }
            },
        }
    };

    assert_eq!(image.prompt, "held");
    assert!(flow.is_unlocked());
}

#[tokio::test]
async fn cancelled_prompt_discards_the_request() {
    let flow = default_flow();
    exhaust(&flow).await;

    let prompt = PasscodePrompt::scripted(vec![PromptInput::Cancelled]);

    let pending = match flow.submit(GenerationRequest::new("held")).await.unwrap() {
        Submission::LimitReached(pending) => pending,
        other => panic!("expected LimitReached, got {other:?}"),
    };

    match prompt.ask(flow.limit()).unwrap() {
        PromptInput::Cancelled => flow.cancel(pending),
        PromptInput::Code(_) => panic!("script should cancel"),
    }

    // Nothing was charged or generated for the held request
    assert_eq!(flow.remaining(), 0);
    assert!(!flow.is_unlocked());
}
