use std::sync::Once;

use avdash_core::{
    ActionChain, ChainEffect, ChainEvent, ChainOutcome, ChainState, ChainStep,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dash_logging::initialize_for_tests);
}

#[test]
fn happy_path_runs_strip_then_rescan_then_fetches_library() {
    init_logging();
    let mut chain = ActionChain::new();

    let effects = chain.advance(ChainEvent::Triggered);
    assert_eq!(effects, vec![ChainEffect::StartAction(ChainStep::StripTags)]);
    assert_eq!(chain.state(), &ChainState::Running(ChainStep::StripTags));

    let effects = chain.advance(ChainEvent::StartAcked);
    assert_eq!(effects, vec![ChainEffect::PollAction(ChainStep::StripTags)]);

    // Still running: poll again, no state change.
    let effects = chain.advance(ChainEvent::Polled { running: true });
    assert_eq!(effects, vec![ChainEffect::PollAction(ChainStep::StripTags)]);
    assert_eq!(chain.state(), &ChainState::Polling(ChainStep::StripTags));

    // Strip finished: rescan starts.
    let effects = chain.advance(ChainEvent::Polled { running: false });
    assert_eq!(effects, vec![ChainEffect::StartAction(ChainStep::Rescan)]);

    let effects = chain.advance(ChainEvent::StartAcked);
    assert_eq!(effects, vec![ChainEffect::PollAction(ChainStep::Rescan)]);

    let effects = chain.advance(ChainEvent::Polled { running: false });
    assert_eq!(effects, vec![ChainEffect::FetchLibrary]);
    assert!(chain.is_idle());
    assert_eq!(chain.last_outcome(), Some(&ChainOutcome::Succeeded));
}

#[test]
fn strip_start_failure_never_reaches_rescan() {
    init_logging();
    let mut chain = ActionChain::new();

    chain.advance(ChainEvent::Triggered);
    let effects = chain.advance(ChainEvent::StartFailed("409 already running".to_string()));

    assert!(effects.is_empty());
    assert!(chain.is_idle());
    assert_eq!(
        chain.last_outcome(),
        Some(&ChainOutcome::Failed(
            ChainStep::StripTags,
            "409 already running".to_string()
        ))
    );
}

#[test]
fn rescan_start_failure_halts_without_rollback_effects() {
    init_logging();
    let mut chain = ActionChain::new();

    chain.advance(ChainEvent::Triggered);
    chain.advance(ChainEvent::StartAcked);
    chain.advance(ChainEvent::Polled { running: false });
    let effects = chain.advance(ChainEvent::StartFailed("controller down".to_string()));

    assert!(effects.is_empty());
    assert_eq!(
        chain.last_outcome(),
        Some(&ChainOutcome::Failed(
            ChainStep::Rescan,
            "controller down".to_string()
        ))
    );
}

#[test]
fn retrigger_after_failure_clears_the_old_outcome() {
    init_logging();
    let mut chain = ActionChain::new();
    chain.advance(ChainEvent::Triggered);
    chain.advance(ChainEvent::StartFailed("boom".to_string()));

    let effects = chain.advance(ChainEvent::Triggered);
    assert_eq!(effects, vec![ChainEffect::StartAction(ChainStep::StripTags)]);
    assert_eq!(chain.last_outcome(), None);
}

#[test]
fn out_of_order_events_are_ignored() {
    init_logging();
    let mut chain = ActionChain::new();

    assert!(chain.advance(ChainEvent::StartAcked).is_empty());
    assert!(chain.advance(ChainEvent::Polled { running: false }).is_empty());
    assert!(chain.is_idle());

    chain.advance(ChainEvent::Triggered);
    // A second trigger mid-run does nothing.
    assert!(chain.advance(ChainEvent::Triggered).is_empty());
    assert_eq!(chain.state(), &ChainState::Running(ChainStep::StripTags));
}
