/// The two maintenance steps, run strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep {
    /// Normalize messy filenames on the library share.
    StripTags,
    /// Rescan the library so the report reflects the renames.
    Rescan,
}

impl ChainStep {
    /// Name of the remote action this step starts and polls.
    pub fn action_name(self) -> &'static str {
        match self {
            ChainStep::StripTags => "strip_tags",
            ChainStep::Rescan => "scanner",
        }
    }
}

/// Where the chain currently is. Ephemeral: never persisted, discarded when
/// the owning view goes away.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainState {
    #[default]
    Idle,
    /// Start request for the step has been issued, acknowledgment pending.
    Running(ChainStep),
    /// Step acknowledged; its status is polled until it stops running.
    Polling(ChainStep),
}

/// How the last run ended. Kept alongside the state so the view can show a
/// success or failure message after the chain returns to idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    Succeeded,
    Failed(ChainStep, String),
}

/// Inputs that advance the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    /// Operator pressed the button.
    Triggered,
    /// The start request for the current step was acknowledged.
    StartAcked,
    /// The start request for the current step failed.
    StartFailed(String),
    /// A status poll for the current step came back.
    Polled { running: bool },
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEffect {
    StartAction(ChainStep),
    PollAction(ChainStep),
    /// The chain finished; fetch a fresh library snapshot.
    FetchLibrary,
}

/// Explicit state machine for the strip-tags-then-rescan workflow.
///
/// A strict sequence with no parallelism and no automatic retry: a start
/// failure at either step returns the chain to idle with a failure outcome
/// and emits nothing further. The rename step's result is never rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionChain {
    state: ChainState,
    last_outcome: Option<ChainOutcome>,
}

impl ActionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }

    pub fn last_outcome(&self) -> Option<&ChainOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.state == ChainState::Idle
    }

    /// Applies one event and returns the effects the driver must execute.
    /// Events that make no sense in the current state are ignored.
    pub fn advance(&mut self, event: ChainEvent) -> Vec<ChainEffect> {
        match (self.state.clone(), event) {
            (ChainState::Idle, ChainEvent::Triggered) => {
                self.state = ChainState::Running(ChainStep::StripTags);
                self.last_outcome = None;
                vec![ChainEffect::StartAction(ChainStep::StripTags)]
            }
            (ChainState::Running(step), ChainEvent::StartAcked) => {
                self.state = ChainState::Polling(step);
                vec![ChainEffect::PollAction(step)]
            }
            (ChainState::Running(step), ChainEvent::StartFailed(message)) => {
                self.state = ChainState::Idle;
                self.last_outcome = Some(ChainOutcome::Failed(step, message));
                Vec::new()
            }
            (ChainState::Polling(step), ChainEvent::Polled { running: true }) => {
                vec![ChainEffect::PollAction(step)]
            }
            (ChainState::Polling(ChainStep::StripTags), ChainEvent::Polled { running: false }) => {
                self.state = ChainState::Running(ChainStep::Rescan);
                vec![ChainEffect::StartAction(ChainStep::Rescan)]
            }
            (ChainState::Polling(ChainStep::Rescan), ChainEvent::Polled { running: false }) => {
                self.state = ChainState::Idle;
                self.last_outcome = Some(ChainOutcome::Succeeded);
                vec![ChainEffect::FetchLibrary]
            }
            // Stale or out-of-order event; no transition.
            _ => Vec::new(),
        }
    }
}
