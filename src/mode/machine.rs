#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    #[default]
    Inactive,
    Active,
}

impl ModeState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    Activate,
    Deactivate,
    Toggle,
}

impl ModeEvent {
    pub const fn set(active: bool) -> Self {
        if active {
            Self::Activate
        } else {
            Self::Deactivate
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: ModeState,
    pub event: ModeEvent,
    pub to: ModeState,
}

impl ModeTransition {
    pub const fn changed(&self) -> bool {
        !matches!(
            (self.from, self.to),
            (ModeState::Active, ModeState::Active) | (ModeState::Inactive, ModeState::Inactive)
        )
    }
}

/// Two-state machine; every event is accepted and repeating the current
/// state is a no-op transition.
#[derive(Debug, Default)]
pub struct ModeMachine {
    state: ModeState,
    #[cfg(test)]
    transition_history: Vec<ModeTransition>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn next_state(&self, event: ModeEvent) -> ModeState {
        match (self.state, event) {
            (_, ModeEvent::Activate) => ModeState::Active,
            (_, ModeEvent::Deactivate) => ModeState::Inactive,
            (ModeState::Inactive, ModeEvent::Toggle) => ModeState::Active,
            (ModeState::Active, ModeEvent::Toggle) => ModeState::Inactive,
        }
    }

    pub fn transition(&mut self, event: ModeEvent) -> ModeTransition {
        let record = ModeTransition {
            from: self.state,
            event,
            to: self.next_state(event),
        };
        tracing::debug!(from = ?record.from, event = ?event, to = ?record.to, "mode transition");
        self.state = record.to;
        #[cfg(test)]
        if record.changed() {
            self.transition_history.push(record);
        }
        record
    }
}

#[cfg(test)]
impl ModeMachine {
    fn history(&self) -> &[ModeTransition] {
        &self.transition_history
    }
}

impl std::fmt::Display for ModeMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModeState::{:?}", self.state)
    }
}
