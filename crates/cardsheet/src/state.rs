//! Panel and session state

use cardsheet_animation::AnimatingPosition;

use crate::session::TransitionSession;

/// Resting position of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelState {
    Expanded,
    #[default]
    Collapsed,
}

impl PanelState {
    /// The state a transition from here moves toward
    pub fn next(self) -> Self {
        match self {
            PanelState::Expanded => PanelState::Collapsed,
            PanelState::Collapsed => PanelState::Expanded,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

/// Whether a transition is in flight
#[derive(Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running(TransitionSession),
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn session(&self) -> Option<&TransitionSession> {
        match self {
            SessionState::Running(session) => Some(session),
            SessionState::Idle => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut TransitionSession> {
        match self {
            SessionState::Running(session) => Some(session),
            SessionState::Idle => None,
        }
    }
}

/// How a transition session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The state the session was moving toward
    pub target: PanelState,
    /// `End` when it arrived, `Start` when it was reversed back
    pub position: AnimatingPosition,
    /// The panel's resting state afterwards
    pub resting: PanelState,
}

impl TransitionOutcome {
    pub fn new(target: PanelState, position: AnimatingPosition) -> Self {
        let resting = match position {
            AnimatingPosition::End => target,
            AnimatingPosition::Start => target.next(),
        };
        Self {
            target,
            position,
            resting,
        }
    }

    /// Whether the panel changed state
    pub fn flipped(&self) -> bool {
        self.position == AnimatingPosition::End
    }
}
