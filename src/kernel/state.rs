use super::event::Message;
use super::intent::IntentName;
use super::slots::SlotName;
use super::time::Turn;
use super::transcript::Transcript;

/// Single-slot dialogue memory. At most one slot can be open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingSlot {
        slot: SlotName,
        /// Why we are waiting.
        intent: IntentName,
    },
}

impl DialogState {
    pub fn waiting_for(&self) -> Option<&SlotName> {
        match self {
            DialogState::Idle => None,
            DialogState::AwaitingSlot { slot, .. } => Some(slot),
        }
    }

    pub fn intent(&self) -> Option<&IntentName> {
        match self {
            DialogState::Idle => None,
            DialogState::AwaitingSlot { intent, .. } => Some(intent),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DialogState::Idle)
    }
}

/// Strict state delta. This is the ONLY way session state mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateDelta {
    TurnStarted(Turn),
    MessageAppended(Message),
    SlotOpened { slot: SlotName, intent: IntentName },
    SlotCleared,
    Reset,
}

/// Per-session state: dialogue slot, transcript and turn clock.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    dialog: DialogState,
    transcript: Transcript,
    turn: Turn,
    // Monotonic, bumped on every reduction.
    version: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Number of reductions applied so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::TurnStarted(turn) => {
                self.turn = turn;
            }
            StateDelta::MessageAppended(message) => {
                self.transcript.push(message);
            }
            StateDelta::SlotOpened { slot, intent } => {
                // Opening replaces whatever was pending; one slot at a time.
                self.dialog = DialogState::AwaitingSlot { slot, intent };
            }
            StateDelta::SlotCleared => {
                self.dialog = DialogState::Idle;
            }
            StateDelta::Reset => {
                self.dialog = DialogState::Idle;
                self.transcript.clear();
                self.turn = Turn::new();
            }
        }
    }
}
