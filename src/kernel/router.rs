use std::sync::Arc;
use tracing::{debug, info};

use super::event::{Message, Reply, TurnOutcome};
use super::intent::{IntentClassifier, IntentName, MatchOutcome};
use super::session::Session;
use super::slots::{SlotName, SlotRule};
use super::state::{DialogState, StateDelta};
use super::telemetry::event::{ResolutionKind, SlotEventKind, TelemetryEvent};
use crate::config::{BotConfig, ResponseKey};

/// Decision for one turn, before it is applied to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnPlan {
    pub text: String,
    pub outcome: TurnOutcome,
    pub deltas: Vec<StateDelta>,
    pub telemetry: Vec<TelemetryEvent>,
}

/// Dialogue router: Idle <-> AwaitingSlot(slot).
///
/// - Idle + utterance: classify. An intent with a follow-up slot opens it,
///   any other intent gets its canned reply. No match falls through to the
///   FAQ book (if any), then to the default reply.
/// - AwaitingSlot + utterance: validate against the slot rule. Valid values
///   are consumed and the slot cleared; invalid ones get a re-prompt and the
///   slot stays open. There is no timeout.
///
/// The router holds only immutable configuration. All per-user state lives in
/// the `Session` passed to each call.
#[derive(Debug, Clone)]
pub struct DialogueRouter {
    config: Arc<BotConfig>,
    classifier: IntentClassifier,
}

impl DialogueRouter {
    pub fn new(config: Arc<BotConfig>) -> Self {
        let classifier = IntentClassifier::new(config.clone());
        Self { config, classifier }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Fresh session, greeting already in the transcript.
    pub fn open_session(&self) -> Session {
        let mut session = Session::new();
        self.seed_greeting(&mut session);
        info!(session = %session.id, bot = %self.config.name, "session opened");
        session
    }

    pub fn reset(&self, session: &mut Session) {
        session.state.reduce(StateDelta::Reset);
        session.telemetry.record(TelemetryEvent::SessionReset);
        self.seed_greeting(session);
        info!(session = %session.id, "session reset");
    }

    fn seed_greeting(&self, session: &mut Session) {
        if let Some(greeting) = &self.config.greeting {
            let turn = session.state.turn();
            session
                .state
                .reduce(StateDelta::MessageAppended(Message::assistant(greeting, turn)));
        }
    }

    /// Runs one full turn: records the user message, decides, applies the
    /// decision and records the reply. Never fails.
    pub fn handle_turn(&self, session: &mut Session, utterance: &str) -> Reply {
        let turn = session.state.turn().next();
        session.state.reduce(StateDelta::TurnStarted(turn));
        session
            .state
            .reduce(StateDelta::MessageAppended(Message::user(utterance, turn)));

        let plan = self.plan(session.state.dialog(), utterance);

        for delta in plan.deltas {
            session.state.reduce(delta);
        }
        for event in plan.telemetry {
            session.telemetry.record(event);
        }

        session
            .state
            .reduce(StateDelta::MessageAppended(Message::assistant(&plan.text, turn)));

        debug!(session = %session.id, turn = turn.index, outcome = ?plan.outcome, "turn complete");

        Reply {
            turn,
            text: plan.text,
            outcome: plan.outcome,
        }
    }

    /// Pure decision: (DialogState, utterance) -> TurnPlan.
    pub fn plan(&self, dialog: &DialogState, utterance: &str) -> TurnPlan {
        match dialog {
            DialogState::AwaitingSlot { slot, intent } => self.plan_slot_fill(slot, intent, utterance),
            DialogState::Idle => self.plan_idle(utterance),
        }
    }

    fn plan_slot_fill(&self, slot: &SlotName, intent: &IntentName, utterance: &str) -> TurnPlan {
        let value = utterance.trim();
        let accepted = match self.config.slot_rule(slot) {
            Some(rule) => rule.accepts(value),
            None => SlotRule::AnyText.accepts(value),
        };

        if accepted {
            debug!(slot = %slot, intent = %intent, "slot filled");
            TurnPlan {
                text: self.respond(ResponseKey::SlotFilled(slot.clone()), value),
                outcome: TurnOutcome::SlotFilled {
                    slot: slot.clone(),
                    value: value.to_string(),
                },
                deltas: vec![StateDelta::SlotCleared],
                telemetry: vec![TelemetryEvent::SlotLifecycle {
                    slot: slot.clone(),
                    event: SlotEventKind::Filled,
                }],
            }
        } else {
            debug!(slot = %slot, intent = %intent, "slot value rejected");
            TurnPlan {
                text: self.respond(ResponseKey::SlotReprompt(slot.clone()), value),
                outcome: TurnOutcome::SlotRejected { slot: slot.clone() },
                deltas: Vec::new(),
                telemetry: vec![TelemetryEvent::SlotLifecycle {
                    slot: slot.clone(),
                    event: SlotEventKind::Rejected,
                }],
            }
        }
    }

    fn plan_idle(&self, utterance: &str) -> TurnPlan {
        let input = utterance.trim();
        let outcome = self.classifier.classify(utterance);
        let mut telemetry = vec![TelemetryEvent::IntentResolved {
            kind: ResolutionKind::from(&outcome),
        }];

        let intent = match outcome {
            MatchOutcome::Matched { intent, .. } => intent,
            MatchOutcome::NoMatch => return self.plan_unmatched(input, telemetry),
        };

        let text = self.respond(ResponseKey::Intent(intent.clone()), input);

        match self.config.expected_slot(&intent) {
            Some(slot) => {
                telemetry.push(TelemetryEvent::SlotLifecycle {
                    slot: slot.clone(),
                    event: SlotEventKind::Opened,
                });
                TurnPlan {
                    text,
                    outcome: TurnOutcome::SlotRequested {
                        intent: intent.clone(),
                        slot: slot.clone(),
                    },
                    deltas: vec![StateDelta::SlotOpened {
                        slot: slot.clone(),
                        intent,
                    }],
                    telemetry,
                }
            }
            None => TurnPlan {
                text,
                outcome: TurnOutcome::Answered { intent },
                deltas: Vec::new(),
                telemetry,
            },
        }
    }

    fn plan_unmatched(&self, input: &str, mut telemetry: Vec<TelemetryEvent>) -> TurnPlan {
        if let Some(faq) = &self.config.faq {
            match faq.lookup(input) {
                Some(hit) => {
                    telemetry.push(TelemetryEvent::FaqLookup { hit: true });
                    return TurnPlan {
                        text: faq.render_answer(&hit),
                        outcome: TurnOutcome::FaqAnswered { question: hit.question },
                        deltas: Vec::new(),
                        telemetry,
                    };
                }
                None => {
                    telemetry.push(TelemetryEvent::FaqLookup { hit: false });
                    if let Some(text) = faq.topics_reply() {
                        return TurnPlan {
                            text,
                            outcome: TurnOutcome::TopicsSuggested,
                            deltas: Vec::new(),
                            telemetry,
                        };
                    }
                }
            }
        }

        telemetry.push(TelemetryEvent::Fallback);
        TurnPlan {
            text: self.respond(ResponseKey::Fallback, input),
            outcome: TurnOutcome::Fallback,
            deltas: Vec::new(),
            telemetry,
        }
    }

    fn respond(&self, key: ResponseKey, input: &str) -> String {
        let vars = [("input", input)];
        self.config
            .responses
            .render(&key, &vars)
            .or_else(|| self.config.responses.render(&ResponseKey::Fallback, &vars))
            .unwrap_or_default()
    }
}
