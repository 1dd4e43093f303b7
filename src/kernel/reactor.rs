use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::event::{Event, ReportKind, Reply};
use super::router::DialogueRouter;
use super::session::{Session, SessionReport};

#[derive(Debug, Clone)]
pub enum SideEffect {
    Log(String),
    Say(Reply),
    Report(ReportKind, SessionReport),
}

/// Owns one session and feeds it events strictly one at a time.
pub struct Reactor {
    router: DialogueRouter,
    pub session: Session,
    closed: bool,
}

impl Reactor {
    pub fn new(router: DialogueRouter) -> Self {
        let session = router.open_session();
        Self::with_session(router, session)
    }

    pub fn with_session(router: DialogueRouter, session: Session) -> Self {
        Self {
            router,
            session,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pure Step: Advances the session. Returns SideEffects to be executed by
    /// the driver. MUST NOT await I/O.
    pub fn step(&mut self, event: Event) -> Vec<SideEffect> {
        if self.closed {
            return Vec::new();
        }

        match event {
            Event::Input(input) => {
                if input.text.trim().is_empty() {
                    return Vec::new();
                }
                debug!(source = %input.source, "input received");
                let reply = self.router.handle_turn(&mut self.session, &input.text);
                vec![SideEffect::Say(reply)]
            }
            Event::Reset => {
                self.router.reset(&mut self.session);
                vec![SideEffect::Log("Session reset.".to_string())]
            }
            Event::Report(kind) => vec![SideEffect::Report(kind, self.session.report())],
            Event::Shutdown => {
                self.closed = true;
                vec![SideEffect::Log("Goodbye.".to_string())]
            }
        }
    }

    /// Async Driver Loop. Returns the session once the event channel closes
    /// or a `Shutdown` event is processed.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Event>, tx: mpsc::Sender<SideEffect>) -> Session {
        info!(session = %self.session.id, "reactor loop started");

        while let Some(event) = rx.recv().await {
            for effect in self.step(event) {
                if tx.send(effect).await.is_err() {
                    warn!("side-effect receiver dropped, stopping reactor");
                    self.closed = true;
                    break;
                }
            }
            if self.closed {
                break;
            }
        }

        let summary = self.session.telemetry.aggregate_session(self.session.state.turn().index);
        self.session.telemetry.record(summary);
        info!(session = %self.session.id, turns = self.session.state.turn().index, "reactor loop stopped");

        self.session
    }
}
