use std::sync::Arc;
use tokio::sync::mpsc;

use helpdesk::config::{BotConfig, Preset};
use helpdesk::kernel::event::{Event, InputEvent, ReportKind, TurnOutcome};
use helpdesk::kernel::reactor::SideEffect;
use helpdesk::kernel::telemetry::event::TelemetryEvent;
use helpdesk::{DialogueRouter, Reactor};

fn support_router() -> DialogueRouter {
    DialogueRouter::new(Arc::new(BotConfig::preset(Preset::Support).unwrap()))
}

fn input(text: &str) -> Event {
    Event::Input(InputEvent::text("Test", text))
}

#[tokio::test]
async fn test_run_processes_events_in_order() {
    let (event_tx, event_rx) = mpsc::channel(16);
    let (effect_tx, mut effect_rx) = mpsc::channel(16);
    let reactor = Reactor::new(support_router());

    event_tx.send(input("track order")).await.unwrap();
    event_tx.send(input("AB12345")).await.unwrap();
    event_tx.send(Event::Report(ReportKind::Stats)).await.unwrap();
    event_tx.send(Event::Shutdown).await.unwrap();

    let session = reactor.run(event_rx, effect_tx).await;

    let mut effects = Vec::new();
    while let Some(effect) = effect_rx.recv().await {
        effects.push(effect);
    }

    assert_eq!(effects.len(), 4);
    match &effects[0] {
        SideEffect::Say(reply) => assert!(matches!(reply.outcome, TurnOutcome::SlotRequested { .. })),
        other => panic!("expected reply, got {:?}", other),
    }
    match &effects[1] {
        SideEffect::Say(reply) => assert!(matches!(reply.outcome, TurnOutcome::SlotFilled { .. })),
        other => panic!("expected reply, got {:?}", other),
    }
    match &effects[2] {
        SideEffect::Report(ReportKind::Stats, report) => {
            assert_eq!(report.turns, 2);
            assert_eq!(report.telemetry.slot_stats.filled, 1);
            assert_eq!(report.transcript.len(), 4);
        }
        other => panic!("expected report, got {:?}", other),
    }
    assert!(matches!(effects[3], SideEffect::Log(_)));

    assert_eq!(session.transcript().len(), 4);
    assert!(session.dialog().is_idle());
    assert!(matches!(
        session.telemetry.events().last(),
        Some(TelemetryEvent::SessionSummary { turns: 2, .. })
    ));
}

#[tokio::test]
async fn test_run_stops_when_sender_is_dropped() {
    let (event_tx, event_rx) = mpsc::channel(16);
    let (effect_tx, _effect_rx) = mpsc::channel(16);
    let reactor = Reactor::new(support_router());

    let handle = tokio::spawn(reactor.run(event_rx, effect_tx));
    event_tx.send(input("refund")).await.unwrap();
    drop(event_tx);

    let session = handle.await.unwrap();
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.dialog().waiting_for().map(|s| s.as_str()), Some("refund_reason"));
}

#[tokio::test]
async fn test_events_after_shutdown_are_ignored() {
    let (event_tx, event_rx) = mpsc::channel(16);
    let (effect_tx, mut effect_rx) = mpsc::channel(16);
    let reactor = Reactor::new(support_router());

    event_tx.send(Event::Shutdown).await.unwrap();
    event_tx.send(input("track order")).await.unwrap();

    let session = reactor.run(event_rx, effect_tx).await;

    assert!(session.transcript().is_empty());
    assert!(matches!(effect_rx.recv().await, Some(SideEffect::Log(_))));
    assert!(effect_rx.recv().await.is_none());
}

#[test]
fn test_step_ignores_blank_input() {
    let mut reactor = Reactor::new(support_router());

    assert!(reactor.step(input("   ")).is_empty());
    assert!(reactor.step(input("")).is_empty());
    assert!(reactor.session.transcript().is_empty());
    assert_eq!(reactor.session.state.turn().index, 0);
}

#[test]
fn test_step_reset_and_shutdown() {
    let mut reactor = Reactor::new(support_router());

    reactor.step(input("track order"));
    assert!(!reactor.session.dialog().is_idle());

    let effects = reactor.step(Event::Reset);
    assert!(matches!(effects.as_slice(), [SideEffect::Log(_)]));
    assert!(reactor.session.dialog().is_idle());
    assert!(reactor.session.transcript().is_empty());

    reactor.step(Event::Shutdown);
    assert!(reactor.is_closed());
    assert!(reactor.step(input("track order")).is_empty());
}

#[test]
fn test_sessions_are_isolated() {
    let router = support_router();
    let mut first = Reactor::new(router.clone());
    let mut second = Reactor::new(router);

    first.step(input("track order"));
    second.step(input("shipping"));

    assert!(!first.session.dialog().is_idle());
    assert!(second.session.dialog().is_idle());
    assert_ne!(first.session.id, second.session.id);
    assert_eq!(first.session.transcript().len(), 2);
    assert_eq!(second.session.transcript().len(), 2);

    // An order id in the second session is not consumed as a slot value
    let effects = second.step(input("AB12345"));
    match effects.as_slice() {
        [SideEffect::Say(reply)] => assert_eq!(reply.outcome, TurnOutcome::Fallback),
        other => panic!("unexpected effects {:?}", other),
    }
}
