use std::collections::VecDeque;

use super::event::{ResolutionKind, SlotEventKind, TelemetryEvent};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub resolution_stats: ResolutionStats,
    pub slot_stats: SlotStats,
    pub faq_stats: FaqStats,
    pub fallbacks: u64,
    pub resets: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionStats {
    pub exact: u64,
    pub fuzzy: u64,
    pub keyword: u64,
    pub no_match: u64,
    /// Matched / classified, 0.0 when nothing was classified.
    pub match_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotStats {
    pub opened: u64,
    pub filled: u64,
    pub rejected: u64,
    /// Submissions (filled + rejected) per filled slot.
    pub avg_attempts_per_fill: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaqStats {
    pub lookups: u64,
    pub hits: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::IntentResolved { kind } => match kind {
                ResolutionKind::Exact => snap.resolution_stats.exact += 1,
                ResolutionKind::Fuzzy => snap.resolution_stats.fuzzy += 1,
                ResolutionKind::Keyword => snap.resolution_stats.keyword += 1,
                ResolutionKind::NoMatch => snap.resolution_stats.no_match += 1,
            },
            TelemetryEvent::SlotLifecycle { event, .. } => match event {
                SlotEventKind::Opened => snap.slot_stats.opened += 1,
                SlotEventKind::Filled => snap.slot_stats.filled += 1,
                SlotEventKind::Rejected => snap.slot_stats.rejected += 1,
            },
            TelemetryEvent::FaqLookup { hit } => {
                snap.faq_stats.lookups += 1;
                if *hit {
                    snap.faq_stats.hits += 1;
                }
            }
            TelemetryEvent::Fallback => snap.fallbacks += 1,
            TelemetryEvent::SessionReset => snap.resets += 1,
            TelemetryEvent::SessionSummary { .. } => {}
        }
    }

    // Compute Averages
    let r = &mut snap.resolution_stats;
    let matched = r.exact + r.fuzzy + r.keyword;
    let classified = matched + r.no_match;
    if classified > 0 {
        r.match_rate = matched as f64 / classified as f64;
    }

    let s = &mut snap.slot_stats;
    if s.filled > 0 {
        s.avg_attempts_per_fill = (s.filled + s.rejected) as f64 / s.filled as f64;
    }

    snap
}
