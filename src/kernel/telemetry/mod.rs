//! Routing telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside routing decisions (classifier or router).
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain user content.
//! Only config-defined identifiers (slot names), outcome kinds and counts.

pub mod event;
pub mod metrics;
pub mod recorder;
