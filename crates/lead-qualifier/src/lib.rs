//! Lead qualification core: deterministic rule scoring, model output recovery, and the
//! follow-up routing that hangs off a scored lead.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
