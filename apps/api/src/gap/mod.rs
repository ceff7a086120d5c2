// Skill-gap analysis: the aggregation engine, the resolve → recommend →
// aggregate pipeline, and its HTTP handlers.

pub mod analysis;
pub mod engine;
pub mod handlers;
