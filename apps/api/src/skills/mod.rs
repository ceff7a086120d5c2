// Skill entry: the per-user skill-set store, the resolver that reads it,
// keyword extraction from résumés, and their HTTP handlers.

pub mod extractor;
pub mod handlers;
pub mod resolver;
pub mod store;
