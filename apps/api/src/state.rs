use std::sync::Arc;

use crate::config::Config;
use crate::recommender::RecommendationProvider;
use crate::skills::extractor::SkillExtractor;
use crate::skills::store::SkillStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-user skill slot. Redis in production, in-memory otherwise.
    pub skill_store: Arc<dyn SkillStore>,
    /// Remote job recommendation provider.
    pub recommender: Arc<dyn RecommendationProvider>,
    /// Pluggable résumé skill extractor. Default: KeywordSkillExtractor.
    pub extractor: Arc<dyn SkillExtractor>,
    pub config: Config,
}
