use crate::models::{CategoryConfig, Factor, FactorWeights, Provider, ScoreBreakdown, ServiceRequest, SubScores};
use crate::core::{
    factors::{
        budget_alignment, category_fit, cultural_fit, location_proximity, privacy_compatibility,
        reputation_score, time_availability,
    },
    weights::{resolve_weights, MISSING_OVERRIDE_WEIGHT},
};

/// Decimal places kept in the aggregate score
const SCORE_PRECISION: i32 = 4;

/// Scores a single request/provider pair
///
/// Aggregation formula:
/// score = round4(
///     category_fit * w.category_fit +
///     location_proximity * w.location_proximity +
///     budget_alignment * w.budget_alignment +
///     reputation_score * w.reputation_score +
///     time_availability * w.time_availability +
///     cultural_fit * w.cultural_fit +
///     privacy_compatibility * w.privacy_compatibility
/// )
///
/// The scorer holds only its default weight table; it is `Copy` and safe to
/// share across threads. Ranking many providers is left to the caller.
#[derive(Debug, Clone, Copy)]
pub struct AffinityScorer {
    defaults: FactorWeights,
}

impl AffinityScorer {
    pub fn new(defaults: FactorWeights) -> Self {
        Self { defaults }
    }

    pub fn with_default_weights() -> Self {
        Self {
            defaults: FactorWeights::default(),
        }
    }

    pub fn default_weights(&self) -> &FactorWeights {
        &self.defaults
    }

    /// Weight table in effect for a given category configuration
    pub fn weights_for(&self, category_config: Option<&CategoryConfig>) -> FactorWeights {
        let overrides = category_config.and_then(|c| c.reputation_weights.as_ref());
        resolve_weights(&self.defaults, overrides, MISSING_OVERRIDE_WEIGHT)
    }

    /// Score a pair and return the sub-scores and weights behind it
    pub fn score(
        &self,
        request: &ServiceRequest,
        provider: &Provider,
        category_config: Option<&CategoryConfig>,
    ) -> ScoreBreakdown {
        let weights = self.weights_for(category_config);
        let sub_scores = calculate_sub_scores(request, provider);

        let total: f64 = Factor::ALL
            .iter()
            .map(|factor| sub_scores.get(*factor) * weights.get(*factor))
            .sum();
        let score = round_to(total, SCORE_PRECISION);

        tracing::debug!(
            "Scored request {:?} against provider {:?}: {} ({:?})",
            request.id,
            provider.id,
            score,
            sub_scores
        );

        ScoreBreakdown {
            score,
            sub_scores,
            weights,
        }
    }
}

impl Default for AffinityScorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Calculate the affinity score for a pair using the default weight table
pub fn calculate_score(
    request: &ServiceRequest,
    provider: &Provider,
    category_config: Option<&CategoryConfig>,
) -> f64 {
    AffinityScorer::with_default_weights()
        .score(request, provider, category_config)
        .score
}

/// Evaluate all seven factors for a pair
pub fn calculate_sub_scores(request: &ServiceRequest, provider: &Provider) -> SubScores {
    SubScores {
        category_fit: category_fit(request, provider),
        location_proximity: location_proximity(request, provider),
        budget_alignment: budget_alignment(request, provider),
        reputation_score: reputation_score(provider),
        time_availability: time_availability(request, provider),
        cultural_fit: cultural_fit(request, provider),
        privacy_compatibility: privacy_compatibility(request, provider),
    }
}

#[inline]
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
