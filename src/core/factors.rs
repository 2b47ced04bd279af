use crate::models::{Provider, ServiceRequest};
use crate::core::similarity::{cosine_similarity, keyword_overlap};

/// Score returned when an input needed for a factor is unknown
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Score for a provider whose rate sits below the requester's floor
pub const BELOW_FLOOR_SCORE: f64 = 0.8;

/// How well the provider's offering fits what was asked for
///
/// Uses cosine similarity when both sides carry comparable embeddings,
/// otherwise keyword overlap of provider skills against the request text.
/// The similarity branch is not clamped and may be negative.
#[inline]
pub fn category_fit(request: &ServiceRequest, provider: &Provider) -> f64 {
    if let (Some(req_emb), Some(prov_emb)) = (&request.embedding, &provider.embedding) {
        if let Some(similarity) = cosine_similarity(req_emb, prov_emb) {
            return similarity;
        }
    }

    keyword_overlap(&request.search_text(), &provider.skills)
}

/// Linear falloff from 1.0 at the requester to 0.0 at the broadcast radius
#[inline]
pub fn location_proximity(request: &ServiceRequest, provider: &Provider) -> f64 {
    let Some(distance_km) = provider.distance_km else {
        return NEUTRAL_SCORE;
    };

    let radius = request.broadcast_radius_km;
    if distance_km > radius {
        return 0.0;
    }
    if radius <= 0.0 {
        return 1.0;
    }

    // Negative distances come from bad upstream data
    (1.0 - distance_km / radius).min(1.0)
}

/// How the provider's rate compares with the requester's budget
#[inline]
pub fn budget_alignment(request: &ServiceRequest, provider: &Provider) -> f64 {
    let (Some(rate), Some(budget_max)) = (provider.rate, request.budget_max) else {
        return NEUTRAL_SCORE;
    };
    if budget_max <= 0.0 {
        return NEUTRAL_SCORE;
    }

    if rate <= budget_max {
        // Suspiciously cheap
        if request.budget_min.is_some_and(|min| rate < min) {
            return BELOW_FLOOR_SCORE;
        }
        return 1.0;
    }

    (1.0 - (rate - budget_max) / budget_max).max(0.0)
}

#[inline]
pub fn reputation_score(provider: &Provider) -> f64 {
    (provider.reputation_base / 100.0).clamp(0.0, 1.0)
}

/// Scheduling overlap is not modelled yet; every provider is available
#[inline]
pub fn time_availability(_request: &ServiceRequest, _provider: &Provider) -> f64 {
    1.0
}

/// 1.0 when the two sides share at least one language
#[inline]
pub fn cultural_fit(request: &ServiceRequest, provider: &Provider) -> f64 {
    if request.languages.intersection(&provider.languages).next().is_some() {
        1.0
    } else {
        0.0
    }
}

/// Always 1.0.
///
/// Incomplete: privacy levels are carried on both sides but no compatibility
/// rule between them has been defined, so mismatches are not penalised.
#[inline]
pub fn privacy_compatibility(_request: &ServiceRequest, _provider: &Provider) -> f64 {
    1.0
}
