// Core algorithm exports
pub mod campaign;
pub mod factors;
pub mod fraud;
pub mod mediation;
pub mod scoring;
pub mod similarity;
pub mod weights;

pub use campaign::{Campaign, CampaignError, CampaignGenerator};
pub use fraud::{check_provider, risk_score, FraudRules, FraudSignal};
pub use mediation::{anonymize_message, mediation_prompt};
pub use scoring::{calculate_score, calculate_sub_scores, AffinityScorer};
pub use similarity::{cosine_similarity, keyword_overlap};
pub use weights::{resolve_weights, MISSING_OVERRIDE_WEIGHT};
