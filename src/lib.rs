//! Affinity Engine - request/provider compatibility scoring for the MatchOS marketplace
//!
//! The core is a pure seven-factor weighted scorer. The surrounding modules
//! host it as an HTTP service together with fraud rules, ad-copy generation
//! and message mediation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_score, AffinityScorer};
pub use models::{CategoryConfig, FactorWeights, Provider, ScoreBreakdown, ServiceRequest};
