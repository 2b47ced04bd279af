// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CampaignSettings, CategoryConfig, Factor, FactorWeights, PrivacyLevel, Provider,
    ScoreBreakdown, ServiceRequest, SubScores, Transaction,
};
pub use requests::{AnonymizeRequest, CampaignRequest, EmbeddingRequest, FraudScanRequest, ScoreRequest, SignalCheckRequest};
pub use responses::{
    AnonymizeResponse, CampaignResponse, EmbeddingResponse, ErrorResponse, FraudScanResponse,
    HealthResponse, ScoreResponse, SignalCheckResponse,
};
