use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

/// How much identity a party is willing to expose during a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Public,
    #[default]
    Alias,
    Mediated,
    Ghost,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "public",
            PrivacyLevel::Alias => "alias",
            PrivacyLevel::Mediated => "mediated",
            PrivacyLevel::Ghost => "ghost",
        }
    }
}

/// A service or goods request posted to the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "non_empty_vector")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default = "default_broadcast_radius_km")]
    pub broadcast_radius_km: f64,
    #[serde(default, deserialize_with = "non_zero_amount")]
    pub budget_min: Option<f64>,
    #[serde(default, deserialize_with = "non_zero_amount")]
    pub budget_max: Option<f64>,
    #[serde(default = "default_languages")]
    pub languages: BTreeSet<String>,
    /// `None` when the requester did not choose a level
    #[serde(default)]
    pub privacy_level: Option<PrivacyLevel>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl Default for ServiceRequest {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            embedding: None,
            location_name: None,
            broadcast_radius_km: default_broadcast_radius_km(),
            budget_min: None,
            budget_max: None,
            languages: default_languages(),
            privacy_level: None,
            deadline: None,
            destination: None,
        }
    }
}

impl ServiceRequest {
    /// Free text used for keyword matching and embedding
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Effective privacy level, `alias` unless the requester chose one
    pub fn privacy_level(&self) -> PrivacyLevel {
        self.privacy_level.unwrap_or_default()
    }
}

/// A candidate provider for a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "non_empty_vector")]
    pub embedding: Option<Vec<f32>>,
    /// Precomputed distance from the requester
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default, deserialize_with = "non_zero_amount")]
    pub rate: Option<f64>,
    #[serde(default = "default_reputation_base")]
    pub reputation_base: f64,
    #[serde(default = "default_languages")]
    pub languages: BTreeSet<String>,
    #[serde(default = "default_provider_privacy")]
    pub privacy_level: PrivacyLevel,
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            id: None,
            skills: Vec::new(),
            embedding: None,
            distance_km: None,
            rate: None,
            reputation_base: default_reputation_base(),
            languages: default_languages(),
            privacy_level: default_provider_privacy(),
        }
    }
}

/// Per-category tuning supplied by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default)]
    pub reputation_weights: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub fraud_signals: Vec<String>,
    #[serde(default)]
    pub ai_campaigns: Option<CampaignSettings>,
    #[serde(default)]
    pub mediation_prompt: Option<String>,
}

/// Ad-copy campaign settings for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSettings {
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    #[serde(default = "default_ad_copy_template")]
    pub ad_copy_template: String,
    #[serde(default = "default_posting_schedule")]
    pub posting_schedule: String,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            ad_copy_template: default_ad_copy_template(),
            posting_schedule: default_posting_schedule(),
        }
    }
}

/// A payment or order submitted for fraud screening
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: f64,
}

/// The seven affinity factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    CategoryFit,
    LocationProximity,
    BudgetAlignment,
    ReputationScore,
    TimeAvailability,
    CulturalFit,
    PrivacyCompatibility,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::CategoryFit,
        Factor::LocationProximity,
        Factor::BudgetAlignment,
        Factor::ReputationScore,
        Factor::TimeAvailability,
        Factor::CulturalFit,
        Factor::PrivacyCompatibility,
    ];

    /// Key used for this factor in `reputation_weights`
    pub fn key(&self) -> &'static str {
        match self {
            Factor::CategoryFit => "category_fit",
            Factor::LocationProximity => "location_proximity",
            Factor::BudgetAlignment => "budget_alignment",
            Factor::ReputationScore => "reputation_score",
            Factor::TimeAvailability => "time_availability",
            Factor::CulturalFit => "cultural_fit",
            Factor::PrivacyCompatibility => "privacy_compatibility",
        }
    }
}

/// Weight applied to each factor during aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub category_fit: f64,
    pub location_proximity: f64,
    pub budget_alignment: f64,
    pub reputation_score: f64,
    pub time_availability: f64,
    pub cultural_fit: f64,
    pub privacy_compatibility: f64,
}

impl FactorWeights {
    /// Build a weight table by evaluating `f` for every factor
    pub fn from_fn(mut f: impl FnMut(Factor) -> f64) -> Self {
        Self {
            category_fit: f(Factor::CategoryFit),
            location_proximity: f(Factor::LocationProximity),
            budget_alignment: f(Factor::BudgetAlignment),
            reputation_score: f(Factor::ReputationScore),
            time_availability: f(Factor::TimeAvailability),
            cultural_fit: f(Factor::CulturalFit),
            privacy_compatibility: f(Factor::PrivacyCompatibility),
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::CategoryFit => self.category_fit,
            Factor::LocationProximity => self.location_proximity,
            Factor::BudgetAlignment => self.budget_alignment,
            Factor::ReputationScore => self.reputation_score,
            Factor::TimeAvailability => self.time_availability,
            Factor::CulturalFit => self.cultural_fit,
            Factor::PrivacyCompatibility => self.privacy_compatibility,
        }
    }

    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|f| self.get(*f)).sum()
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            category_fit: 0.25,
            location_proximity: 0.20,
            budget_alignment: 0.15,
            reputation_score: 0.15,
            time_availability: 0.10,
            cultural_fit: 0.10,
            privacy_compatibility: 0.05,
        }
    }
}

/// Raw sub-scores for one request/provider pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub category_fit: f64,
    pub location_proximity: f64,
    pub budget_alignment: f64,
    pub reputation_score: f64,
    pub time_availability: f64,
    pub cultural_fit: f64,
    pub privacy_compatibility: f64,
}

impl SubScores {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::CategoryFit => self.category_fit,
            Factor::LocationProximity => self.location_proximity,
            Factor::BudgetAlignment => self.budget_alignment,
            Factor::ReputationScore => self.reputation_score,
            Factor::TimeAvailability => self.time_availability,
            Factor::CulturalFit => self.cultural_fit,
            Factor::PrivacyCompatibility => self.privacy_compatibility,
        }
    }
}

/// Aggregate score together with the inputs that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub sub_scores: SubScores,
    pub weights: FactorWeights,
}

fn default_broadcast_radius_km() -> f64 { 10.0 }
fn default_reputation_base() -> f64 { 50.0 }
fn default_provider_privacy() -> PrivacyLevel { PrivacyLevel::Public }
fn default_platforms() -> Vec<String> { vec!["whatsapp_status".to_string()] }
fn default_ad_copy_template() -> String { "New Request: {title}".to_string() }
fn default_posting_schedule() -> String { "immediate".to_string() }

pub fn default_languages() -> BTreeSet<String> {
    BTreeSet::from(["en".to_string()])
}

/// Zero amounts are treated as "not provided"
fn non_zero_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| *v != 0.0))
}

fn non_empty_vector<'de, D>(deserializer: D) -> Result<Option<Vec<f32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<f32>>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}
