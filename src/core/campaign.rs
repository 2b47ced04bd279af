use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use crate::models::{CampaignSettings, CategoryConfig, ServiceRequest};

/// Errors that can occur while filling an ad-copy template
#[derive(Debug, Error, PartialEq)]
pub enum CampaignError {
    #[error("Unknown placeholder in template: {0}")]
    UnknownPlaceholder(String),

    #[error("Unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}

/// Generated ad copy for one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub copy: String,
    pub status: String,
    pub schedule: String,
}

/// Builds per-platform ad copy for a request
#[derive(Debug, Clone)]
pub struct CampaignGenerator {
    deep_link_base: String,
}

impl CampaignGenerator {
    pub fn new(deep_link_base: impl Into<String>) -> Self {
        Self {
            deep_link_base: deep_link_base.into(),
        }
    }

    /// Fill the category's template and fan it out to each platform
    pub fn generate(
        &self,
        request: &ServiceRequest,
        category_config: &CategoryConfig,
    ) -> Result<BTreeMap<String, Campaign>, CampaignError> {
        let default_settings = CampaignSettings::default();
        let settings = category_config
            .ai_campaigns
            .as_ref()
            .unwrap_or(&default_settings);

        let copy = fill_template(&settings.ad_copy_template, &self.placeholders(request))?;

        Ok(settings
            .platforms
            .iter()
            .map(|platform| {
                (
                    platform.clone(),
                    Campaign {
                        copy: copy.clone(),
                        status: "generated".to_string(),
                        schedule: settings.posting_schedule.clone(),
                    },
                )
            })
            .collect())
    }

    fn placeholders(&self, request: &ServiceRequest) -> HashMap<&'static str, String> {
        let or = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };
        let non_empty = |value: &str, fallback: &str| {
            if value.is_empty() { fallback.to_string() } else { value.to_string() }
        };

        let budget = request
            .budget_max
            .map(format_amount)
            .unwrap_or_else(|| "Negotiable".to_string());
        let deep_link = format!(
            "{}/{}",
            self.deep_link_base.trim_end_matches('/'),
            or(&request.id, "new")
        );

        HashMap::from([
            ("title", non_empty(&request.title, "Request")),
            ("user_location", or(&request.location_name, "Algeria")),
            ("budget", budget),
            ("destination", or(&request.destination, "Global")),
            ("product", non_empty(&request.title, "Goods")),
            ("travel_date", or(&request.deadline, "ASAP")),
            ("service_type", non_empty(&request.title, "Service")),
            ("neighborhood", or(&request.location_name, "City")),
            ("time_window", "Flexible".to_string()),
            (
                "privacy_level",
                request
                    .privacy_level
                    .map(|level| level.as_str().to_string())
                    .unwrap_or_else(|| "Standard".to_string()),
            ),
            ("case_type", non_empty(&request.title, "Legal Matter")),
            ("deep_link", deep_link),
        ])
    }
}

/// Replace `{name}` placeholders; `{{` and `}}` produce literal braces
pub fn fill_template(
    template: &str,
    values: &HashMap<&str, String>,
) -> Result<String, CampaignError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|(_, n)| *n) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek().map(|(_, n)| *n) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, n) in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                if !closed {
                    return Err(CampaignError::UnbalancedBrace(pos));
                }
                let value = values
                    .get(name.as_str())
                    .ok_or(CampaignError::UnknownPlaceholder(name))?;
                out.push_str(value);
            }
            '}' => return Err(CampaignError::UnbalancedBrace(pos)),
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Render whole amounts without a fractional part
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_request() -> ServiceRequest {
        ServiceRequest {
            id: Some("abc".to_string()),
            title: "Wedding photographer".to_string(),
            location_name: Some("Oran".to_string()),
            budget_max: Some(25000.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_template_and_platform() {
        let generator = CampaignGenerator::new("https://matchos.dz/r");
        let campaigns = generator
            .generate(&create_test_request(), &CategoryConfig::default())
            .unwrap();

        let campaign = &campaigns["whatsapp_status"];
        assert_eq!(campaign.copy, "New Request: Wedding photographer");
        assert_eq!(campaign.status, "generated");
        assert_eq!(campaign.schedule, "immediate");
    }

    #[test]
    fn test_custom_template_fans_out() {
        let config = CategoryConfig {
            ai_campaigns: Some(CampaignSettings {
                platforms: vec!["facebook".to_string(), "instagram".to_string()],
                ad_copy_template: "{service_type} in {neighborhood} for {budget} DZD: {deep_link}"
                    .to_string(),
                posting_schedule: "evening".to_string(),
            }),
            ..Default::default()
        };

        let campaigns = CampaignGenerator::new("https://matchos.dz/r/")
            .generate(&create_test_request(), &config)
            .unwrap();

        assert_eq!(campaigns.len(), 2);
        assert_eq!(
            campaigns["instagram"].copy,
            "Wedding photographer in Oran for 25000 DZD: https://matchos.dz/r/abc"
        );
        assert_eq!(campaigns["facebook"].schedule, "evening");
    }

    #[test]
    fn test_fallback_values() {
        let values = CampaignGenerator::new("https://x").placeholders(&ServiceRequest::default());
        assert_eq!(values["budget"], "Negotiable");
        assert_eq!(values["user_location"], "Algeria");
        assert_eq!(values["product"], "Goods");
        assert_eq!(values["deep_link"], "https://x/new");
    }

    #[test]
    fn test_privacy_level_placeholder() {
        let config = CategoryConfig {
            ai_campaigns: Some(CampaignSettings {
                ad_copy_template: "{privacy_level}".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let generator = CampaignGenerator::new("https://x");

        let unset: ServiceRequest = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        let campaigns = generator.generate(&unset, &config).unwrap();
        assert_eq!(campaigns["whatsapp_status"].copy, "Standard");

        let ghost: ServiceRequest =
            serde_json::from_str(r#"{"title": "x", "privacy_level": "ghost"}"#).unwrap();
        let campaigns = generator.generate(&ghost, &config).unwrap();
        assert_eq!(campaigns["whatsapp_status"].copy, "ghost");
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = fill_template("Hi {nope}", &HashMap::new()).unwrap_err();
        assert_eq!(err, CampaignError::UnknownPlaceholder("nope".to_string()));
    }

    #[test]
    fn test_escaped_and_unbalanced_braces() {
        let values = HashMap::from([("x", "1".to_string())]);
        assert_eq!(fill_template("{{{x}}}", &values).unwrap(), "{1}");
        assert_eq!(fill_template("oops {x", &values), Err(CampaignError::UnbalancedBrace(5)));
        assert_eq!(fill_template("oops }", &values), Err(CampaignError::UnbalancedBrace(5)));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(99.5), "99.5");
    }
}
