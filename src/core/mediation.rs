use crate::models::PrivacyLevel;
use crate::services::{ServiceError, TextRewriter};

pub const BASE_MEDIATION_PROMPT: &str = "You are a privacy mediator. Remove PII.";

/// Build the system prompt for rewriting a message at a given privacy level
///
/// Returns `None` for `public`: those messages are passed through untouched.
pub fn mediation_prompt(level: PrivacyLevel, category_prompt: Option<&str>) -> Option<String> {
    let instruction = match level {
        PrivacyLevel::Public => return None,
        PrivacyLevel::Alias => " Replace names with 'User', hide phone numbers/emails.",
        PrivacyLevel::Mediated => {
            " Rewrite the message to be purely functional. Remove all personal context."
        }
        PrivacyLevel::Ghost => " Summarize the intent only. No direct quotes.",
    };

    let base = category_prompt.unwrap_or(BASE_MEDIATION_PROMPT);
    Some(format!("{}{}", base, instruction))
}

/// Anonymize a message through the configured rewriter
pub async fn anonymize_message(
    rewriter: &dyn TextRewriter,
    text: &str,
    level: PrivacyLevel,
    category_prompt: Option<&str>,
) -> Result<String, ServiceError> {
    match mediation_prompt(level, category_prompt) {
        None => Ok(text.to_string()),
        Some(system) => {
            tracing::debug!("Mediating message at privacy level {}", level.as_str());
            rewriter.rewrite(&system, text).await
        }
    }
}
