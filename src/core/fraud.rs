use serde::{Deserialize, Serialize};
use crate::models::{CategoryConfig, Provider, Transaction};

/// Category rule name enabling the low-price transaction check
pub const PRICE_BELOW_MARKET_RULE: &str = "price_below_market_30_percent";

/// Reputation below which a provider is flagged
pub const LOW_REPUTATION_THRESHOLD: f64 = 20.0;

/// Risk contributed by each raised signal
const RISK_PER_SIGNAL: f64 = 0.25;

/// Fraud signals raised by the rule checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudSignal {
    PriceTooLow,
    LowReputation,
}

/// Thresholds for the fraud rules
#[derive(Debug, Clone, Copy)]
pub struct FraudRules {
    /// Transactions below this amount trip the low-price rule
    pub price_floor: f64,
}

impl Default for FraudRules {
    fn default() -> Self {
        Self { price_floor: 1000.0 }
    }
}

impl FraudRules {
    /// Screen a transaction against the rules its category enables
    pub fn scan_transaction(
        &self,
        transaction: &Transaction,
        category_config: &CategoryConfig,
    ) -> Vec<FraudSignal> {
        let mut signals = Vec::new();

        let rule_enabled = category_config
            .fraud_signals
            .iter()
            .any(|rule| rule == PRICE_BELOW_MARKET_RULE);
        if rule_enabled && transaction.amount < self.price_floor {
            signals.push(FraudSignal::PriceTooLow);
        }

        if !signals.is_empty() {
            tracing::info!("Transaction {:?} raised {:?}", transaction.id, signals);
        }

        signals
    }
}

/// Provider-level checks that need no category context
pub fn check_provider(provider: &Provider) -> Vec<FraudSignal> {
    let mut signals = Vec::new();

    if provider.reputation_base < LOW_REPUTATION_THRESHOLD {
        signals.push(FraudSignal::LowReputation);
    }

    signals
}

/// Aggregate risk for a set of signals; not capped at 1.0
pub fn risk_score(signals: &[FraudSignal]) -> f64 {
    signals.len() as f64 * RISK_PER_SIGNAL
}
