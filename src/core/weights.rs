use crate::models::FactorWeights;
use std::collections::HashMap;

/// Weight given to a factor that a category override table leaves out
pub const MISSING_OVERRIDE_WEIGHT: f64 = 0.1;

/// Resolve the weight table used for one scoring call
///
/// Two tiers:
/// - no override table: `defaults` is used as-is
/// - override table present: each factor takes its override, or
///   `fallback_when_overrides_present` if the table omits it
///
/// Keys in `overrides` that name no factor are ignored.
pub fn resolve_weights(
    defaults: &FactorWeights,
    overrides: Option<&HashMap<String, f64>>,
    fallback_when_overrides_present: f64,
) -> FactorWeights {
    match overrides {
        None => *defaults,
        Some(table) => FactorWeights::from_fn(|factor| {
            table
                .get(factor.key())
                .copied()
                .unwrap_or(fallback_when_overrides_present)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Factor;

    #[test]
    fn test_no_overrides_uses_defaults() {
        let defaults = FactorWeights::default();
        let resolved = resolve_weights(&defaults, None, MISSING_OVERRIDE_WEIGHT);
        assert_eq!(resolved, defaults);
    }

    #[test]
    fn test_partial_overrides_fall_back_to_flat_weight() {
        let overrides = HashMap::from([("category_fit".to_string(), 0.5)]);
        let resolved = resolve_weights(
            &FactorWeights::default(),
            Some(&overrides),
            MISSING_OVERRIDE_WEIGHT,
        );

        assert_eq!(resolved.category_fit, 0.5);
        for factor in Factor::ALL.iter().filter(|f| **f != Factor::CategoryFit) {
            assert_eq!(resolved.get(*factor), 0.1, "{}", factor.key());
        }
    }

    #[test]
    fn test_empty_override_table_is_all_fallback() {
        let overrides = HashMap::new();
        let resolved = resolve_weights(&FactorWeights::default(), Some(&overrides), 0.1);
        assert!((resolved.sum() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let overrides = HashMap::from([
            ("cultural_fit".to_string(), 0.3),
            ("vibes".to_string(), 9.0),
        ]);
        let resolved = resolve_weights(&FactorWeights::default(), Some(&overrides), 0.1);

        assert_eq!(resolved.cultural_fit, 0.3);
        assert!((resolved.sum() - 0.9).abs() < 1e-9);
    }
}
