//! Configuration validation.
//!
//! Collects every violation into a single `ConfigError` so a broken
//! config reports all problems at once.

use crate::schema::EasydietConfig;
use easydiet_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EasydietConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_ai(&mut errors, config);
    validate_history(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_ai(errors: &mut Vec<String>, config: &EasydietConfig) {
    if config.ai.api_keys.is_empty() {
        errors.push("ai.api_keys must contain at least one key".to_string());
    }
    if config.ai.api_keys.iter().any(|k| k.trim().is_empty()) {
        errors.push("ai.api_keys must not contain empty keys".to_string());
    }
    if config.ai.model.trim().is_empty() {
        errors.push("ai.model must not be empty".to_string());
    }
    if config.ai.max_output_tokens == 0 {
        errors.push("ai.max_output_tokens must be at least 1".to_string());
    }
    if !(0.0..=2.0).contains(&config.ai.temperature) {
        errors.push(format!(
            "ai.temperature must be between 0.0 and 2.0 (got {})",
            config.ai.temperature
        ));
    }
}

fn validate_history(errors: &mut Vec<String>, config: &EasydietConfig) {
    if config.history.max_turn_pairs == 0 {
        errors.push("history.max_turn_pairs must be at least 1".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn valid_config() -> EasydietConfig {
        let mut config = EasydietConfig::default();
        config.ai.api_keys = vec!["KEY_1".into()];
        config
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn catches_empty_key_pool() {
        let config = EasydietConfig::default();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.api_keys"));
    }

    #[test]
    fn catches_blank_key() {
        let mut config = valid_config();
        config.ai.api_keys.push("   ".into());
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("empty keys"));
    }

    #[test]
    fn catches_empty_model() {
        let mut config = valid_config();
        config.ai.model = "".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.model"));
    }

    #[test]
    fn catches_zero_max_output_tokens() {
        let mut config = valid_config();
        config.ai.max_output_tokens = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.max_output_tokens"));
    }

    #[test]
    fn catches_temperature_out_of_range() {
        let mut config = valid_config();
        config.ai.temperature = 3.5;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.temperature"));
    }

    #[test]
    fn catches_zero_retention() {
        let mut config = valid_config();
        config.history.max_turn_pairs = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("history.max_turn_pairs"));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = EasydietConfig::default();
        config.history.max_turn_pairs = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.api_keys"));
        assert!(err.contains("history.max_turn_pairs"));
    }
}
