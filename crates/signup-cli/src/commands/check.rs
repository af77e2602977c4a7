use anyhow::{bail, Result};
use colored::Colorize;
use signup_engine::{FieldId, FieldRules, FormConfig, ValidationResult};

/// Transformed value and outcome for one field value
pub fn check(config: &FormConfig, field: &str, raw: &str) -> (String, ValidationResult) {
    let rules = FieldRules::from_config(config);
    let rule = rules.rule_for(&FieldId::from(field));
    let value = rule.transform(raw);
    let result = rule.validate(&value);
    (value, result)
}

/// Prints the outcome; an invalid value is an error so the exit status reflects it
pub fn execute(config: &FormConfig, field: &str, raw: &str) -> Result<()> {
    let (value, result) = check(config, field, raw);

    println!("Field: {}", field.cyan());
    println!("Value: {}", value.bold());
    match result {
        ValidationResult::Valid => {
            println!("{}", "✓ valid".green());
            Ok(())
        }
        ValidationResult::Invalid(message) => {
            println!("{} {}", "✗".red(), message.red());
            bail!("{} is invalid: {}", field, message)
        }
    }
}
