use std::path::Path;

pub enum Rule {
    NotEmpty,
    PathExists,
}

/// Checks `value` against the rules in order and returns the first failure.
/// Used to reject bad roots once, upfront, before anything is mutated.
pub fn validate(value: &str, rules: &[Rule]) -> Option<String> {
    for rule in rules {
        let error = match rule {
            Rule::NotEmpty => {
                if value.trim().is_empty() {
                    Some("value is empty".to_string())
                } else {
                    None
                }
            }
            Rule::PathExists => {
                if !Path::new(value).exists() {
                    Some(format!("path does not exist: {}", value))
                } else {
                    None
                }
            }
        };
        if error.is_some() {
            return error;
        }
    }

    return None;
}
