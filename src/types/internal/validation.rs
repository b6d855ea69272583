use crate::errors::internal::ValidationError;
use validator::ValidateEmail;

/// Collects every field problem in a request before reporting
///
/// Messages use the key-labelled form clients already parse, for example
/// `"name" length must be at least 2 characters long`. Checks never short
/// circuit; `finish` reports all of them joined by ", ".
#[derive(Debug, Default)]
pub struct FieldValidator {
    messages: Vec<String>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, rule: impl AsRef<str>) {
        self.messages.push(format!("\"{}\" {}", field, rule.as_ref()));
    }

    /// Require a value to be present. Returns it for further checks.
    pub fn required<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        if value.is_none() {
            self.push(field, "is required");
        }
        value
    }

    /// Reject empty strings. Returns true when the value is non-empty.
    pub fn not_empty(&mut self, field: &str, value: &str) -> bool {
        if value.is_empty() {
            self.push(field, "is not allowed to be empty");
            return false;
        }
        true
    }

    /// Trimmed text with a character-length window
    pub fn text(&mut self, field: &str, value: &str, min: usize, max: Option<usize>) {
        let value = value.trim();
        if !self.not_empty(field, value) {
            return;
        }
        let len = value.chars().count();
        if len < min {
            self.push(
                field,
                format!("length must be at least {} characters long", min),
            );
        }
        if let Some(max) = max {
            if len > max {
                self.push(
                    field,
                    format!("length must be less than or equal to {} characters long", max),
                );
            }
        }
    }

    /// Untrimmed minimum length, used for passwords
    pub fn min_length(&mut self, field: &str, value: &str, min: usize) {
        if !self.not_empty(field, value) {
            return;
        }
        if value.chars().count() < min {
            self.push(
                field,
                format!("length must be at least {} characters long", min),
            );
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !self.not_empty(field, value) {
            return;
        }
        if !value.validate_email() {
            self.push(field, "must be a valid email");
        }
    }

    /// Record identifiers are UUID strings
    pub fn id(&mut self, field: &str, value: &str) {
        if uuid::Uuid::parse_str(value).is_err() {
            self.push(field, "contains an invalid value");
        }
    }

    pub fn one_of(&mut self, field: &str, value: &str, allowed: &[&str]) {
        if !allowed.contains(&value) {
            self.push(field, format!("must be one of [{}]", allowed.join(", ")));
        }
    }

    pub fn range(&mut self, field: &str, value: i64, min: i64, max: Option<i64>) {
        if value < min {
            self.push(field, format!("must be greater than or equal to {}", min));
        }
        if let Some(max) = max {
            if value > max {
                self.push(field, format!("must be less than or equal to {}", max));
            }
        }
    }

    /// Partial updates must carry at least one field
    pub fn at_least_one_key(&mut self, any_present: bool) {
        if !any_present {
            self.push("value", "must have at least 1 key");
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.messages))
        }
    }
}

/// Validate a path id on its own
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    let mut v = FieldValidator::new();
    v.id("id", id);
    v.finish()
}
