/// Every field problem found in one request, reported together
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .messages.join(", "))]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_messages() {
        let err = ValidationError::new(vec![
            "\"email\" must be a valid email".to_string(),
            "\"password\" is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "\"email\" must be a valid email, \"password\" is required"
        );
    }
}
