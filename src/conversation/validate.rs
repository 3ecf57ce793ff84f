#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("message is empty")]
    Empty,
}

/// Checks a candidate outgoing message.
///
/// A missing input counts as the empty string. Valid text is returned as
/// given, without trimming.
pub fn validate_message(input: Option<&str>) -> Result<String, ValidationError> {
    let text = input.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\n\t \r\n"))]
    fn rejects_blank_input(#[case] input: Option<&str>) {
        assert_eq!(validate_message(input), Err(ValidationError::Empty));
    }

    #[rstest]
    #[case("Hi")]
    #[case("  padded  ")]
    #[case("multi\nline")]
    fn accepts_text_unchanged(#[case] input: &str) {
        assert_eq!(validate_message(Some(input)).as_deref(), Ok(input));
    }
}
