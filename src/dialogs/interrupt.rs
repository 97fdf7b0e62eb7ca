#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Help,
    Cancel,
}

/// Global commands, honoured whatever step the conversation is in.
pub fn detect(utterance: &str) -> Option<Interruption> {
    match utterance.trim().to_lowercase().as_str() {
        "help" | "?" => Some(Interruption::Help),
        "cancel" | "quit" => Some(Interruption::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(detect("Help"), Some(Interruption::Help));
        assert_eq!(detect(" ? "), Some(Interruption::Help));
        assert_eq!(detect("QUIT"), Some(Interruption::Cancel));
        assert_eq!(detect("cancel my trip"), None);
        assert_eq!(detect("Paris"), None);
    }
}
