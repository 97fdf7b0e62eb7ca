use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intent {
    Book,
    Info,
    Unknown,
}

impl Intent {
    pub fn parse(s: &str) -> Self {
        match s {
            "Book" => Intent::Book,
            "Info" => Intent::Info,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Book => "Book",
            Intent::Info => "Info",
            Intent::Unknown => "None",
        }
    }

    /// Book and Info requests both feed the booking flow.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Intent::Book | Intent::Info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentScore {
    pub name: String,
    pub score: f64,
}

/// Character range of an entity inside the utterance, end exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySpan {
    pub start_index: usize,
    pub end_index: usize,
    pub text: String,
}

impl EntitySpan {
    pub fn overlap(&self, other: &EntitySpan) -> i64 {
        self.end_index.min(other.end_index) as i64 - self.start_index.max(other.start_index) as i64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entities {
    /// Spans keyed by entity name or entity type.
    pub instance: HashMap<String, Vec<EntitySpan>>,
    /// Resolved values keyed the same way, index-aligned with `instance`.
    pub values: HashMap<String, Vec<serde_json::Value>>,
}

impl Entities {
    pub fn push(&mut self, key: &str, span: EntitySpan, value: serde_json::Value) {
        self.instance.entry(key.to_string()).or_default().push(span);
        self.values.entry(key.to_string()).or_default().push(value);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecognizerResult {
    pub text: String,
    pub intents: Vec<IntentScore>,
    pub entities: Entities,
}

impl RecognizerResult {
    /// Highest scoring intent; the first one listed wins a tie.
    pub fn top_intent(&self) -> Option<&IntentScore> {
        self.intents.iter().fold(None, |best, candidate| match best {
            Some(b) if b.score >= candidate.score => Some(b),
            _ => Some(candidate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, score: f64) -> IntentScore {
        IntentScore {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_top_intent_prefers_first_on_tie() {
        let result = RecognizerResult {
            intents: vec![score("Info", 0.4), score("Book", 0.8), score("None", 0.8)],
            ..Default::default()
        };
        assert_eq!(result.top_intent().unwrap().name, "Book");
    }

    #[test]
    fn test_intent_parse() {
        assert_eq!(Intent::parse("Book"), Intent::Book);
        assert!(Intent::parse("Info").is_actionable());
        assert!(!Intent::parse("None").is_actionable());
        assert_eq!(Intent::parse("Weather"), Intent::Unknown);
    }

    #[test]
    fn test_span_overlap() {
        let a = EntitySpan {
            start_index: 18,
            end_index: 23,
            text: "Paris".to_string(),
        };
        let b = EntitySpan {
            start_index: 20,
            end_index: 30,
            text: "ris to Lon".to_string(),
        };
        let c = EntitySpan {
            start_index: 40,
            end_index: 44,
            text: "2023".to_string(),
        };
        assert_eq!(a.overlap(&b), 3);
        assert!(a.overlap(&c) < 0);
    }
}
