use serde_json::Value;

use crate::models::booking::capitalize;
use crate::models::{BookingDetails, BookingField, Intent, RecognizerResult};
use crate::services::nlu::Recognizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    City,
    Date,
    Quantity,
}

impl EntityKind {
    /// Key the recognizer uses for prebuilt entities of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::City => "geographyV2_city",
            EntityKind::Date => "datetime",
            EntityKind::Quantity => "number",
        }
    }

    fn format(&self, value: &Value) -> Option<String> {
        match self {
            EntityKind::City => value.as_str().map(capitalize),
            EntityKind::Date => value
                .get("timex")
                .and_then(|t| t.get(0))
                .and_then(Value::as_str)
                .map(str::to_string),
            EntityKind::Quantity => match value {
                Value::Number(n) => Some(format!("${n}")),
                Value::String(s) => Some(format!("${s}")),
                _ => None,
            },
        }
    }
}

/// Which prebuilt entity type fills which booking field, in merge order.
pub const FIELD_ENTITIES: [(BookingField, EntityKind); 5] = [
    (BookingField::OriginCity, EntityKind::City),
    (BookingField::DestinationCity, EntityKind::City),
    (BookingField::DepartureDate, EntityKind::Date),
    (BookingField::ReturnDate, EntityKind::Date),
    (BookingField::Budget, EntityKind::Quantity),
];

/// Runs the recognizer and turns its answer into an intent and pre-filled
/// booking details. Recognizer failures degrade to "nothing recognized".
pub async fn execute_query(
    recognizer: &dyn Recognizer,
    utterance: &str,
) -> (Option<Intent>, Option<BookingDetails>) {
    match recognizer.recognize(utterance).await {
        Ok(result) => extract_booking(&result),
        Err(e) => {
            tracing::warn!(error = %e, "recognizer failed, falling back to manual collection");
            (None, None)
        }
    }
}

pub fn extract_booking(result: &RecognizerResult) -> (Option<Intent>, Option<BookingDetails>) {
    let intent = result.top_intent().map(|top| Intent::parse(&top.name));

    let details = match intent {
        Some(intent) if intent.is_actionable() => {
            let mut details = BookingDetails::default();
            for (field, kind) in FIELD_ENTITIES {
                if let Some(value) = top_entity(result, field.entity_name(), kind) {
                    *details.slot_mut(field) = Some(value);
                }
            }
            Some(details)
        }
        _ => None,
    };

    (intent, details)
}

/// Picks the typed entity whose span overlaps the named entity's first span
/// the most. Only a strictly greater overlap replaces the current best, so
/// the first candidate wins ties and zero overlap never matches.
pub fn top_entity(result: &RecognizerResult, entity_name: &str, kind: EntityKind) -> Option<String> {
    let entities = &result.entities;

    if entities.values.get(entity_name).map_or(true, Vec::is_empty) {
        return None;
    }
    let recognized = entities.instance.get(entity_name)?.first()?;

    let mut top_score = 0;
    let mut top_index = None;

    for (index, candidate) in entities
        .instance
        .get(kind.type_name())
        .into_iter()
        .flatten()
        .enumerate()
    {
        let score = candidate.overlap(recognized);
        if score > top_score {
            top_index = Some(index);
            top_score = score;
        }
    }

    let value = entities.values.get(kind.type_name())?.get(top_index?)?;
    kind.format(value)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::models::{Entities, EntitySpan, IntentScore};

    fn span(start: usize, end: usize, text: &str) -> EntitySpan {
        EntitySpan {
            start_index: start,
            end_index: end,
            text: text.to_string(),
        }
    }

    fn result(intent: &str, entities: Entities) -> RecognizerResult {
        RecognizerResult {
            text: String::new(),
            intents: vec![IntentScore {
                name: intent.to_string(),
                score: 0.9,
            }],
            entities,
        }
    }

    // "I want to go from paris to london for 100 dollars on 2023-01-01"
    fn trip_entities() -> Entities {
        let mut e = Entities::default();
        e.push("or_city", span(18, 23, "paris"), json!("paris"));
        e.push("dst_city", span(27, 33, "london"), json!("london"));
        e.push("budget", span(38, 41, "100"), json!("100"));
        e.push("geographyV2_city", span(18, 23, "paris"), json!("paris"));
        e.push("geographyV2_city", span(27, 33, "london"), json!("london"));
        e.push("number", span(38, 41, "100"), json!(100));
        e
    }

    #[test]
    fn test_extract_formats_each_field() {
        let mut entities = trip_entities();
        entities.push("str_date", span(53, 63, "2023-01-01"), json!("2023-01-01"));
        entities.push(
            "datetime",
            span(53, 63, "2023-01-01"),
            json!({"timex": ["2023-01-01"], "type": "date"}),
        );

        let (intent, details) = extract_booking(&result("Book", entities));
        let details = details.unwrap();

        assert_eq!(intent, Some(Intent::Book));
        assert_eq!(details.origin_city.as_deref(), Some("Paris"));
        assert_eq!(details.destination_city.as_deref(), Some("London"));
        assert_eq!(details.departure_date.as_deref(), Some("2023-01-01"));
        assert_eq!(details.return_date, None);
        assert_eq!(details.budget.as_deref(), Some("$100"));
    }

    #[test]
    fn test_non_actionable_intent_yields_no_details() {
        let (intent, details) = extract_booking(&result("None", trip_entities()));
        assert_eq!(intent, Some(Intent::Unknown));
        assert!(details.is_none());
    }

    #[test]
    fn test_info_intent_without_entities_yields_empty_details() {
        let (intent, details) = extract_booking(&result("Info", Entities::default()));
        assert_eq!(intent, Some(Intent::Info));
        assert_eq!(details, Some(BookingDetails::default()));
    }

    #[test]
    fn test_strictly_greater_overlap_wins() {
        let mut e = Entities::default();
        e.push("or_city", span(10, 20, "new york c"), json!("new york c"));
        e.push("geographyV2_city", span(8, 12, "a new"), json!("york"));
        e.push("geographyV2_city", span(10, 18, "new york"), json!("new york"));
        let top = top_entity(&result("Book", e), "or_city", EntityKind::City);
        assert_eq!(top.as_deref(), Some("New york"));
    }

    #[test]
    fn test_equal_overlap_keeps_first_seen() {
        let mut e = Entities::default();
        e.push("or_city", span(10, 20, "lyon paris"), json!("lyon paris"));
        e.push("geographyV2_city", span(10, 14, "lyon"), json!("lyon"));
        e.push("geographyV2_city", span(16, 20, "aris"), json!("paris"));
        let top = top_entity(&result("Book", e), "or_city", EntityKind::City);
        assert_eq!(top.as_deref(), Some("Lyon"));
    }

    #[test]
    fn test_zero_overlap_never_selects() {
        let mut e = Entities::default();
        e.push("or_city", span(0, 5, "paris"), json!("paris"));
        e.push("geographyV2_city", span(5, 11, "london"), json!("london"));
        assert_eq!(top_entity(&result("Book", e), "or_city", EntityKind::City), None);
    }

    #[test]
    fn test_index_beyond_values_yields_none() {
        let mut e = Entities::default();
        e.push("budget", span(0, 3, "100"), json!("100"));
        e.instance
            .entry("number".to_string())
            .or_default()
            .push(span(0, 3, "100"));
        assert_eq!(top_entity(&result("Book", e), "budget", EntityKind::Quantity), None);
    }

    struct FailingRecognizer;

    #[async_trait]
    impl Recognizer for FailingRecognizer {
        async fn recognize(&self, _utterance: &str) -> anyhow::Result<RecognizerResult> {
            anyhow::bail!("LUIS unreachable")
        }
    }

    #[tokio::test]
    async fn test_recognizer_failure_degrades_to_nothing() {
        let (intent, details) = execute_query(&FailingRecognizer, "Book a flight").await;
        assert!(intent.is_none());
        assert!(details.is_none());
    }
}
