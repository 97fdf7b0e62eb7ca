use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Recognizer;
use crate::models::{Entities, EntitySpan, IntentScore, RecognizerResult};

/// LUIS v2 prediction endpoint client.
pub struct LuisRecognizer {
    app_id: String,
    api_key: String,
    host_name: String,
    client: reqwest::Client,
}

impl LuisRecognizer {
    pub fn new(app_id: String, api_key: String, host_name: String) -> Self {
        Self {
            app_id,
            api_key,
            host_name,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    #[serde(default)]
    query: String,
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    intents: Vec<LuisIntent>,
    #[serde(default)]
    entities: Vec<LuisEntity>,
}

#[derive(Debug, Deserialize)]
struct LuisIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisEntity {
    entity: String,
    #[serde(rename = "type")]
    kind: String,
    start_index: usize,
    end_index: usize,
    resolution: Option<Value>,
}

#[async_trait]
impl Recognizer for LuisRecognizer {
    async fn recognize(&self, utterance: &str) -> anyhow::Result<RecognizerResult> {
        let url = format!(
            "https://{}/luis/v2.0/apps/{}",
            self.host_name.trim_start_matches("https://"),
            self.app_id
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("verbose", "true"),
                ("subscription-key", self.api_key.as_str()),
                ("q", utterance),
            ])
            .send()
            .await
            .context("failed to call LUIS API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("LUIS API error ({status}): {body}");
        }

        let data: LuisResponse = resp.json().await.context("failed to parse LUIS response")?;

        Ok(into_recognizer_result(data, utterance))
    }
}

fn into_recognizer_result(data: LuisResponse, utterance: &str) -> RecognizerResult {
    let mut intents: Vec<IntentScore> = data
        .intents
        .into_iter()
        .map(|i| IntentScore {
            name: i.intent,
            score: i.score,
        })
        .collect();
    if intents.is_empty() {
        if let Some(top) = data.top_scoring_intent {
            intents.push(IntentScore {
                name: top.intent,
                score: top.score,
            });
        }
    }

    let mut entities = Entities::default();
    for entity in data.entities {
        let key = normalize_type(&entity.kind);
        // LUIS reports an inclusive end index.
        let end_index = entity.end_index + 1;
        let text = utterance
            .get(entity.start_index..end_index)
            .unwrap_or(&entity.entity)
            .to_string();
        let value = entity_value(&key, &entity);
        entities.push(
            &key,
            EntitySpan {
                start_index: entity.start_index,
                end_index,
                text,
            },
            value,
        );
    }

    let text = if data.query.is_empty() {
        utterance.to_string()
    } else {
        data.query
    };

    RecognizerResult {
        text,
        intents,
        entities,
    }
}

fn normalize_type(kind: &str) -> String {
    if kind == "builtin.geographyV2.city" {
        "geographyV2_city".to_string()
    } else if kind.starts_with("builtin.datetimeV2.") {
        "datetime".to_string()
    } else if kind == "builtin.number" {
        "number".to_string()
    } else {
        kind.trim_start_matches("builtin.").to_string()
    }
}

fn entity_value(key: &str, entity: &LuisEntity) -> Value {
    match key {
        "datetime" => {
            let values = entity
                .resolution
                .as_ref()
                .and_then(|r| r.get("values"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let timex: Vec<Value> = values
                .iter()
                .filter_map(|v| v.get("timex").cloned())
                .collect();
            let kind = values
                .first()
                .and_then(|v| v.get("type"))
                .cloned()
                .unwrap_or(Value::Null);
            json!({ "timex": timex, "type": kind })
        }
        "number" => {
            let raw = entity
                .resolution
                .as_ref()
                .and_then(|r| r.get("value"))
                .and_then(Value::as_str)
                .unwrap_or(&entity.entity);
            if let Ok(n) = raw.parse::<i64>() {
                json!(n)
            } else if let Ok(n) = raw.parse::<f64>() {
                json!(n)
            } else {
                Value::String(raw.to_string())
            }
        }
        _ => Value::String(entity.entity.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::nlu::entities::extract_booking;

    const UTTERANCE: &str = "from Paris to London for $100 on 2023-01-01";

    fn sample_response() -> LuisResponse {
        serde_json::from_value(json!({
            "query": UTTERANCE,
            "topScoringIntent": {"intent": "Book", "score": 0.93},
            "intents": [
                {"intent": "Book", "score": 0.93},
                {"intent": "None", "score": 0.02}
            ],
            "entities": [
                {"entity": "paris", "type": "or_city", "startIndex": 5, "endIndex": 9, "score": 0.9},
                {"entity": "london", "type": "dst_city", "startIndex": 14, "endIndex": 19, "score": 0.9},
                {"entity": "$100", "type": "budget", "startIndex": 25, "endIndex": 28, "score": 0.8},
                {"entity": "2023-01-01", "type": "str_date", "startIndex": 33, "endIndex": 42, "score": 0.8},
                {"entity": "paris", "type": "builtin.geographyV2.city", "startIndex": 5, "endIndex": 9},
                {"entity": "london", "type": "builtin.geographyV2.city", "startIndex": 14, "endIndex": 19},
                {"entity": "100", "type": "builtin.number", "startIndex": 26, "endIndex": 28,
                 "resolution": {"subtype": "integer", "value": "100"}},
                {"entity": "2023-01-01", "type": "builtin.datetimeV2.date", "startIndex": 33, "endIndex": 42,
                 "resolution": {"values": [{"timex": "2023-01-01", "type": "date", "value": "2023-01-01"}]}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("builtin.geographyV2.city"), "geographyV2_city");
        assert_eq!(normalize_type("builtin.datetimeV2.daterange"), "datetime");
        assert_eq!(normalize_type("builtin.number"), "number");
        assert_eq!(normalize_type("or_city"), "or_city");
    }

    #[test]
    fn test_response_converts_spans_and_values() {
        let result = into_recognizer_result(sample_response(), UTTERANCE);

        assert_eq!(result.top_intent().unwrap().name, "Book");
        let city = &result.entities.instance["geographyV2_city"][0];
        assert_eq!((city.start_index, city.end_index), (5, 10));
        assert_eq!(city.text, "Paris");
        assert_eq!(result.entities.values["number"][0], json!(100));
        assert_eq!(result.entities.values["datetime"][0]["timex"][0], "2023-01-01");
    }

    #[test]
    fn test_response_feeds_entity_merge() {
        let result = into_recognizer_result(sample_response(), UTTERANCE);
        let (_, details) = extract_booking(&result);
        let details = details.unwrap();

        assert_eq!(details.origin_city.as_deref(), Some("Paris"));
        assert_eq!(details.destination_city.as_deref(), Some("London"));
        assert_eq!(details.departure_date.as_deref(), Some("2023-01-01"));
        assert_eq!(details.budget.as_deref(), Some("$100"));
        assert_eq!(details.return_date, None);
    }

    #[test]
    fn test_top_scoring_intent_used_when_list_missing() {
        let data: LuisResponse = serde_json::from_value(json!({
            "query": "hello",
            "topScoringIntent": {"intent": "Info", "score": 0.5}
        }))
        .unwrap();
        let result = into_recognizer_result(data, "hello");
        assert_eq!(result.top_intent().unwrap().name, "Info");
        assert!(result.entities.instance.is_empty());
    }
}
