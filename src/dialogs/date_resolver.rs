//! Asks for a travel date until the answer names a day, month and year.

use super::{prompts, Step, TurnContext};
use crate::models::{DateField, DialogValue};
use crate::services::timex;

pub fn begin(field: DateField, initial: Option<&str>, ctx: &mut TurnContext) -> Step {
    match initial {
        None => {
            ctx.send(match field {
                DateField::Departure => prompts::DEPARTURE_DATE,
                DateField::Return => prompts::RETURN_DATE,
            });
            Step::Wait
        }
        Some(timex) if timex::is_ambiguous(timex) => {
            ctx.send(prompts::DATE_RETRY);
            Step::Wait
        }
        Some(timex) => Step::End(DialogValue::Text(timex.to_string())),
    }
}

pub fn on_reply(field: DateField, utterance: &str, ctx: &mut TurnContext) -> Step {
    match timex::recognize(utterance) {
        Some(timex) if timex::is_definite(&timex) => {
            tracing::debug!(field = ?field, timex = %timex, "date resolved");
            Step::End(DialogValue::Text(timex))
        }
        _ => {
            ctx.send(prompts::DATE_RETRY);
            Step::Wait
        }
    }
}
