//! Top-level flow: ask what the user wants, hand actionable requests to the
//! booking waterfall, then start over.

use super::{prompts, Capabilities, Step, TurnContext};
use crate::models::{BookingDetails, BookingStep, DialogValue, Frame, MainStep};
use crate::services::nlu::entities::execute_query;

pub fn frame(prompt: Option<String>) -> Frame {
    Frame::Main {
        step: MainStep::Intro,
        prompt,
    }
}

pub fn intro(caps: &Capabilities, prompt: Option<&str>, ctx: &mut TurnContext) -> Step {
    if caps.recognizer.is_none() {
        ctx.send(prompts::NLU_NOT_CONFIGURED);
        return Step::Next(DialogValue::Empty);
    }

    ctx.send(prompt.unwrap_or(prompts::HELLO));
    Step::Wait
}

pub async fn act(caps: &Capabilities, value: DialogValue, ctx: &mut TurnContext) -> Step {
    let Some(recognizer) = caps.recognizer.as_deref() else {
        return Step::Begin(booking_frame(BookingDetails::default()));
    };

    let text = value.into_text().unwrap_or_default();
    let (intent, details) = execute_query(recognizer, &text).await;
    tracing::info!(intent = intent.map(|i| i.as_str()), "recognized request");

    match (intent, details) {
        (Some(intent), Some(details)) if intent.is_actionable() => {
            Step::Begin(booking_frame(details))
        }
        _ => {
            ctx.send(prompts::DIDNT_UNDERSTAND);
            Step::Next(DialogValue::Empty)
        }
    }
}

/// Runs after the booking flow ends, however it ended.
pub fn finish(value: DialogValue, ctx: &mut TurnContext) -> Step {
    if let DialogValue::Booking(_) = value {
        ctx.send(prompts::PACK_YOUR_BAGS);
    }

    Step::Restart(frame(Some(prompts::ANOTHER_TRIP.to_string())))
}

fn booking_frame(details: BookingDetails) -> Frame {
    Frame::Booking {
        step: BookingStep::Origin,
        details,
    }
}
