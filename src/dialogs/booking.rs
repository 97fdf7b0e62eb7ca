//! Booking waterfall: origin, destination, departure, return, budget,
//! confirmation, final answer.
//!
//! Every step first stores the value carried from the previous step, then
//! either prompts for its own field or, when the field is already known,
//! carries that value straight to the next step.

use super::{prompts, Capabilities, Step, TurnContext};
use crate::models::booking::capitalize;
use crate::models::{BookingDetails, BookingStep, DateField, DialogValue, Frame};
use crate::services::{report, timex};

pub fn begin(details: &BookingDetails, ctx: &mut TurnContext) -> Step {
    ask_unless_known(details.origin_city.as_deref(), prompts::ORIGIN, ctx)
}

/// Runs `step` with the value produced by the step before it.
pub async fn run_step(
    caps: &Capabilities,
    step: &mut BookingStep,
    details: &mut BookingDetails,
    value: DialogValue,
    ctx: &mut TurnContext,
) -> Step {
    match *step {
        BookingStep::Origin => begin(details, ctx),
        BookingStep::Destination => {
            store(&mut details.origin_city, value, capitalize);
            ask_unless_known(details.destination_city.as_deref(), prompts::DESTINATION, ctx)
        }
        BookingStep::Departure => {
            store(&mut details.destination_city, value, capitalize);
            resolve_date(details, DateField::Departure)
        }
        BookingStep::Return => {
            store(&mut details.departure_date, value, str::to_string);
            resolve_date(details, DateField::Return)
        }
        BookingStep::Budget => {
            store(&mut details.return_date, value, str::to_string);
            ask_unless_known(details.budget.as_deref(), prompts::BUDGET, ctx)
        }
        BookingStep::Confirm | BookingStep::ConfirmRetry => {
            store(&mut details.budget, value, str::to_string);
            confirm(caps, step, details, ctx).await
        }
        BookingStep::Final => finish(details, value),
    }
}

/// Handles the user's reply to whatever this flow last asked.
pub async fn on_reply(
    caps: &Capabilities,
    step: &mut BookingStep,
    details: &mut BookingDetails,
    utterance: &str,
    ctx: &mut TurnContext,
) -> Step {
    match *step {
        BookingStep::Origin | BookingStep::Destination | BookingStep::Budget => {
            if utterance.trim().is_empty() {
                ctx.send(match *step {
                    BookingStep::Origin => prompts::ORIGIN,
                    BookingStep::Destination => prompts::DESTINATION,
                    _ => prompts::BUDGET,
                });
                return Step::Wait;
            }
            Step::Next(DialogValue::Text(utterance.trim().to_string()))
        }
        // The date resolver normally sits on top of these steps; without it,
        // start it again.
        BookingStep::Departure => Step::Begin(date_frame(DateField::Departure)),
        BookingStep::Return => Step::Begin(date_frame(DateField::Return)),
        BookingStep::Confirm => match prompts::recognize_choice(utterance) {
            Some(answer) => Step::Next(DialogValue::Confirmed(answer)),
            None => {
                ctx.send(prompts::CONFIRM_RETRY);
                Step::Wait
            }
        },
        BookingStep::ConfirmRetry => {
            *step = BookingStep::Confirm;
            confirm(caps, step, details, ctx).await
        }
        BookingStep::Final => Step::End(DialogValue::Empty),
    }
}

fn ask_unless_known(known: Option<&str>, prompt: &str, ctx: &mut TurnContext) -> Step {
    match known {
        Some(value) => Step::Next(DialogValue::Text(value.to_string())),
        None => {
            ctx.send(prompt);
            Step::Wait
        }
    }
}

fn store(slot: &mut Option<String>, value: DialogValue, format: impl Fn(&str) -> String) {
    if let Some(text) = value.into_text() {
        *slot = Some(format(&text));
    }
}

fn resolve_date(details: &BookingDetails, field: DateField) -> Step {
    match details.slot(field.booking_field()) {
        Some(date) if timex::is_definite(date) => Step::Next(DialogValue::Text(date.to_string())),
        _ => Step::Begin(date_frame(field)),
    }
}

fn date_frame(field: DateField) -> Frame {
    Frame::DateResolver { field }
}

async fn confirm(
    caps: &Capabilities,
    step: &mut BookingStep,
    details: &BookingDetails,
    ctx: &mut TurnContext,
) -> Step {
    match report::build_confirmation(caps.reports.as_ref(), details).await {
        Ok(summary) => {
            *step = BookingStep::Confirm;
            ctx.send(format!("{summary}{}", prompts::CONFIRM_CHOICES));
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to build CO2 report");
            *step = BookingStep::ConfirmRetry;
            ctx.send(prompts::REPORT_UNAVAILABLE);
        }
    }
    Step::Wait
}

fn finish(details: &BookingDetails, value: DialogValue) -> Step {
    if value == DialogValue::Confirmed(true) {
        tracing::info!(
            origin = details.origin_city.as_deref(),
            destination = details.destination_city.as_deref(),
            departure = details.departure_date.as_deref(),
            return_date = details.return_date.as_deref(),
            budget = details.budget.as_deref(),
            "booking_accepted"
        );
        Step::End(DialogValue::Booking(details.clone()))
    } else {
        tracing::info!(
            origin = details.origin_city.as_deref(),
            destination = details.destination_city.as_deref(),
            departure = details.departure_date.as_deref(),
            return_date = details.return_date.as_deref(),
            budget = details.budget.as_deref(),
            "booking_refused"
        );
        Step::End(DialogValue::Empty)
    }
}
