use serde::{Deserialize, Serialize};

use super::booking::{BookingDetails, BookingField};

/// Value handed from a finished step or dialog to whatever resumes next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DialogValue {
    Empty,
    Text(String),
    Confirmed(bool),
    Booking(BookingDetails),
}

impl DialogValue {
    pub fn into_text(self) -> Option<String> {
        match self {
            DialogValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Outcome of a turn, as seen by the caller of the dialog engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogTurnResult {
    Waiting,
    Complete(DialogValue),
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MainStep {
    Intro,
    Act,
    Final,
}

/// Position of the booking waterfall. Each variant names the step that last ran.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Origin,
    Destination,
    Departure,
    Return,
    Budget,
    Confirm,
    ConfirmRetry,
    Final,
}

impl BookingStep {
    pub fn next(self) -> Self {
        match self {
            BookingStep::Origin => BookingStep::Destination,
            BookingStep::Destination => BookingStep::Departure,
            BookingStep::Departure => BookingStep::Return,
            BookingStep::Return => BookingStep::Budget,
            BookingStep::Budget => BookingStep::Confirm,
            BookingStep::Confirm | BookingStep::ConfirmRetry | BookingStep::Final => {
                BookingStep::Final
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Departure,
    Return,
}

impl DateField {
    pub fn booking_field(self) -> BookingField {
        match self {
            DateField::Departure => BookingField::DepartureDate,
            DateField::Return => BookingField::ReturnDate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "dialog", rename_all = "snake_case")]
pub enum Frame {
    Main {
        step: MainStep,
        prompt: Option<String>,
    },
    Booking {
        step: BookingStep,
        details: BookingDetails,
    },
    DateResolver {
        field: DateField,
    },
}

impl Frame {
    pub fn name(&self) -> &'static str {
        match self {
            Frame::Main { .. } => "main",
            Frame::Booking { .. } => "booking",
            Frame::DateResolver { .. } => "date_resolver",
        }
    }
}

/// Dialog stack of one conversation. The bottom frame is the top-level flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DialogState {
    pub stack: Vec<Frame>,
}

impl DialogState {
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.stack.last()
    }

    /// The in-progress booking record, if a booking flow is active.
    pub fn booking(&self) -> Option<&BookingDetails> {
        self.stack.iter().rev().find_map(|frame| match frame {
            Frame::Booking { details, .. } => Some(details),
            _ => None,
        })
    }

    /// Drops every frame above the bottom one and parks the top-level flow
    /// as if its child dialog had just ended.
    pub fn cancel_all(&mut self) {
        self.stack.truncate(1);
        if let Some(Frame::Main { step, .. }) = self.stack.first_mut() {
            *step = MainStep::Act;
        }
    }

    pub fn describe(&self) -> String {
        self.stack
            .iter()
            .map(Frame::name)
            .collect::<Vec<_>>()
            .join(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_all_keeps_bottom_frame() {
        let mut state = DialogState {
            stack: vec![
                Frame::Main {
                    step: MainStep::Act,
                    prompt: None,
                },
                Frame::Booking {
                    step: BookingStep::Return,
                    details: BookingDetails {
                        origin_city: Some("Paris".to_string()),
                        ..Default::default()
                    },
                },
                Frame::DateResolver {
                    field: DateField::Return,
                },
            ],
        };

        state.cancel_all();

        assert_eq!(state.stack.len(), 1);
        assert!(state.booking().is_none());
        assert_eq!(state.describe(), "main");
    }

    #[test]
    fn test_state_serializes_round_trip() {
        let state = DialogState {
            stack: vec![
                Frame::Main {
                    step: MainStep::Intro,
                    prompt: Some("again?".to_string()),
                },
                Frame::DateResolver {
                    field: DateField::Departure,
                },
            ],
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"dialog\":\"date_resolver\""));
        let back: DialogState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
