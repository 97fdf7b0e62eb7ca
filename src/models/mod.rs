pub mod booking;
pub mod conversation;
pub mod dialog;
pub mod intent;
pub mod report;

pub use booking::{BookingDetails, BookingField};
pub use conversation::Conversation;
pub use dialog::{
    BookingStep, DateField, DialogState, DialogTurnResult, DialogValue, Frame, MainStep,
};
pub use intent::{Entities, EntitySpan, Intent, IntentScore, RecognizerResult};
pub use report::{Equivalent, TransportEmission};
