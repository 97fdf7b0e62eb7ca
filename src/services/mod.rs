pub mod conversation;
pub mod messaging;
pub mod nlu;
pub mod report;
pub mod timex;
