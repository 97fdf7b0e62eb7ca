//! Dialog engine for the flight booking conversation.
//!
//! A conversation is a stack of frames (see [`DialogState`]). Each turn the
//! engine checks for global interruptions, hands the utterance to the frame on
//! top, then keeps advancing frames until one of them waits for input.

pub mod booking;
pub mod date_resolver;
pub mod interrupt;
pub mod main_flow;
pub mod prompts;

use crate::models::{BookingStep, DialogState, DialogTurnResult, DialogValue, Frame, MainStep};
use crate::services::nlu::Recognizer;
use crate::services::report::ReportFetcher;

use self::interrupt::Interruption;

/// External services the dialogs call into.
pub struct Capabilities {
    /// `None` when NLU is not configured.
    pub recognizer: Option<Box<dyn Recognizer>>,
    pub reports: Box<dyn ReportFetcher>,
}

/// One user utterance and everything the bot says back during the turn.
#[derive(Debug, Default)]
pub struct TurnContext {
    pub utterance: String,
    pub outbox: Vec<String>,
}

impl TurnContext {
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            outbox: Vec::new(),
        }
    }

    pub fn send(&mut self, text: impl Into<String>) {
        self.outbox.push(text.into());
    }

    pub fn into_replies(self) -> Vec<String> {
        self.outbox
    }
}

/// What a step asks the engine to do next.
#[derive(Debug)]
pub enum Step {
    /// A prompt went out; stop until the next turn.
    Wait,
    /// Advance the top frame to its next step with this value.
    Next(DialogValue),
    /// Push a child dialog and start it.
    Begin(Frame),
    /// Pop the top frame and resume its parent with this value.
    End(DialogValue),
    /// Replace the top frame with a fresh one and start it.
    Restart(Frame),
}

pub struct DialogEngine<'a> {
    caps: &'a Capabilities,
}

impl<'a> DialogEngine<'a> {
    pub fn new(caps: &'a Capabilities) -> Self {
        Self { caps }
    }

    pub async fn on_turn(
        &self,
        state: &mut DialogState,
        ctx: &mut TurnContext,
    ) -> DialogTurnResult {
        if state.is_empty() {
            return self.drive(state, ctx, Step::Begin(main_flow::frame(None))).await;
        }

        match interrupt::detect(&ctx.utterance) {
            Some(Interruption::Help) => {
                ctx.send(prompts::HELP);
                return DialogTurnResult::Waiting;
            }
            Some(Interruption::Cancel) => {
                tracing::info!(stack = %state.describe(), "dialogs cancelled by user");
                ctx.send(prompts::CANCELLED);
                state.cancel_all();
                self.drive(state, ctx, Step::Next(DialogValue::Empty)).await;
                return DialogTurnResult::Cancelled;
            }
            None => {}
        }

        let step = self.continue_top(state, ctx).await;
        self.drive(state, ctx, step).await
    }

    async fn drive(
        &self,
        state: &mut DialogState,
        ctx: &mut TurnContext,
        mut step: Step,
    ) -> DialogTurnResult {
        let mut result = DialogTurnResult::Waiting;

        loop {
            step = match step {
                Step::Wait => return result,
                Step::Next(value) => self.resume_top(state, ctx, value).await,
                Step::Begin(frame) => {
                    state.stack.push(frame);
                    self.begin_top(state, ctx)
                }
                Step::End(value) => {
                    if let Some(Frame::Booking { .. }) = state.stack.pop() {
                        result = DialogTurnResult::Complete(value.clone());
                    }
                    if state.is_empty() {
                        return DialogTurnResult::Complete(value);
                    }
                    Step::Next(value)
                }
                Step::Restart(frame) => {
                    state.stack.pop();
                    state.stack.push(frame);
                    self.begin_top(state, ctx)
                }
            };
        }
    }

    fn begin_top(&self, state: &mut DialogState, ctx: &mut TurnContext) -> Step {
        if let Some(Frame::DateResolver { field }) = state.top() {
            let field = *field;
            let initial = state
                .booking()
                .and_then(|details| details.slot(field.booking_field()))
                .map(str::to_string);
            return date_resolver::begin(field, initial.as_deref(), ctx);
        }

        match state.stack.last_mut() {
            Some(Frame::Main { step, prompt }) => {
                *step = MainStep::Intro;
                main_flow::intro(self.caps, prompt.as_deref(), ctx)
            }
            Some(Frame::Booking { step, details }) => {
                *step = BookingStep::Origin;
                booking::begin(details, ctx)
            }
            Some(Frame::DateResolver { .. }) | None => Step::Wait,
        }
    }

    async fn resume_top(
        &self,
        state: &mut DialogState,
        ctx: &mut TurnContext,
        value: DialogValue,
    ) -> Step {
        match state.stack.last_mut() {
            Some(Frame::Main { step, .. }) => match *step {
                MainStep::Intro => {
                    *step = MainStep::Act;
                    main_flow::act(self.caps, value, ctx).await
                }
                MainStep::Act | MainStep::Final => {
                    *step = MainStep::Final;
                    main_flow::finish(value, ctx)
                }
            },
            Some(Frame::Booking { step, details }) => {
                *step = step.next();
                booking::run_step(self.caps, step, details, value, ctx).await
            }
            // The resolver never starts children, so a resume just finishes it.
            Some(Frame::DateResolver { .. }) => Step::End(value),
            None => Step::Begin(main_flow::frame(None)),
        }
    }

    async fn continue_top(&self, state: &mut DialogState, ctx: &mut TurnContext) -> Step {
        let utterance = ctx.utterance.clone();

        match state.stack.last_mut() {
            Some(Frame::Main {
                step: MainStep::Intro,
                prompt,
            }) => {
                if utterance.trim().is_empty() {
                    ctx.send(prompt.as_deref().unwrap_or(prompts::HELLO));
                    return Step::Wait;
                }
                Step::Next(DialogValue::Text(utterance.trim().to_string()))
            }
            Some(Frame::Main { .. }) => Step::Restart(main_flow::frame(None)),
            Some(Frame::Booking { step, details }) => {
                booking::on_reply(self.caps, step, details, &utterance, ctx).await
            }
            Some(Frame::DateResolver { field }) => date_resolver::on_reply(*field, &utterance, ctx),
            None => Step::Begin(main_flow::frame(None)),
        }
    }
}
