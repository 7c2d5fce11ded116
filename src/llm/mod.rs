//! Chat-completion clients.
//!
//! The [`ChatModel`] trait is the seam between the check-in flow and the
//! language-model service; [`OpenAiChatClient`] is the production
//! implementation.

pub mod errors;
pub mod openai;

use async_trait::async_trait;

use crate::session::Turn;

pub use errors::{ModelError, ModelResult};
pub use openai::{OpenAiChatClient, OpenAiConfig};

/// Sampling temperature shared by every check-in request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Per-request generation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Response-length cap in tokens.
    pub max_tokens: u32,
    /// Ask the service to answer with a single JSON object.
    pub json_output: bool,
}

impl CompletionParams {
    /// Conversational parameters with the given token cap.
    #[must_use]
    pub const fn chat(max_tokens: u32) -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens,
            json_output: false,
        }
    }

    /// Request structured JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send an ordered message list and return the assistant's text.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an empty reply.
    async fn complete(&self, messages: &[Turn], params: CompletionParams) -> ModelResult<String>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted model used by tests across the crate.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A recorded request.
    #[derive(Clone, Debug)]
    pub struct RecordedCall {
        pub messages: Vec<Turn>,
        pub params: CompletionParams,
    }

    /// Replays queued replies in order; a queued failure surfaces as a 503
    /// status and an empty queue yields an empty completion.
    #[derive(Default)]
    pub struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, String>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl ScriptedModel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Ok(text.into()));
            self
        }

        pub fn fail(self, message: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Err(message.into()));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(
            &self,
            messages: &[Turn],
            params: CompletionParams,
        ) -> ModelResult<String> {
            self.calls.lock().unwrap().push(RecordedCall {
                messages: messages.to_vec(),
                params,
            });
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(body)) => Err(ModelError::Status { status: 503, body }),
                None => Err(ModelError::EmptyCompletion),
            }
        }
    }
}
