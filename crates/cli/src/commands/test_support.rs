//! Scripted in-memory hub client for command tests.

use async_trait::async_trait;
use promptsync_core::{AppError, AppResult};
use promptsync_hub::{HubClient, HubPrompt, PushRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// A hub client that answers from fixed tables and records every call.
#[derive(Default)]
pub struct FakeHub {
    prompts: HashMap<String, HubPrompt>,
    push_error: Option<String>,
    pulled: Mutex<Vec<String>>,
    pushed: Mutex<Vec<PushRequest>>,
}

impl FakeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `prompt` for `name`; unknown names fail to pull.
    pub fn with_prompt(mut self, name: &str, prompt: HubPrompt) -> Self {
        self.prompts.insert(name.to_string(), prompt);
        self
    }

    /// Make every push fail with `message`.
    pub fn failing_push(mut self, message: &str) -> Self {
        self.push_error = Some(message.to_string());
        self
    }

    pub fn pulled(&self) -> Vec<String> {
        self.pulled.lock().unwrap().clone()
    }

    pub fn pushed(&self) -> Vec<PushRequest> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl HubClient for FakeHub {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn pull(&self, name: &str) -> AppResult<HubPrompt> {
        self.pulled.lock().unwrap().push(name.to_string());
        self.prompts
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Hub(format!("Prompt '{}' not found", name)))
    }

    async fn push(&self, request: &PushRequest) -> AppResult<String> {
        self.pushed.lock().unwrap().push(request.clone());
        match &self.push_error {
            Some(message) => Err(AppError::Hub(message.clone())),
            None => Ok(format!("https://hub.test/{}", request.repo)),
        }
    }
}
