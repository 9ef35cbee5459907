// src/services/testing.rs

// Modelo falso com respostas roteirizadas, para testar sem rede.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::services::gemini_client::{AiError, GenerateRequest, GenerativeModel};

pub struct ScriptedModel {
    replies: Mutex<VecDeque<(Duration, Result<String, AiError>)>>,
    requests: Mutex<Vec<GenerateRequest>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, AiError>>) -> Arc<Self> {
        Self::with_delays(replies.into_iter().map(|r| (Duration::ZERO, r)).collect())
    }

    /// Cada resposta só é entregue depois do atraso indicado.
    pub fn with_delays(replies: Vec<(Duration, Result<String, AiError>)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);

        let next = self.replies.lock().pop_front();
        match next {
            Some((delay, reply)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                reply
            }
            None => Err(AiError::EmptyResponse),
        }
    }
}
