use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use orchestrator::ai::{AgentError, Decision, DecisionAgent, DecisionRequest};
use orchestrator::domain::ActionProposal;

/// Wraps an agent and counts its invocations.
pub struct CountingAgent {
    inner: Arc<dyn DecisionAgent>,
    calls: AtomicUsize,
}

impl CountingAgent {
    pub fn new(inner: Arc<dyn DecisionAgent>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionAgent for CountingAgent {
    async fn decide(&self, request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.decide(request).await
    }
}

/// Replays a fixed list of decisions, then passes. Remembers the feedback it
/// was given on every call.
#[derive(Default)]
pub struct ScriptedAgent {
    script: Mutex<VecDeque<Decision>>,
    feedback: Mutex<Vec<Option<String>>>,
}

impl ScriptedAgent {
    pub fn new(script: impl IntoIterator<Item = ActionProposal>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().map(Decision::Act).collect()),
            feedback: Mutex::new(Vec::new()),
        })
    }

    pub fn feedback(&self) -> Vec<Option<String>> {
        self.feedback.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionAgent for ScriptedAgent {
    async fn decide(&self, request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        self.feedback
            .lock()
            .unwrap()
            .push(request.feedback.map(str::to_string));
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Decision::Pass))
    }
}

/// Never answers within any sane turn timeout.
pub struct SlowAgent {
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl SlowAgent {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl DecisionAgent for SlowAgent {
    async fn decide(&self, _request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(Decision::Pass)
    }
}

/// Answers every request with the same error.
pub struct FailingAgent {
    error: AgentError,
    pub calls: AtomicUsize,
}

impl FailingAgent {
    pub fn new(error: AgentError) -> Arc<Self> {
        Arc::new(Self {
            error,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl DecisionAgent for FailingAgent {
    async fn decide(&self, _request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Panics on every request.
#[derive(Default)]
pub struct PanickingAgent {
    pub calls: AtomicUsize,
}

#[async_trait]
impl DecisionAgent for PanickingAgent {
    async fn decide(&self, _request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("decision agent blew up");
    }
}
