use std::sync::atomic::{AtomicBool, Ordering};

use gemchat_llm::GeminiClient;
use gemchat_store::{ConversationHistory, Message, RateLimiter, Role};
use gemchat_utils::formatting::format_message;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::{ChatError, GENERIC_ERROR_MESSAGE};

/// What the UI should render for one submitted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Formatted markup of the model's answer.
    Model(String),
    /// Generic failure text; details only go to the log.
    Error(String),
}

impl Reply {
    pub fn markup(&self) -> &str {
        match self {
            Reply::Model(markup) | Reply::Error(markup) => markup,
        }
    }
}

/// One chat conversation: history, rate limiter and the in-flight flag.
///
/// The user turn is recorded before the remote call, so a failed call leaves
/// it in the history with no model reply after it.
#[derive(Debug)]
pub struct ChatSession {
    client: GeminiClient,
    history: Mutex<ConversationHistory>,
    limiter: Mutex<RateLimiter>,
    busy: AtomicBool,
}

impl ChatSession {
    pub fn new(client: GeminiClient, limiter: RateLimiter) -> Self {
        Self {
            client,
            history: Mutex::new(ConversationHistory::new()),
            limiter: Mutex::new(limiter),
            busy: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    /// Rate-check, record the user turn, call the endpoint and record the reply.
    ///
    /// Does not take the busy flag: overlapping calls, or a [`reset`] while
    /// one is in flight, can interleave turns. UIs go through [`submit`],
    /// which allows one request at a time.
    ///
    /// [`reset`]: ChatSession::reset
    /// [`submit`]: ChatSession::submit
    pub async fn send(&self, user_text: &str) -> Result<String, ChatError> {
        if !self.limiter.lock().await.try_admit() {
            return Err(ChatError::RateLimitExceeded);
        }

        let context = {
            let mut history = self.history.lock().await;
            history.append(Role::User, user_text);
            history.snapshot()
        };

        let reply = self.client.generate(&context).await?;

        self.history.lock().await.append(Role::Model, reply.clone());
        Ok(reply)
    }

    /// UI entry point. Blank input and input arriving while a request is in
    /// flight are dropped (`None`). Failures are logged and collapsed into
    /// [`GENERIC_ERROR_MESSAGE`].
    pub async fn submit(&self, raw: &str) -> Option<Reply> {
        if raw.trim().is_empty() {
            return None;
        }

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!("request already in flight; input ignored");
            return None;
        };

        match self.send(raw).await {
            Ok(reply) => Some(Reply::Model(format_message(&reply))),
            Err(error) => {
                error!(%error, context = "send", "chat request failed");
                Some(Reply::Error(GENERIC_ERROR_MESSAGE.to_owned()))
            }
        }
    }

    pub async fn snapshot(&self) -> Vec<Message> {
        self.history.lock().await.snapshot()
    }

    pub async fn reset(&self) {
        self.history.lock().await.reset();
        info!("conversation cleared");
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds the busy flag for the lifetime of one request; released on drop.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::BusyGuard;

    #[test]
    fn busy_guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);

        let first = BusyGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(BusyGuard::acquire(&flag).is_none());

        drop(first);
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
