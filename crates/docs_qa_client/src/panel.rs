//! Chat panel: the append-only list of questions and the replies shown for them.
//!
//! Each submission owns the slot it was given at submit time, so replies that
//! arrive out of order still land next to the question that produced them.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::client::SearchClient;
use crate::messages::{Answer, Notification};

/// Shown inline when the search endpoint cannot be reached or answers garbage.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Sorry, I could not reach the documentation search service. Please try again later.";

/// Shown inline when the search succeeded but returned no match.
pub const NO_MATCH_MESSAGE: &str = "Sorry, I could not find an answer to that.";

/// Position of an exchange in the panel history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeId(usize);

impl ExchangeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Pending,
    Answered(Answer),
    NoMatch,
    Failed(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Pending => write!(f, "..."),
            Reply::Answered(answer) => match &answer.uri {
                Some(uri) => write!(f, "{}\n   source: {}", answer.text, uri),
                None => write!(f, "{}", answer.text),
            },
            Reply::NoMatch => write!(f, "{}", NO_MATCH_MESSAGE),
            Reply::Failed(message) => write!(f, "{}", message),
        }
    }
}

/// One question and what the panel shows for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub id: ExchangeId,
    pub question: String,
    pub reply: Reply,
}

/// Question/answer display list backed by a [`SearchClient`].
pub struct ChatPanel {
    client: SearchClient,
    notify_on_answer: bool,
    history: Mutex<Vec<Exchange>>,
    notifications: Mutex<Vec<JoinHandle<()>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ChatPanel {
    pub fn new(client: SearchClient, notify_on_answer: bool) -> Self {
        Self {
            client,
            notify_on_answer,
            history: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Append `question`, ask the search endpoint and record the reply.
    ///
    /// A failed request shows [`CONNECTION_ERROR_MESSAGE`] inline and sends no
    /// notification. A successful answer is reported in the background when
    /// notifications on answer are enabled.
    pub async fn submit(&self, question: &str) -> Exchange {
        let id = self.push_pending(question);

        let reply = match self.client.search(question).await {
            Ok(Some(answer)) => {
                if self.notify_on_answer {
                    self.spawn_notification(Notification::new(question, &answer, None));
                }
                Reply::Answered(answer)
            }
            Ok(None) => Reply::NoMatch,
            Err(e) => {
                tracing::warn!(error = %e, question, "search failed");
                Reply::Failed(CONNECTION_ERROR_MESSAGE.to_string())
            }
        };

        self.set_reply(id, reply)
    }

    /// Send thumbs-up/down for an answered exchange. Returns false (and sends
    /// nothing) when notifications are disabled or the exchange is unknown or
    /// has no answer.
    pub fn feedback(&self, id: ExchangeId, thumbup: bool) -> bool {
        if !self.client.can_notify() {
            tracing::info!(exchange = id.0, "feedback ignored: notifications are not configured");
            return false;
        }
        let notification = {
            let history = lock(&self.history);
            match history.get(id.0) {
                Some(Exchange {
                    question,
                    reply: Reply::Answered(answer),
                    ..
                }) => Notification::new(question, answer, Some(thumbup)),
                _ => {
                    tracing::info!(exchange = id.0, "feedback ignored: no answer to rate");
                    return false;
                }
            }
        };
        self.spawn_notification(notification);
        true
    }

    /// Snapshot of the display list in submission order.
    pub fn history(&self) -> Vec<Exchange> {
        lock(&self.history).clone()
    }

    /// Last exchange with an answer, if any.
    pub fn last_answered(&self) -> Option<ExchangeId> {
        lock(&self.history)
            .iter()
            .rev()
            .find(|e| matches!(e.reply, Reply::Answered(_)))
            .map(|e| e.id)
    }

    /// Plain-text rendering of the display list.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for exchange in lock(&self.history).iter() {
            out.push_str(&format!("Q: {}\nA: {}\n", exchange.question, exchange.reply));
        }
        out
    }

    /// Wait for every notification spawned so far. Failures were already logged.
    pub async fn drain_notifications(&self) {
        let handles: Vec<_> = lock(&self.notifications).drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "notification task aborted");
            }
        }
    }

    fn push_pending(&self, question: &str) -> ExchangeId {
        let mut history = lock(&self.history);
        let id = ExchangeId(history.len());
        history.push(Exchange {
            id,
            question: question.to_string(),
            reply: Reply::Pending,
        });
        id
    }

    fn set_reply(&self, id: ExchangeId, reply: Reply) -> Exchange {
        let mut history = lock(&self.history);
        let exchange = &mut history[id.0];
        exchange.reply = reply;
        exchange.clone()
    }

    fn spawn_notification(&self, notification: Notification) {
        if !self.client.can_notify() {
            return;
        }
        let client = self.client.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = client.notify(&notification).await {
                tracing::warn!(error = %e, question = %notification.question, "notification failed");
            }
        });
        let mut pending = lock(&self.notifications);
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}
