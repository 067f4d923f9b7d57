//! Assistant response resolver.
//!
//! One remote attempt, then the deterministic local rule engine. The
//! remote hop is the only suspension point and the only fallback
//! boundary: no retries, and a transport timeout is treated like any
//! other failure.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use callguard_common::case_view::CaseView;
use callguard_common::context::{contextual_suggestions, ConversationContext};
use callguard_common::fallback::local_fallback;
use callguard_common::formatter::format_backend_reply;
use callguard_common::response::AssistantResponse;
use callguard_common::store::CaseStore;

use crate::chat::ChatBackend;

/// Resolve one question to exactly one response. Never fails: every
/// transport problem falls through to the local rule engine.
pub async fn resolve<B, L>(
    question: &str,
    context: &ConversationContext,
    case_lookup: L,
    backend: &B,
) -> AssistantResponse
where
    B: ChatBackend + ?Sized,
    L: Fn(&str) -> Option<CaseView>,
{
    match backend.ask(question).await {
        Ok(payload) => format_backend_reply(&payload),
        Err(err) => {
            debug!(error = %err, "chat backend unavailable, using local rules");
            local_fallback(question, context, case_lookup)
        }
    }
}

/// Who said a history line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One line of the conversation, for context persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot handed to the UI when it wants to persist or restore a
/// conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub context: ConversationContext,
    pub message_count: usize,
    pub last_message: Option<HistoryEntry>,
}

/// Stateful wrapper over [`resolve`]: owns the conversation context, the
/// chat transport, the case repository handle, and the message history.
pub struct Assistant<B: ChatBackend> {
    backend: B,
    store: Arc<Mutex<CaseStore>>,
    context: ConversationContext,
    history: Vec<HistoryEntry>,
}

impl<B: ChatBackend> Assistant<B> {
    pub fn new(backend: B, store: Arc<Mutex<CaseStore>>) -> Self {
        Self {
            backend,
            store,
            context: ConversationContext::default(),
            history: Vec::new(),
        }
    }

    /// Update the stored context from a navigation event. Dashboard-like
    /// pages collapse to `home`; only the investigation page keeps a
    /// selected case.
    pub fn set_context(&mut self, context: ConversationContext) {
        self.context = canonical_context(context);
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Repository handle, for the fetch layer to load cases into.
    pub fn store(&self) -> Arc<Mutex<CaseStore>> {
        Arc::clone(&self.store)
    }

    /// Suggestion chips for the current context.
    pub fn suggestions(&self) -> Vec<&'static str> {
        contextual_suggestions(Some(&self.context))
    }

    /// Ask one question and record both sides in the history.
    pub async fn ask(&mut self, question: &str) -> AssistantResponse {
        self.history.push(HistoryEntry {
            sender: Sender::User,
            text: question.to_string(),
            timestamp: Utc::now(),
        });

        let store = Arc::clone(&self.store);
        let lookup = move |call_id: &str| {
            let guard = store.lock().ok()?;
            guard.find(call_id).cloned()
        };
        let response = resolve(question, &self.context, lookup, &self.backend).await;

        self.history.push(HistoryEntry {
            sender: Sender::Assistant,
            text: response.content.clone(),
            timestamp: Utc::now(),
        });
        response
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            context: self.context.clone(),
            message_count: self.history.len(),
            last_message: self.history.last().cloned(),
        }
    }
}

fn canonical_context(context: ConversationContext) -> ConversationContext {
    match context.page.as_str() {
        "investigation" if context.call_id.is_some() => context,
        "dashboard" | "cases" | "home" => ConversationContext::page("home"),
        "risk-queue" => ConversationContext::page("risk-queue"),
        _ => context,
    }
}
