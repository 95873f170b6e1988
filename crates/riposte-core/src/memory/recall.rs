//! Context recall for reply generation.
//!
//! Retrieves the exchanges most similar to the incoming message and
//! formats them as a context block for the prompt. Recall is strictly
//! best-effort: any store failure is logged and swallowed, and generation
//! proceeds with no context.

use tracing::{debug, warn};

use riposte_types::exchange::ChatId;

use crate::memory::store::ExchangeStore;

/// Number of past exchanges recalled per request.
pub const DEFAULT_TOP_K: usize = 3;

/// Build the recalled-context block for `message`, or an empty string.
///
/// Empty when the chat has no stored exchanges, when the search returns
/// nothing, or when any store operation fails.
pub async fn recall_context<S: ExchangeStore>(
    store: &S,
    chat_id: &ChatId,
    message: &str,
    top_k: usize,
) -> String {
    let count = match store.count(chat_id).await {
        Ok(count) => count,
        Err(err) => {
            warn!(chat = %chat_id, error = %err, "context recall failed, continuing without");
            return String::new();
        }
    };
    if count == 0 {
        return String::new();
    }

    let limit = top_k.min(count as usize);
    let hits = match store.query(chat_id, message, limit).await {
        Ok(hits) => hits,
        Err(err) => {
            warn!(chat = %chat_id, error = %err, "context recall failed, continuing without");
            return String::new();
        }
    };
    if hits.is_empty() {
        return String::new();
    }

    let mut context =
        String::from("\n--- RELEVANT PAST CONVERSATIONS (Retrieved via Semantic Search) ---\n");
    for (i, hit) in hits.iter().enumerate() {
        context.push_str(&format!("\n{}. Past question: \"{}\"\n", i + 1, hit.user_message));
        context.push_str(&format!(
            "   You ({}) replied: \"{}\"\n",
            hit.persona, hit.response
        ));
    }
    context.push_str("\n--- END OF RETRIEVED CONTEXT ---\n");
    context.push_str(
        "Note: These conversations were retrieved because they are semantically similar to the \
         current message. Reference them naturally if relevant.\n\n",
    );

    debug!(chat = %chat_id, recalled = hits.len(), "recalled past exchanges");
    context
}
