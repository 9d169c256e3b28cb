//! Chat orchestration: validate, call the model, classify, log.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::ai::{Gateway, classifier, fallback, prompts};
use crate::entities::dao::chat_exchange::{MAX_RESPONSE_CHARS, clip_chars};
use crate::entities::{Category, ChatExchange, ChatExchangeStore, UserProfile};
use crate::error::ServerError;
use crate::schemas::ai::chat::{ChatRequest, ChatResponse};

/// Fixed confidence recorded for every model reply.
pub const REPLY_CONFIDENCE: f64 = 0.9;

pub fn new_session_id() -> String {
    format!("session_{}", Utc::now().timestamp_millis())
}

/// Answer one chat message.
///
/// With no model configured this returns a canned apology and stores nothing.
/// A gateway failure surfaces as [`ServerError::Gateway`]; the exchange is
/// written only after a successful reply.
pub async fn chat<S: ChatExchangeStore>(
    store: &S,
    gateway: &Gateway,
    user: Option<&UserProfile>,
    req: ChatRequest,
) -> Result<ChatResponse, ServerError> {
    let message = match req.message.as_deref() {
        Some(m) if !m.is_empty() => m.to_owned(),
        _ => return Err(ServerError::BadRequest("Message is required".into())),
    };
    req.validate()?;

    let session_id = req
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(new_session_id);

    if !gateway.is_configured() {
        info!(session_id = %session_id, "language model not configured; sending canned chat reply");
        return Ok(ChatResponse {
            reply: fallback::CHAT_UNAVAILABLE_REPLY.to_owned(),
            category: Category::General,
            session_id,
        });
    }

    let started = Instant::now();
    let reply = gateway.complete(&prompts::chat(&message)).await.map_err(|e| {
        warn!(error = %e, session_id = %session_id, "chat completion failed");
        ServerError::Gateway(e)
    })?;
    let response_time_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

    let category = classifier::resolve(req.category, &message);

    store
        .insert_exchange(ChatExchange {
            id: Uuid::new_v4().to_string(),
            user_id: user.map(|u| u.id.clone()),
            session_id: session_id.clone(),
            query: message,
            response: clip_chars(&reply, MAX_RESPONSE_CHARS),
            category,
            confidence: REPLY_CONFIDENCE,
            feedback: None,
            response_time_ms,
            is_anonymous: user.is_none(),
            created_at: Utc::now(),
        })
        .await?;

    Ok(ChatResponse {
        reply,
        category,
        session_id,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ai::gateway::ScriptedModel;
    use crate::entities::SqliteStore;
    use tracing_test::traced_test;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: Some(message.to_owned()),
            ..Default::default()
        }
    }

    async fn logged(store: &SqliteStore, user_id: &str) -> Vec<ChatExchange> {
        store
            .list_exchanges_for_user(user_id, None, 100, 0)
            .await
            .unwrap()
            .0
    }

    #[tokio::test]
    async fn unconfigured_gateway_replies_with_apology() {
        let store = SqliteStore::memory().await;
        let resp = chat(&store, &Gateway::unconfigured(), None, request("yoga for stress?"))
            .await
            .unwrap();
        assert_eq!(resp.category, Category::General);
        assert!(!resp.reply.is_empty());
        assert!(resp.session_id.starts_with("session_"));
        assert!(resp.session_id["session_".len()..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(store.exchange_stats().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn missing_or_empty_message_is_rejected() {
        let store = SqliteStore::memory().await;
        let gateway = Gateway::new(ScriptedModel::replying("hi"));
        for req in [ChatRequest::default(), request("")] {
            let err = chat(&store, &gateway, None, req).await.unwrap_err();
            assert!(matches!(err, ServerError::BadRequest(ref m) if m == "Message is required"));
        }
    }

    #[tokio::test]
    async fn overlong_message_is_rejected_before_the_model() {
        let store = SqliteStore::memory().await;
        let model = ScriptedModel::replying("hi");
        let gateway = Gateway::new(model.clone());
        let err = chat(&store, &gateway, None, request(&"x".repeat(1001)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn success_logs_exactly_one_exchange() {
        let store = SqliteStore::memory().await;
        let user = store.seed_user("u1", "patient").await;
        let model = ScriptedModel::replying("Try a gentle asana before bed.");
        let gateway = Gateway::new(model.clone());

        let mut req = request("Which YOGA pose helps sleep?");
        req.session_id = Some("session_42".into());
        let resp = chat(&store, &gateway, Some(&user), req).await.unwrap();

        assert_eq!(resp.category, Category::Yoga);
        assert_eq!(resp.session_id, "session_42");
        assert!(model.prompts.lock().unwrap()[0].ends_with("User: Which YOGA pose helps sleep?"));

        let rows = logged(&store, "u1").await;
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.confidence, REPLY_CONFIDENCE);
        assert!(row.response_time_ms >= 0);
        assert_eq!(row.session_id, "session_42");
        assert!(!row.is_anonymous);
        assert_eq!(row.response, "Try a gentle asana before bed.");
    }

    #[tokio::test]
    async fn explicit_category_wins_and_long_replies_are_clipped_in_storage() {
        let store = SqliteStore::memory().await;
        let user = store.seed_user("u1", "patient").await;
        let long_reply = "r".repeat(MAX_RESPONSE_CHARS + 50);
        let gateway = Gateway::new(ScriptedModel::replying(&long_reply));

        let mut req = request("yoga please");
        req.category = Some(Category::Symptoms);
        let resp = chat(&store, &gateway, Some(&user), req).await.unwrap();

        assert_eq!(resp.category, Category::Symptoms);
        assert_eq!(resp.reply.len(), MAX_RESPONSE_CHARS + 50);
        let rows = logged(&store, "u1").await;
        assert_eq!(rows[0].response.chars().count(), MAX_RESPONSE_CHARS);
    }

    #[tokio::test]
    async fn gateway_failure_writes_nothing() {
        let store = SqliteStore::memory().await;
        let gateway = Gateway::new(ScriptedModel::failing());
        let err = chat(&store, &gateway, None, request("hello")).await.unwrap_err();
        assert!(matches!(err, ServerError::Gateway(_)));
        assert_eq!(store.exchange_stats().await.unwrap().total, 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn gateway_failure_is_logged_with_session() {
        let store = SqliteStore::memory().await;
        let gateway = Gateway::new(ScriptedModel::failing());
        let mut req = request("hello");
        req.session_id = Some("session_99".into());
        let _ = chat(&store, &gateway, None, req).await;
        assert!(logs_contain("chat completion failed"));
        assert!(logs_contain("session_99"));
    }

    #[tokio::test]
    async fn generated_session_id_is_returned_and_stored() {
        let store = SqliteStore::memory().await;
        let user = store.seed_user("u1", "patient").await;
        let gateway = Gateway::new(ScriptedModel::replying("Drink warm water."));

        let resp = chat(&store, &gateway, Some(&user), request("morning routine"))
            .await
            .unwrap();

        let digits = resp.session_id.strip_prefix("session_").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        let rows = logged(&store, "u1").await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].session_id, resp.session_id);
    }

    #[tokio::test]
    async fn unconfigured_gateway_echoes_caller_session() {
        let store = SqliteStore::memory().await;
        let mut req = request("hello");
        req.session_id = Some("session_1700000000000".into());
        let resp = chat(&store, &Gateway::unconfigured(), None, req).await.unwrap();
        assert_eq!(resp.session_id, "session_1700000000000");
        assert_eq!(resp.reply, fallback::CHAT_UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn anonymous_exchange_is_flagged() {
        let store = SqliteStore::memory().await;
        let gateway = Gateway::new(ScriptedModel::replying("Breathe slowly."));
        chat(&store, &gateway, None, request("how to relax")).await.unwrap();

        let stats = store.exchange_stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.unique_users, 0);
        assert_eq!(stats.by_category, vec![("lifestyle".to_owned(), 1)]);
    }
}
