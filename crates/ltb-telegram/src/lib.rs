//! Telegram adapter.
//!
//! Implements the `ltb-core` DeliveryPort over the Telegram Bot API with
//! plain HTTP POST JSON calls (sendMessage / sendPhoto / sendMediaGroup).

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use ltb_core::{
    caption::build_caption,
    domain::{Ad, ChatId},
    errors::Error,
    ports::DeliveryPort,
    Result,
};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram caps media groups at 10 entries.
const MAX_MEDIA_GROUP: usize = 10;

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: ChatId,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>, chat_id: ChatId) -> Self {
        Self::with_api_base(TELEGRAM_API_BASE, token, chat_id)
    }

    /// Base override for tests / proxies.
    pub fn with_api_base(
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: ChatId,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("reqwest client build");
        Self {
            http,
            api_base: api_base.into(),
            token: token.into(),
            chat_id,
        }
    }

    /// One Bot API call. Fails on non-2xx HTTP or `"ok": false` in the body;
    /// the `result` payload is ignored beyond the boolean.
    async fn call(&self, method: &str, payload: serde_json::Value) -> Result<()> {
        let url = format!("{}/bot{}/{}", self.api_base, self.token, method);
        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Delivery(format!("telegram {method} request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Delivery(format!(
                "telegram {method} error: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Delivery(format!("telegram {method} json error: {e}")))?;

        if body.get("ok").and_then(|v| v.as_bool()) != Some(true) {
            return Err(Error::Delivery(format!(
                "telegram {method} rejected: {}",
                body.to_string().chars().take(200).collect::<String>()
            )));
        }

        debug!(method, "Telegram call ok");
        Ok(())
    }

    pub async fn send_ad(&self, ad: &Ad) -> Result<()> {
        let (method, payload) = build_request(ad, &self.chat_id);
        self.call(method, payload).await
    }
}

/// Choose the message shape by image count: text-only, single photo, or a
/// media group with the caption on the first entry only (Telegram shows one
/// caption per group).
fn build_request(ad: &Ad, chat_id: &ChatId) -> (&'static str, serde_json::Value) {
    let caption = build_caption(ad);
    let chat_id = &chat_id.0;

    match ad.image_urls.len() {
        0 => (
            "sendMessage",
            json!({ "chat_id": chat_id, "text": caption }),
        ),
        1 => (
            "sendPhoto",
            json!({
                "chat_id": chat_id,
                "photo": ad.image_urls[0],
                "caption": caption,
            }),
        ),
        _ => (
            "sendMediaGroup",
            json!({
                "chat_id": chat_id,
                "media": media_group(&ad.image_urls, &caption),
            }),
        ),
    }
}

fn media_group(image_urls: &[String], caption: &str) -> Vec<serde_json::Value> {
    image_urls
        .iter()
        .take(MAX_MEDIA_GROUP)
        .enumerate()
        .map(|(idx, url)| {
            if idx == 0 {
                json!({ "type": "photo", "media": url, "caption": caption })
            } else {
                json!({ "type": "photo", "media": url })
            }
        })
        .collect()
}

#[async_trait]
impl DeliveryPort for TelegramClient {
    async fn deliver(&self, ad: &Ad) -> Result<()> {
        self.send_ad(ad).await
    }
}
