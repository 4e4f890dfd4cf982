//! Lalafo listings adapter.
//!
//! Implements the `ltb-core` ListingSource port over the Lalafo classifieds
//! API: one GET per run, loose-schema item deserialization, normalization
//! into canonical ads and rule filtering.

use async_trait::async_trait;
use tracing::{debug, info};

use ltb_core::{domain::Ad, errors::Error, filter::FilterRules, ports::ListingSource, Result};

pub mod normalize;

use normalize::{map_item_to_ad, RawItem};

#[derive(Clone)]
pub struct LalafoClient {
    http: reqwest::Client,
    api_url: String,
    rules: FilterRules,
}

impl LalafoClient {
    pub fn new(api_url: impl Into<String>, rules: FilterRules) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("reqwest client build");
        Self {
            http,
            api_url: api_url.into(),
            rules,
        }
    }

    /// Fetch one page of listings and return the ads that survive
    /// normalization and filtering, in source order.
    ///
    /// A non-success response or an unparsable body aborts the run with
    /// `Error::Source`; a missing or non-array `items` field is treated as an
    /// empty listing page.
    pub async fn fetch_filtered_ads(&self) -> Result<Vec<Ad>> {
        let resp = self
            .http
            .get(&self.api_url)
            .header("Accept", "application/json, text/plain, */*")
            .header("User-Agent", "Mozilla/5.0 (compatible; LalafoTelegramBot/1.0)")
            .header("device", "pc")
            .send()
            .await
            .map_err(|e| Error::Source(format!("lalafo request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Source(format!(
                "lalafo api error: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Source(format!("lalafo json error: {e}")))?;

        Ok(ads_from_response(&body, &self.rules))
    }
}

#[async_trait]
impl ListingSource for LalafoClient {
    async fn fetch_filtered_ads(&self) -> Result<Vec<Ad>> {
        LalafoClient::fetch_filtered_ads(self).await
    }
}

/// Normalize and filter every entry of the response's `items` array.
///
/// Items without a usable id (or that are not objects at all) are skipped;
/// mis-typed individual fields only blank that field. Drops are reported as
/// aggregate counts.
pub fn ads_from_response(body: &serde_json::Value, rules: &FilterRules) -> Vec<Ad> {
    let items = match body.get("items").and_then(|v| v.as_array()) {
        Some(items) => items,
        None => {
            debug!("Response has no items array, treating as empty");
            return Vec::new();
        }
    };

    let mut ads = Vec::new();
    let mut skipped = 0usize;
    let mut rejected = 0usize;

    for value in items {
        let item: RawItem = match serde_json::from_value(value.clone()) {
            Ok(item) => item,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let Some(ad) = map_item_to_ad(&item, &rules.city) else {
            skipped += 1;
            continue;
        };

        if rules.accepts(&ad) {
            ads.push(ad);
        } else {
            rejected += 1;
        }
    }

    info!(
        total = items.len(),
        accepted = ads.len(),
        rejected,
        skipped,
        "Filtered listing items"
    );
    ads
}
