use async_trait::async_trait;

use crate::{domain::Ad, Result};

/// Hexagonal port for the classifieds listings source.
///
/// Implementations fetch one page of listings, normalize each raw item into
/// an `Ad` and apply the acceptance rules; the returned ads are already
/// filtered, in source order. A fetch-level failure (non-success response,
/// malformed body) surfaces as `Error::Source` and aborts the run.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_filtered_ads(&self) -> Result<Vec<Ad>>;
}

/// Hexagonal port for delivering one ad to the chat destination.
///
/// Telegram is the first implementation; the shape is deliberately small so
/// another messenger could fit behind it.
#[async_trait]
pub trait DeliveryPort: Send + Sync {
    async fn deliver(&self, ad: &Ad) -> Result<()>;
}
