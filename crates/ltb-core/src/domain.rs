/// Canonical, filter-ready representation of one classifieds listing.
///
/// Produced by the listings-source adapter from a raw item. The only hard
/// invariant is that `id` is non-empty: the normalizer refuses to build an
/// `Ad` for items without a usable id.
#[derive(Clone, Debug, PartialEq)]
pub struct Ad {
    pub id: String,
    pub title: String,
    pub city: String,
    pub district: Option<String>,
    pub rooms: Option<u32>,
    pub price: Option<u64>,
    pub currency: Option<String>,
    /// `None` means "could not determine" (different from `Some(false)`).
    pub is_owner: Option<bool>,
    pub phone: Option<String>,
    pub url: String,
    pub image_urls: Vec<String>,
}

/// Telegram chat id as the Bot API accepts it (numeric id or `@channel`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub String);
