//! Raw item → canonical `Ad` normalization.
//!
//! The Lalafo API is loosely typed: any field may be absent or arrive in an
//! alternate shape (price as number or formatted string, images as objects or
//! plain URLs, phone as single field or list). Every extractor here tolerates
//! that independently of the others.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use ltb_core::domain::Ad;

/// Unvalidated listing record as received from the API.
///
/// Every field decodes leniently: a mis-typed value degrades to `None` for
/// that field alone instead of failing the whole item, so each attribute's
/// extraction stays independent of the others.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<IdValue>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub city_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub region_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub price_string: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub user_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub owner: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub phones: Option<Vec<LooseEntry<String>>>,

    #[serde(deserialize_with = "lenient")]
    pub images: Option<Vec<LooseEntry<RawImage>>>,
    #[serde(deserialize_with = "lenient")]
    pub photos: Option<Vec<LooseEntry<String>>>,

    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub attributes: Option<Vec<LooseEntry<RawAttribute>>>,
}

/// Decode a field to `None` on type mismatch instead of rejecting the item.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// List entry that may be null or junk-shaped; only valid entries are used.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum LooseEntry<T> {
    Valid(T),
    Junk(serde_json::Value),
}

impl<T> LooseEntry<T> {
    fn valid(&self) -> Option<&T> {
        match self {
            LooseEntry::Valid(t) => Some(t),
            LooseEntry::Junk(_) => None,
        }
    }
}

/// Source ids arrive either as numbers or as strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Num(i64),
    Str(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAttribute {
    pub slug: Option<String>,
    pub value: Option<AttrValue>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Num(f64),
    Str(String),
}

/// Build the canonical ad, or `None` when the item has no usable id.
pub fn map_item_to_ad(item: &RawItem, default_city: &str) -> Option<Ad> {
    let id = match &item.id {
        Some(IdValue::Num(n)) => n.to_string(),
        Some(IdValue::Str(s)) if !s.is_empty() => s.clone(),
        _ => return None,
    };

    let (price, currency) = extract_price(item);

    Some(Ad {
        id,
        title: item
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Объявление".to_string()),
        city: extract_city(item, default_city),
        district: extract_district(item),
        rooms: extract_rooms(item),
        price,
        currency,
        is_owner: detect_is_owner(item),
        phone: extract_phone(item),
        url: extract_url(item),
        image_urls: extract_images(item),
    })
}

fn extract_city(item: &RawItem, default_city: &str) -> String {
    item.city_name
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| item.city.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| default_city.to_string())
}

fn extract_district(item: &RawItem) -> Option<String> {
    for field in [&item.region_name, &item.location] {
        if let Some(s) = field {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn extract_price(item: &RawItem) -> (Option<u64>, Option<String>) {
    if let Some(price) = item.price {
        return (Some(price as u64), Some(default_currency(item)));
    }
    if let Some(s) = &item.price_string {
        if let Some(price) = parse_digits(s) {
            return (Some(price), Some(default_currency(item)));
        }
    }
    (None, item.currency.clone())
}

fn default_currency(item: &RawItem) -> String {
    item.currency.clone().unwrap_or_else(|| "KGS".to_string())
}

/// Digits-only parse: strip every non-digit character and convert. "45 000
/// сом" → 45000. `None` when no digits survive (or the value overflows).
fn parse_digits(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

fn rooms_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*комнат").expect("rooms regex"))
}

fn extract_rooms(item: &RawItem) -> Option<u32> {
    // Structured attributes first: a slug containing "rooms" or the
    // transliterated "komnat".
    if let Some(attributes) = &item.attributes {
        for attr in attributes.iter().filter_map(LooseEntry::valid) {
            let slug = attr.slug.as_deref().unwrap_or("").to_lowercase();
            if !slug.contains("rooms") && !slug.contains("komnat") {
                continue;
            }
            match &attr.value {
                Some(AttrValue::Num(n)) => return Some(*n as u32),
                Some(AttrValue::Str(s)) => {
                    if let Some(n) = parse_digits(s) {
                        return Some(n as u32);
                    }
                }
                None => {}
            }
        }
    }

    // Fall back to free text: "2 комнатная", "сдаю 3 комнаты", ...
    let text = combined_text(item);
    rooms_pattern()
        .captures(&text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

fn detect_is_owner(item: &RawItem) -> Option<bool> {
    let role = item
        .user_type
        .as_deref()
        .or(item.owner.as_deref())
        .unwrap_or("")
        .to_lowercase();
    if role.contains("owner") || role.contains("собствен") {
        return Some(true);
    }
    if role.contains("агент") || role.contains("риелтор") {
        return Some(false);
    }

    let text = combined_text(item);
    if text.contains("собственник") {
        return Some(true);
    }
    if text.contains("риелтор") || text.contains("агентство") {
        return Some(false);
    }

    None
}

fn combined_text(item: &RawItem) -> String {
    format!(
        "{} {}",
        item.title.as_deref().unwrap_or(""),
        item.description.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

fn extract_phone(item: &RawItem) -> Option<String> {
    if let Some(phone) = &item.phone {
        let trimmed = phone.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    if let Some(phones) = &item.phones {
        for phone in phones.iter().filter_map(LooseEntry::valid) {
            let trimmed = phone.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn extract_images(item: &RawItem) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    let mut push = |url: &str| {
        let trimmed = url.trim();
        if !trimmed.is_empty() && !urls.iter().any(|u| u == trimmed) {
            urls.push(trimmed.to_string());
        }
    };

    if let Some(images) = &item.images {
        for img in images.iter().filter_map(LooseEntry::valid) {
            if let Some(url) = &img.url {
                push(url);
            }
        }
    }
    if let Some(photos) = &item.photos {
        for photo in photos.iter().filter_map(LooseEntry::valid) {
            push(photo);
        }
    }

    urls
}

fn extract_url(item: &RawItem) -> String {
    item.url
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| item.link.clone().filter(|s| !s.is_empty()))
        .unwrap_or_default()
}
