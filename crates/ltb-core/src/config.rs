use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the bot, loaded from the environment.
///
/// Filter defaults mirror the original deployment: one- and two-room
/// apartments in Бишкек, up to 50 000 KGS, owner listings only.
#[derive(Clone, Debug)]
pub struct Config {
    // External endpoints / credentials
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub lalafo_api_url: String,

    // Filter rules
    pub city_name: String,
    pub max_price: u64,
    pub min_rooms: u32,
    pub max_rooms: u32,
    /// If true, only ads where we can confidently detect "owner" are sent.
    /// When detection fails the ad is skipped.
    pub owner_only: bool,

    // Dedup state
    pub max_sent_ids: usize,
    pub state_file: PathBuf,
    /// Explicit no-persistence mode: every run treats all fetched ads as new.
    pub persist_state: bool,

    // Pacing between successful sends (Telegram flood control).
    pub send_interval: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        let telegram_chat_id = env_str("TELEGRAM_CHAT_ID").unwrap_or_default();
        let lalafo_api_url = env_str("LALAFO_API_URL").unwrap_or_default();

        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }
        if telegram_chat_id.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_CHAT_ID environment variable is required".to_string(),
            ));
        }
        if lalafo_api_url.trim().is_empty() {
            return Err(Error::Config(
                "LALAFO_API_URL environment variable is required".to_string(),
            ));
        }

        let city_name = env_str("CITY_NAME")
            .and_then(non_empty)
            .unwrap_or_else(|| "Бишкек".to_string());
        let max_price = env_u64("MAX_PRICE_KGS").unwrap_or(50_000);
        let min_rooms = env_u32("MIN_ROOMS").unwrap_or(1);
        let max_rooms = env_u32("MAX_ROOMS").unwrap_or(2);
        let owner_only = env_bool("OWNER_ONLY").unwrap_or(true);

        if min_rooms > max_rooms {
            return Err(Error::Config(format!(
                "MIN_ROOMS ({min_rooms}) must not exceed MAX_ROOMS ({max_rooms})"
            )));
        }

        let max_sent_ids = env_usize("MAX_SENT_IDS").unwrap_or(300);
        let state_file = PathBuf::from(
            env_str("STATE_FILE").unwrap_or("/tmp/lalafo-telegram-state.json".to_string()),
        );
        let persist_state = env_bool("STATE_PERSIST").unwrap_or(true);

        let send_interval = Duration::from_millis(env_u64("SEND_INTERVAL_MS").unwrap_or(1_000));

        Ok(Self {
            telegram_bot_token,
            telegram_chat_id,
            lalafo_api_url,
            city_name,
            max_price,
            min_rooms,
            max_rooms,
            owner_only,
            max_sent_ids,
            state_file,
            persist_state,
            send_interval,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
