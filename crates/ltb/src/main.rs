use std::sync::Arc;

use ltb_core::{
    config::Config,
    domain::ChatId,
    filter::FilterRules,
    runner::Runner,
    state::{FileStateStore, NoopStateStore, StateStore},
};
use ltb_lalafo::LalafoClient;
use ltb_telegram::TelegramClient;

#[tokio::main]
async fn main() -> Result<(), ltb_core::Error> {
    ltb_core::logging::init("ltb");

    let cfg = Config::load()?;

    let rules = FilterRules::from_config(&cfg);
    let source = Arc::new(LalafoClient::new(cfg.lalafo_api_url.clone(), rules));
    let delivery = Arc::new(TelegramClient::new(
        cfg.telegram_bot_token.clone(),
        ChatId(cfg.telegram_chat_id.clone()),
    ));

    let store: Arc<dyn StateStore> = if cfg.persist_state {
        Arc::new(FileStateStore::new(cfg.state_file.clone(), cfg.max_sent_ids))
    } else {
        Arc::new(NoopStateStore)
    };

    let runner = Runner::new(source, delivery, store, cfg.send_interval);
    runner.run().await?;

    Ok(())
}
