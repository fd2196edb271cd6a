use std::sync::Arc;

use anyhow::Result;
use teloxide::dptree;
use teloxide::prelude::Bot;
use tg_shop_bots::app::App;
use tg_shop_bots::bot;
use tg_shop_bots::bot::AppContext;
use tg_shop_bots::config::CatalogConfig;
use tg_shop_bots::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init()?;
  let config = CatalogConfig::from_env()?;
  info!(
    admin_count = config.admins.len(),
    orders_file = %config.orders_file.display(),
    "starting catalog bot"
  );

  let bot = Bot::new(config.bot_token.clone());
  let context = Arc::new(AppContext::from_config(&config));
  App::new(bot, bot::build_schema(), dptree::deps![context]).run().await
}
