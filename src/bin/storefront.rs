use std::sync::Arc;

use anyhow::Result;
use teloxide::dptree;
use teloxide::prelude::Bot;
use tg_shop_bots::app::App;
use tg_shop_bots::config::StorefrontConfig;
use tg_shop_bots::storefront;
use tg_shop_bots::storefront::StorefrontContext;
use tg_shop_bots::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init()?;
  let config = StorefrontConfig::from_env()?;
  info!(
    mini_app_url = %config.mini_app_url,
    admin_count = config.admins.len(),
    "starting storefront bot"
  );

  let bot = Bot::new(config.bot_token.clone());
  let context = Arc::new(StorefrontContext::from_config(&config));
  App::new(bot, storefront::build_schema(), dptree::deps![context]).run().await
}
