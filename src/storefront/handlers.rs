use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::ButtonRequest;
use teloxide::types::ChatId;
use teloxide::types::KeyboardButton;
use teloxide::types::KeyboardMarkup;
use teloxide::types::Message;
use teloxide::types::WebAppData;
use teloxide::types::WebAppInfo;
use tracing::info;
use tracing::instrument;
use tracing::warn;
use url::Url;

use crate::storefront::Command;
use crate::storefront::HandlerResult;
use crate::storefront::context::StorefrontContext;
use crate::storefront::intake::Intake;
use crate::storefront::intake::Notice;
use crate::storefront::intake::accept_deep_link;
use crate::storefront::intake::accept_mini_app_order;

type SharedContext = Arc<StorefrontContext>;

const WELCOME_TEXT: &str = "Добро пожаловать в магазин!";
const OPEN_SHOP_LABEL: &str = "🛍️ Открыть магазин";

pub fn build_schema() -> UpdateHandler<anyhow::Error> {
  let command_handler = dptree::entry()
    .filter_command::<Command>()
    .branch(dptree::case![Command::Start(payload)].endpoint(handle_start));

  let web_app_handler = dptree::filter_map(|msg: Message| msg.web_app_data().cloned()).endpoint(handle_web_app_data);

  Update::filter_message().branch(command_handler).branch(web_app_handler)
}

#[instrument(skip(bot, ctx, msg))]
async fn handle_start(bot: Bot, ctx: SharedContext, msg: Message, payload: String) -> HandlerResult {
  let chat_id = msg.chat.id;
  match accept_deep_link(&ctx, &payload) {
    None => {
      bot
        .send_message(chat_id, WELCOME_TEXT)
        .reply_markup(shop_keyboard(ctx.mini_app_url()))
        .await?;
      info!(chat_id = %chat_id, "sent mini-app launcher");
      Ok(())
    },
    Some(intake) => {
      info!(chat_id = %chat_id, "received deep-link order");
      deliver(&bot, chat_id, intake).await
    },
  }
}

#[instrument(skip(bot, ctx, msg, data))]
async fn handle_web_app_data(bot: Bot, ctx: SharedContext, msg: Message, data: WebAppData) -> HandlerResult {
  let chat_id = msg.chat.id;
  info!(chat_id = %chat_id, "received mini-app order");
  let intake = accept_mini_app_order(&ctx, &data.data).await;
  deliver(&bot, chat_id, intake).await
}

async fn deliver(bot: &Bot, customer: ChatId, intake: Intake) -> HandlerResult {
  bot.send_message(customer, intake.customer_reply).await?;
  let delivered = notify_staff(bot, &intake.notices).await;
  info!(chat_id = %customer, delivered, total = intake.notices.len(), "notified staff about order");
  Ok(())
}

fn shop_keyboard(url: &Url) -> KeyboardMarkup {
  let button = KeyboardButton::new(OPEN_SHOP_LABEL).request(ButtonRequest::WebApp(WebAppInfo { url: url.clone() }));
  KeyboardMarkup::new(vec![vec![button]]).resize_keyboard()
}

/// Sends every notice and returns how many deliveries succeeded.
async fn notify_staff(bot: &Bot, notices: &[Notice]) -> usize {
  let mut delivered = 0;
  for notice in notices {
    match bot.send_message(ChatId(notice.chat_id), notice.text.as_str()).await {
      Ok(_) => delivered += 1,
      Err(err) => warn!(chat_id = notice.chat_id, error = %err, "failed to deliver order notice"),
    }
  }
  delivered
}
