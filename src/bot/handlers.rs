use std::sync::Arc;

use anyhow::Context;
use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::types::ChatId;
use teloxide::types::InlineKeyboardButton;
use teloxide::types::InlineKeyboardMarkup;
use teloxide::types::InputFile;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing::instrument;
use tracing::warn;

use crate::bot::Command;
use crate::bot::HandlerResult;
use crate::bot::context::AppContext;
use crate::bot::replies::Reply;
use crate::bot::replies::WELCOME_TEXT;
use crate::bot::replies::admin_reply;
use crate::bot::replies::category_replies;
use crate::bot::replies::id_reply;
use crate::bot::replies::orders_replies;
use crate::catalog::Catalog;
use crate::catalog::category_token;

type SharedContext = Arc<AppContext>;

pub fn build_schema() -> UpdateHandler<anyhow::Error> {
  let command_handler = Update::filter_message()
    .filter_command::<Command>()
    .branch(dptree::case![Command::Start].endpoint(handle_start))
    .branch(dptree::case![Command::Help].endpoint(handle_help))
    .branch(dptree::case![Command::Id].endpoint(handle_id))
    .branch(dptree::case![Command::Admin].endpoint(handle_admin))
    .branch(dptree::case![Command::Orders].endpoint(handle_orders));

  let callback_handler = Update::filter_callback_query().endpoint(handle_callback_query);

  dptree::entry().branch(command_handler).branch(callback_handler)
}

#[instrument(skip(bot, ctx, msg))]
async fn handle_start(bot: Bot, ctx: SharedContext, msg: Message) -> HandlerResult {
  let keyboard = category_keyboard(ctx.catalog());
  match ctx.welcome_animation() {
    Some(animation) => {
      bot
        .send_animation(msg.chat.id, InputFile::url(animation.clone()))
        .caption(WELCOME_TEXT)
        .reply_markup(keyboard)
        .await?;
    },
    None => {
      bot.send_message(msg.chat.id, WELCOME_TEXT).reply_markup(keyboard).await?;
    },
  }
  info!(chat_id = %msg.chat.id, "sent welcome menu");
  Ok(())
}

#[instrument(skip(bot, msg))]
async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
  bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
  Ok(())
}

#[instrument(skip(bot, msg))]
async fn handle_id(bot: Bot, msg: Message) -> HandlerResult {
  let user_id = sender_id(&msg)?;
  info!(user_id, chat_id = %msg.chat.id, "received /id command");
  send_replies(&bot, msg.chat.id, vec![id_reply(user_id)]).await
}

#[instrument(skip(bot, ctx, msg))]
async fn handle_admin(bot: Bot, ctx: SharedContext, msg: Message) -> HandlerResult {
  let user_id = sender_id(&msg)?;
  info!(user_id, chat_id = %msg.chat.id, "received /admin command");
  send_replies(&bot, msg.chat.id, vec![admin_reply(&ctx, user_id)]).await
}

#[instrument(skip(bot, ctx, msg))]
async fn handle_orders(bot: Bot, ctx: SharedContext, msg: Message) -> HandlerResult {
  let user_id = sender_id(&msg)?;
  info!(user_id, chat_id = %msg.chat.id, "received /orders command");
  let replies = orders_replies(&ctx, user_id).await;
  send_replies(&bot, msg.chat.id, replies).await
}

#[instrument(skip(bot, ctx, query))]
async fn handle_callback_query(bot: Bot, ctx: SharedContext, query: CallbackQuery) -> HandlerResult {
  let user_id = query.from.id.0 as i64;
  let chat = query.message.as_ref().map(|message| message.chat().id);
  let data = query.data.clone().unwrap_or_default();
  info!(user_id, callback = data.as_str(), "handling callback query");

  bot.answer_callback_query(query.id).await?;

  let Some(chat_id) = chat else {
    warn!(user_id, "callback query without message context");
    return Ok(());
  };

  let replies = category_replies(ctx.catalog(), &data);
  info!(user_id, chat_id = %chat_id, count = replies.len(), "sending category items");
  send_replies(&bot, chat_id, replies).await
}

fn category_keyboard(catalog: &Catalog) -> InlineKeyboardMarkup {
  InlineKeyboardMarkup::new(
    catalog
      .categories()
      .iter()
      .map(|category| {
        vec![InlineKeyboardButton::callback(
          category.title.clone(),
          category_token(&category.key),
        )]
      })
      .collect::<Vec<_>>(),
  )
}

async fn send_replies(bot: &Bot, chat: ChatId, replies: Vec<Reply>) -> HandlerResult {
  for reply in replies {
    let mut request = bot.send_message(chat, reply.text);
    if let Some(mode) = reply.parse_mode {
      request = request.parse_mode(mode);
    }
    request.await?;
  }
  Ok(())
}

fn sender_id(msg: &Message) -> anyhow::Result<i64> {
  let user = msg.from.as_ref().context("message missing sender")?;
  Ok(user.id.0 as i64)
}

#[cfg(test)]
mod tests {
  use teloxide::types::InlineKeyboardButtonKind;

  use super::category_keyboard;
  use crate::catalog::Catalog;

  #[test]
  fn keyboard_has_one_row_per_category() {
    let keyboard = category_keyboard(&Catalog::builtin());
    assert_eq!(keyboard.inline_keyboard.len(), 2);

    let first = &keyboard.inline_keyboard[0][0];
    assert_eq!(first.text, "Категория 1");
    assert!(matches!(
      &first.kind,
      InlineKeyboardButtonKind::CallbackData(data) if data == "show_category1"
    ));
  }
}
