//! Message rendering for the catalog bot.
//!
//! Every function here decides *what* to send and returns it as a list of
//! [`Reply`] values; the handlers only deliver them. Access checks happen
//! before any order store read.

use teloxide::types::ParseMode;
use teloxide::utils::markdown;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::bot::context::AppContext;
use crate::catalog::Catalog;
use crate::catalog::parse_category_token;
use crate::models::CatalogItem;
use crate::util::render_order;

pub const WELCOME_TEXT: &str = "Привет! Добро пожаловать в магазин.\nВыбери категорию:";
pub const ACCESS_DENIED_TEXT: &str = "❌ У вас нет прав администратора.";
pub const ADMIN_WELCOME_TEXT: &str = "✅ Добро пожаловать в админ-панель!";
pub const NO_ORDERS_TEXT: &str = "📭 Нет новых заказов.";

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
  pub text: String,
  pub parse_mode: Option<ParseMode>,
}

impl Reply {
  pub fn plain(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      parse_mode: None,
    }
  }

  pub fn markdown(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      parse_mode: Some(ParseMode::MarkdownV2),
    }
  }
}

pub fn id_reply(user_id: i64) -> Reply {
  Reply::markdown(format!("Ваш ID: {}", markdown::code_inline(&user_id.to_string())))
}

pub fn admin_reply(ctx: &AppContext, user_id: i64) -> Reply {
  if ctx.is_admin(user_id) {
    Reply::plain(ADMIN_WELCOME_TEXT)
  } else {
    warn!(user_id, "admin panel denied");
    Reply::plain(ACCESS_DENIED_TEXT)
  }
}

/// One message per stored order, in store order.
pub async fn orders_replies(ctx: &AppContext, user_id: i64) -> Vec<Reply> {
  if !ctx.is_admin(user_id) {
    warn!(user_id, "order listing denied");
    return vec![Reply::plain(ACCESS_DENIED_TEXT)];
  }

  let orders = match ctx.orders().load().await {
    Ok(orders) => orders,
    Err(err) => {
      error!(user_id, error = %err, "failed to load orders");
      return vec![Reply::plain(err.user_message())];
    },
  };

  if orders.is_empty() {
    return vec![Reply::plain(NO_ORDERS_TEXT)];
  }

  info!(user_id, order_count = orders.len(), "listing orders");
  orders.iter().map(|order| Reply::plain(render_order(order))).collect()
}

/// Items of the category selected by a callback token. Unknown tokens and
/// categories produce nothing.
pub fn category_replies(catalog: &Catalog, token: &str) -> Vec<Reply> {
  let Some(key) = parse_category_token(token) else {
    debug!(token, "callback token is not a category selection");
    return Vec::new();
  };

  match catalog.items(key) {
    Some(items) => items.iter().map(item_reply).collect(),
    None => {
      warn!(category = key, "unknown category selected");
      Vec::new()
    },
  }
}

pub fn item_reply(item: &CatalogItem) -> Reply {
  Reply::markdown(format!(
    "{}\n{}\n{}",
    markdown::bold(&markdown::escape(&item.name)),
    markdown::escape(&item.description),
    markdown::escape(&item.price)
  ))
}
