//! Order intake for the storefront bot.
//!
//! Decides what the customer is told and which staff chats get which card.
//! Handlers only deliver the resulting [`Intake`].

use serde_json::Value;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::models::MiniAppOrder;
use crate::storefront::context::StorefrontContext;
use crate::storefront::payload::decode_deep_link;
use crate::storefront::payload::parse_mini_app_order;
use crate::storefront::payload::to_order;
use crate::util::render_order;
use crate::util::render_order_details;

pub const ORDER_RECEIVED_TEXT: &str = "✅ Заказ получен! Ожидайте подтверждения.";
pub const ORDER_FAILED_TEXT: &str = "❌ Ошибка обработки заказа.";
pub const ADMIN_DEEP_LINK_HEADER: &str = "📦 НОВЫЙ ЗАКАЗ:";
pub const COURIER_HEADER: &str = "🚚 Новый заказ!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub chat_id: i64,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intake {
  pub customer_reply: &'static str,
  pub notices: Vec<Notice>,
}

impl Intake {
  fn rejected() -> Self {
    Self {
      customer_reply: ORDER_FAILED_TEXT,
      notices: Vec::new(),
    }
  }

  /// Admins first, then couriers, each in configured order.
  fn received(ctx: &StorefrontContext, admin_text: &str, courier_text: &str) -> Self {
    if ctx.admins().is_empty() {
      warn!("no admins configured, order will only reach couriers");
    }
    let admin_notices = ctx.admins().iter().map(|&chat_id| Notice {
      chat_id,
      text: admin_text.to_string(),
    });
    let courier_notices = ctx.couriers().iter().map(|&chat_id| Notice {
      chat_id,
      text: courier_text.to_string(),
    });
    Self {
      customer_reply: ORDER_RECEIVED_TEXT,
      notices: admin_notices.chain(courier_notices).collect(),
    }
  }
}

/// Handles a `sendData` document: validates, stores and addresses it.
///
/// A failed append is logged and the order is still acknowledged and forwarded.
pub async fn accept_mini_app_order(ctx: &StorefrontContext, data: &str) -> Intake {
  let parsed = match parse_mini_app_order(data) {
    Ok(parsed) => parsed,
    Err(err) => {
      warn!(error = %err, "rejected mini-app order");
      return Intake::rejected();
    },
  };
  let order = to_order(&parsed);

  match ctx.orders().append(order.clone()).await {
    Ok(order_count) => info!(order_count, "stored mini-app order"),
    Err(err) => error!(error = %err, "failed to store mini-app order"),
  }

  let mut admin_text = render_order(&order);
  if let Some(customer) = customer_line(&parsed) {
    admin_text.push('\n');
    admin_text.push_str(&customer);
  }
  let courier_text = format!("{COURIER_HEADER}\n\n{}", render_order_details(&order));
  Intake::received(ctx, &admin_text, &courier_text)
}

/// Handles the `/start` payload. `None` means the payload is not an order.
///
/// Deep-link orders are free text without address or total, so they are
/// forwarded but not written to the order store.
pub fn accept_deep_link(ctx: &StorefrontContext, payload: &str) -> Option<Intake> {
  match decode_deep_link(payload) {
    Ok(None) => None,
    Ok(Some(order_text)) => Some(Intake::received(
      ctx,
      &format!("{ADMIN_DEEP_LINK_HEADER}\n\n{order_text}"),
      &format!("{COURIER_HEADER}\n\n{order_text}"),
    )),
    Err(err) => {
      warn!(error = %err, "failed to decode deep-link order");
      Some(Intake::rejected())
    },
  }
}

fn customer_line(order: &MiniAppOrder) -> Option<String> {
  let name = order.user_name.as_deref().map(str::trim).filter(|name| !name.is_empty());
  let id = match &order.user_id {
    Some(Value::Number(id)) => Some(id.to_string()),
    Some(Value::String(id)) if id.chars().all(|c| c.is_ascii_digit()) && !id.is_empty() => Some(id.clone()),
    _ => None,
  };
  match (name, id) {
    (Some(name), Some(id)) => Some(format!("👤 Клиент: {name} (ID {id})")),
    (Some(name), None) => Some(format!("👤 Клиент: {name}")),
    (None, Some(id)) => Some(format!("👤 Клиент: ID {id}")),
    (None, None) => None,
  }
}

#[cfg(test)]
mod tests {
  use base64::Engine;
  use base64::engine::general_purpose;
  use tempfile::TempDir;
  use url::Url;

  use super::COURIER_HEADER;
  use super::ORDER_FAILED_TEXT;
  use super::ORDER_RECEIVED_TEXT;
  use super::accept_deep_link;
  use super::accept_mini_app_order;
  use crate::orders::OrderStore;
  use crate::storefront::context::StorefrontContext;

  const ADMIN: i64 = 1026424566;
  const COURIER: i64 = 777;

  fn context(dir: &TempDir, admins: Vec<i64>, couriers: Vec<i64>) -> StorefrontContext {
    StorefrontContext::new(
      Url::parse("https://cracker228.github.io/").expect("valid url"),
      admins,
      couriers,
      OrderStore::new(dir.path().join("orders.json")),
    )
  }

  fn document(item: &str) -> String {
    format!(
      r#"{{"items": [{{"name": "{item}", "variant": "L", "price": 450}}],
          "contact": "+7 900 000-00-00", "address": "Тверь, ул. Советская, 5",
          "total": 450, "timestamp": "2024-12-13T08:14:50.449Z",
          "userId": 6249163361, "userName": "Анна"}}"#
    )
  }

  #[tokio::test]
  async fn invalid_document_is_rejected_and_not_stored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], vec![COURIER]);

    let intake = accept_mini_app_order(&ctx, "{\"items\": ").await;

    assert_eq!(intake.customer_reply, ORDER_FAILED_TEXT);
    assert!(intake.notices.is_empty());
    assert!(!ctx.orders().path().exists());
  }

  #[tokio::test]
  async fn accepted_orders_are_appended_once_in_arrival_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], Vec::new());

    let first = accept_mini_app_order(&ctx, &document("Свитер")).await;
    let second = accept_mini_app_order(&ctx, &document("Шарф")).await;

    assert_eq!(first.customer_reply, ORDER_RECEIVED_TEXT);
    assert_eq!(second.customer_reply, ORDER_RECEIVED_TEXT);
    let stored = ctx.orders().load().await.expect("load");
    assert_eq!(stored.len(), 2);
    assert!(stored[0].items.contains("Свитер"));
    assert!(stored[1].items.contains("Шарф"));
  }

  #[tokio::test]
  async fn failed_append_still_acknowledges_and_notifies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], vec![COURIER]);
    std::fs::write(ctx.orders().path(), "not an order list").expect("write");

    let intake = accept_mini_app_order(&ctx, &document("Свитер")).await;

    assert_eq!(intake.customer_reply, ORDER_RECEIVED_TEXT);
    assert_eq!(intake.notices.len(), 2);
    assert_eq!(intake.notices[0].chat_id, ADMIN);
    assert!(intake.notices[0].text.contains("Свитер"));
    assert_eq!(
      std::fs::read_to_string(ctx.orders().path()).expect("read"),
      "not an order list"
    );
  }

  #[tokio::test]
  async fn admins_and_couriers_get_their_own_cards() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], vec![COURIER]);

    let intake = accept_mini_app_order(&ctx, &document("Свитер")).await;

    let admin = &intake.notices[0];
    assert!(admin.text.starts_with("📦 Новый заказ!"));
    assert!(admin.text.contains("👤 Клиент: Анна (ID 6249163361)"));

    let courier = &intake.notices[1];
    assert_eq!(courier.chat_id, COURIER);
    assert!(courier.text.starts_with(COURIER_HEADER));
    assert!(courier.text.contains("📍 Адрес: Тверь, ул. Советская, 5"));
    assert!(!courier.text.contains("Клиент"));
  }

  #[tokio::test]
  async fn duplicate_admin_ids_get_one_notice() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN, ADMIN], Vec::new());

    let intake = accept_mini_app_order(&ctx, &document("Свитер")).await;

    assert_eq!(intake.notices.len(), 1);
  }

  #[test]
  fn plain_start_is_not_an_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], vec![COURIER]);
    assert!(accept_deep_link(&ctx, "").is_none());
  }

  #[test]
  fn deep_link_order_is_forwarded_but_not_stored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], vec![COURIER]);
    let payload = format!(
      "order_{}",
      general_purpose::STANDARD.encode(urlencoding::encode("Шарф x1").as_bytes())
    );

    let intake = accept_deep_link(&ctx, &payload).expect("order payload");

    assert_eq!(intake.customer_reply, ORDER_RECEIVED_TEXT);
    assert_eq!(intake.notices.len(), 2);
    assert_eq!(intake.notices[0].text, "📦 НОВЫЙ ЗАКАЗ:\n\nШарф x1");
    assert_eq!(intake.notices[1].text, "🚚 Новый заказ!\n\nШарф x1");
    assert!(!ctx.orders().path().exists());
  }

  #[test]
  fn undecodable_deep_link_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = context(&dir, vec![ADMIN], vec![COURIER]);

    let intake = accept_deep_link(&ctx, "order_***").expect("order payload");

    assert_eq!(intake.customer_reply, ORDER_FAILED_TEXT);
    assert!(intake.notices.is_empty());
  }
}
