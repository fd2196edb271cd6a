use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;
use thiserror::Error;

use crate::models::MiniAppOrder;
use crate::models::Order;
use crate::util::format_rubles;

pub const ORDER_PAYLOAD_PREFIX: &str = "order_";

const LENIENT_PADDING: GeneralPurposeConfig =
  GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_PADDING);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_PADDING);

#[derive(Debug, Error)]
pub enum PayloadError {
  #[error("order payload is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("order payload is not valid UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
  #[error("malformed order document: {0}")]
  Json(#[from] serde_json::Error),
  #[error("order has no items")]
  EmptyOrder,
  #[error("order has no delivery address")]
  MissingAddress,
}

/// Decodes a `/start order_<base64>` deep-link payload into the order text.
///
/// Returns `Ok(None)` when the payload does not carry an order.
pub fn decode_deep_link(payload: &str) -> Result<Option<String>, PayloadError> {
  let Some(encoded) = payload.trim().strip_prefix(ORDER_PAYLOAD_PREFIX) else {
    return Ok(None);
  };

  let bytes = STANDARD_LENIENT
    .decode(encoded)
    .or_else(|_| URL_SAFE_LENIENT.decode(encoded))?;
  let text = String::from_utf8(bytes)?;
  let decoded = urlencoding::decode(&text)?.into_owned();
  if decoded.trim().is_empty() {
    return Err(PayloadError::EmptyOrder);
  }
  Ok(Some(decoded))
}

/// Parses the JSON document the mini-app sends through `sendData`.
pub fn parse_mini_app_order(data: &str) -> Result<MiniAppOrder, PayloadError> {
  let order: MiniAppOrder = serde_json::from_str(data)?;
  if order.items.is_empty() {
    return Err(PayloadError::EmptyOrder);
  }
  if order.address.trim().is_empty() {
    return Err(PayloadError::MissingAddress);
  }
  Ok(order)
}

pub fn to_order(order: &MiniAppOrder) -> Order {
  let items = order
    .items
    .iter()
    .map(|line| match line.variant.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
      Some(variant) => format!("• {} ({}) — {}", line.name.trim(), variant, format_rubles(line.price)),
      None => format!("• {} — {}", line.name.trim(), format_rubles(line.price)),
    })
    .collect::<Vec<_>>()
    .join("\n");

  let contact = order.contact.trim();
  let address = if contact.is_empty() {
    order.address.trim().to_string()
  } else {
    format!("{} (тел. {})", order.address.trim(), contact)
  };

  Order {
    items,
    address,
    total: order.total,
    timestamp: order.timestamp.clone(),
  }
}
