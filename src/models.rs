use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
  pub name: String,
  pub description: String,
  pub price: String,
}

impl CatalogItem {
  pub fn new(name: &str, description: &str, price: &str) -> Self {
    Self {
      name: name.to_string(),
      description: description.to_string(),
      price: price.to_string(),
    }
  }
}

/// A customer order as kept in the order store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub items: String,
  pub address: String,
  pub total: f64,
  pub timestamp: String,
}

/// Order document posted by the mini-app through `sendData`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniAppOrder {
  pub items: Vec<MiniAppLine>,
  #[serde(default)]
  pub contact: String,
  pub address: String,
  pub total: f64,
  pub timestamp: String,
  #[serde(default)]
  pub user_id: Option<serde_json::Value>,
  #[serde(default)]
  pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MiniAppLine {
  pub name: String,
  #[serde(default)]
  pub variant: Option<String>,
  #[serde(default)]
  pub price: f64,
}
