use std::collections::HashSet;

use url::Url;

use crate::config::StorefrontConfig;
use crate::orders::OrderStore;

pub struct StorefrontContext {
  mini_app_url: Url,
  admins: Vec<i64>,
  couriers: Vec<i64>,
  orders: OrderStore,
}

impl StorefrontContext {
  pub fn new(mini_app_url: Url, admins: Vec<i64>, couriers: Vec<i64>, orders: OrderStore) -> Self {
    Self {
      mini_app_url,
      admins: unique(admins),
      couriers: unique(couriers),
      orders,
    }
  }

  pub fn from_config(config: &StorefrontConfig) -> Self {
    Self::new(
      config.mini_app_url.clone(),
      config.admins.clone(),
      config.couriers.clone(),
      OrderStore::new(config.orders_file.clone()),
    )
  }

  pub fn mini_app_url(&self) -> &Url {
    &self.mini_app_url
  }

  /// Admin chats notified about new orders.
  pub fn admins(&self) -> &[i64] {
    &self.admins
  }

  pub fn couriers(&self) -> &[i64] {
    &self.couriers
  }

  pub fn orders(&self) -> &OrderStore {
    &self.orders
  }
}

/// Drops repeated ids, keeping the first occurrence.
fn unique(ids: Vec<i64>) -> Vec<i64> {
  let mut seen = HashSet::new();
  ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
