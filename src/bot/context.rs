use std::collections::HashSet;

use url::Url;

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::orders::OrderStore;

/// Read-only state shared by every catalog bot handler.
pub struct AppContext {
  catalog: Catalog,
  admins: HashSet<i64>,
  orders: OrderStore,
  welcome_animation: Option<Url>,
}

impl AppContext {
  pub fn new(catalog: Catalog, admins: Vec<i64>, orders: OrderStore, welcome_animation: Option<Url>) -> Self {
    Self {
      catalog,
      admins: admins.into_iter().collect(),
      orders,
      welcome_animation,
    }
  }

  pub fn from_config(config: &CatalogConfig) -> Self {
    Self::new(
      Catalog::builtin(),
      config.admins.clone(),
      OrderStore::new(config.orders_file.clone()),
      config.welcome_animation.clone(),
    )
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn orders(&self) -> &OrderStore {
    &self.orders
  }

  pub fn welcome_animation(&self) -> Option<&Url> {
    self.welcome_animation.as_ref()
  }

  pub fn is_admin(&self, tg_id: i64) -> bool {
    self.admins.contains(&tg_id)
  }
}
