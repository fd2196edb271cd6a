use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::instrument;

use crate::models::Order;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("failed to access order store {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("order store {} is corrupt: {source}", .path.display())]
  Corrupt {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
  #[error("failed to encode orders: {0}")]
  Encode(#[source] serde_json::Error),
}

impl StoreError {
  pub fn user_message(&self) -> &'static str {
    match self {
      Self::Corrupt { .. } => "⚠️ Хранилище заказов повреждено. Обратитесь к разработчику.",
      Self::Io { .. } | Self::Encode(_) => "⚠️ Не удалось получить доступ к заказам, попробуйте позже.",
    }
  }
}

/// JSON file holding every order, read fresh on each access.
#[derive(Debug, Clone)]
pub struct OrderStore {
  path: PathBuf,
  write_lock: Arc<Mutex<()>>,
}

impl OrderStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_lock: Arc::new(Mutex::new(())),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Reads all orders. A missing file is an empty store.
  #[instrument(skip(self), fields(path = %self.path.display()))]
  pub async fn load(&self) -> Result<Vec<Order>, StoreError> {
    let raw = match tokio::fs::read(&self.path).await {
      Ok(raw) => raw,
      Err(err) if err.kind() == ErrorKind::NotFound => {
        debug!("order store missing, treating as empty");
        return Ok(Vec::new());
      },
      Err(source) => {
        return Err(StoreError::Io {
          path: self.path.clone(),
          source,
        });
      },
    };

    let orders: Vec<Order> = serde_json::from_slice(&raw).map_err(|source| StoreError::Corrupt {
      path: self.path.clone(),
      source,
    })?;
    debug!(order_count = orders.len(), "loaded orders");
    Ok(orders)
  }

  /// Overwrites the store with `orders`.
  #[instrument(skip(self, orders), fields(path = %self.path.display(), order_count = orders.len()))]
  pub async fn save(&self, orders: &[Order]) -> Result<(), StoreError> {
    let document = serde_json::to_string_pretty(orders).map_err(StoreError::Encode)?;
    tokio::fs::write(&self.path, document)
      .await
      .map_err(|source| StoreError::Io {
        path: self.path.clone(),
        source,
      })
  }

  /// Adds one order at the end of the store and returns the new order count.
  pub async fn append(&self, order: Order) -> Result<usize, StoreError> {
    let _guard = self.write_lock.lock().await;
    let mut orders = self.load().await?;
    orders.push(order);
    self.save(&orders).await?;
    Ok(orders.len())
  }
}
