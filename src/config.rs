use std::env;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use url::Url;

pub const DEFAULT_ORDERS_FILE: &str = "orders.json";
pub const DEFAULT_WELCOME_ANIMATION: &str = "https://media1.tenor.com/m/nDG2Tu5MyXEAAAAd/jolly-christmas.gif";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
  pub bot_token: String,
  pub admins: Vec<i64>,
  pub orders_file: PathBuf,
  pub welcome_animation: Option<Url>,
}

impl CatalogConfig {
  pub fn from_env() -> Result<Self> {
    let bot_token = bot_token("CATALOG_BOT_TOKEN")?;
    let welcome_animation = parse_animation(env::var("WELCOME_ANIMATION_URL").ok().as_deref())?;
    Ok(Self {
      bot_token,
      admins: chat_ids_from_env("ADMIN_IDS"),
      orders_file: orders_file_from_env(),
      welcome_animation,
    })
  }
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
  pub bot_token: String,
  pub mini_app_url: Url,
  pub admins: Vec<i64>,
  pub couriers: Vec<i64>,
  pub orders_file: PathBuf,
}

impl StorefrontConfig {
  pub fn from_env() -> Result<Self> {
    let bot_token = bot_token("STOREFRONT_BOT_TOKEN")?;
    let raw_url = env::var("MINI_APP_URL").context("MINI_APP_URL must be set")?;
    let mini_app_url = Url::parse(raw_url.trim()).with_context(|| format!("MINI_APP_URL is not a valid URL: {raw_url}"))?;
    Ok(Self {
      bot_token,
      mini_app_url,
      admins: chat_ids_from_env("ADMIN_IDS"),
      couriers: chat_ids_from_env("COURIER_IDS"),
      orders_file: orders_file_from_env(),
    })
  }
}

fn bot_token(primary: &str) -> Result<String> {
  env::var(primary)
    .or_else(|_| env::var("BOT_TOKEN"))
    .or_else(|_| env::var("TELOXIDE_TOKEN"))
    .with_context(|| format!("{primary}, BOT_TOKEN or TELOXIDE_TOKEN must be set"))
}

fn chat_ids_from_env(var: &str) -> Vec<i64> {
  parse_chat_ids(var, &env::var(var).unwrap_or_default())
}

fn orders_file_from_env() -> PathBuf {
  env::var("ORDERS_FILE")
    .ok()
    .filter(|value| !value.trim().is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDERS_FILE))
}

/// `None` input means the variable is unset; an empty value disables the animation.
fn parse_animation(raw: Option<&str>) -> Result<Option<Url>> {
  let value = match raw {
    None => DEFAULT_WELCOME_ANIMATION,
    Some(value) if value.trim().is_empty() => return Ok(None),
    Some(value) => value.trim(),
  };
  let url = Url::parse(value).with_context(|| format!("WELCOME_ANIMATION_URL is not a valid URL: {value}"))?;
  Ok(Some(url))
}

/// Comma-separated Telegram chat ids. Group chats are negative; entries that
/// are not integers are dropped with a warning naming `var`.
fn parse_chat_ids(var: &str, raw: &str) -> Vec<i64> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|entry| !entry.is_empty())
    .filter_map(|entry| match entry.parse::<i64>() {
      Ok(id) => Some(id),
      Err(err) => {
        tracing::warn!(var, value = entry, error = %err, "skipping invalid chat id");
        None
      },
    })
    .collect()
}
