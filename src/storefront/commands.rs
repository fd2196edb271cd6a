use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
  /// Открыть магазин
  Start(String),
}

#[cfg(test)]
mod tests {
  use teloxide::utils::command::BotCommands;

  use super::Command;

  #[test]
  fn start_without_payload() {
    assert_eq!(
      Command::parse("/start", "storefront_bot").ok(),
      Some(Command::Start(String::new()))
    );
  }

  #[test]
  fn start_with_deep_link_payload() {
    assert_eq!(
      Command::parse("/start order_0JXQu9C60LA", "storefront_bot").ok(),
      Some(Command::Start("order_0JXQu9C60LA".to_string()))
    );
  }
}
