use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
  /// Открыть каталог
  Start,
  /// Показать эту справку
  Help,
  /// Узнать свой Telegram ID
  Id,
  /// Войти в админ-панель
  Admin,
  /// Показать заказы (только для администраторов)
  Orders,
}

#[cfg(test)]
mod tests {
  use teloxide::utils::command::BotCommands;

  use super::Command;

  #[test]
  fn parses_lowercase_commands() {
    assert_eq!(Command::parse("/id", "shop_bot").ok(), Some(Command::Id));
    assert_eq!(Command::parse("/orders@shop_bot", "shop_bot").ok(), Some(Command::Orders));
  }

  #[test]
  fn rejects_unknown_commands() {
    assert!(Command::parse("/refund", "shop_bot").is_err());
  }
}
