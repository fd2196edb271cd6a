use teloxide::dispatching::UpdateHandler;
use teloxide::dptree::di::DependencyMap;
use teloxide::prelude::*;
use tracing::info;

/// Long-polling runner shared by both bots.
pub struct App {
  bot: Bot,
  handler: UpdateHandler<anyhow::Error>,
  dependencies: DependencyMap,
}

impl App {
  pub fn new(bot: Bot, handler: UpdateHandler<anyhow::Error>, dependencies: DependencyMap) -> Self {
    Self {
      bot,
      handler,
      dependencies,
    }
  }

  pub async fn run(self) -> anyhow::Result<()> {
    let me = self.bot.get_me().await?;
    info!(username = me.username(), "connected to telegram");

    let mut dependencies = self.dependencies;
    dependencies.insert(me);

    Dispatcher::builder(self.bot, self.handler)
      .dependencies(dependencies)
      .enable_ctrlc_handler()
      .build()
      .dispatch()
      .await;

    info!("dispatcher stopped");
    Ok(())
  }
}
