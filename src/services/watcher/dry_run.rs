use super::r#trait::WindowWatcher;
use crate::error::Result;
use crate::events::WindowEvent;
use crate::services::LayoutSwitcher;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

/// Эмуляция потока событий окон для режима сухого запуска.
pub struct DryRunWatcher {
    switcher: Arc<LayoutSwitcher>,
}

impl DryRunWatcher {
    pub fn new(switcher: Arc<LayoutSwitcher>) -> Self {
        Self { switcher }
    }
}

#[async_trait::async_trait]
impl WindowWatcher for DryRunWatcher {
    async fn run(self: Box<Self>) -> Result<()> {
        info!("Dry-run режим - наблюдатель окон работает в режиме эмуляции");

        // Сценарий по кругу: три окна, третье периодически закрывается
        let script = [
            WindowEvent::focus(101),
            WindowEvent::focus(102),
            WindowEvent::focus(103),
            WindowEvent::focus(101),
            WindowEvent::close(103),
        ];

        let mut step = 0;
        let mut ticker = interval(Duration::from_secs(10));

        loop {
            ticker.tick().await;

            let event = script[step % script.len()].clone();
            info!("Dry-run: эмулируем событие {}", event);
            if let Err(e) = self.switcher.handle_window_event(event).await {
                error!("Не удалось обработать событие окна: {}", e);
            }

            step += 1;
        }
    }
}
