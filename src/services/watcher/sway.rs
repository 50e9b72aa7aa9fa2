use super::r#trait::WindowWatcher;
use crate::error::Result;
use crate::events::WindowEvent;
use crate::services::transport::SwayTransport;
use crate::services::LayoutSwitcher;
use futures_util::StreamExt;
use std::sync::Arc;
use swayipc_async::{Event, WindowChange};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

/// Наблюдатель окон поверх подписки на события Sway/i3.
pub struct SwayWatcher {
    switcher: Arc<LayoutSwitcher>,
}

impl SwayWatcher {
    pub fn new(switcher: Arc<LayoutSwitcher>) -> Self {
        Self { switcher }
    }

    async fn dispatch(&self, event: swayipc_async::WindowEvent) {
        let window_event = match event.change {
            WindowChange::Focus => WindowEvent::focus(event.container.id),
            WindowChange::Close => WindowEvent::close(event.container.id),
            _ => return,
        };

        // Ошибка обработчика затрагивает только это событие: логируем и
        // ждём следующего, состояние останется согласованным
        if let Err(e) = self.switcher.handle_window_event(window_event).await {
            error!("Не удалось обработать событие окна: {}", e);
        }
    }

    async fn run_subscription(&self) -> Result<()> {
        let mut events = SwayTransport::subscribe_window_events().await?;
        info!("Подписка на события окон активна");

        // Строго по одному событию, в порядке доставки: следующий элемент
        // потока берём только после полной обработки текущего
        while let Some(event) = events.next().await {
            if let Event::Window(window_event) = event? {
                self.dispatch(*window_event).await;
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl WindowWatcher for SwayWatcher {
    async fn run(self: Box<Self>) -> Result<()> {
        info!("SwayWatcher запущен");

        // Потерю подписки переживаем переподключением
        loop {
            match self.run_subscription().await {
                Ok(()) => warn!("Поток событий завершился, переподключаемся"),
                Err(e) => warn!("Подписка оборвалась: {}. Переподключаемся...", e),
            }
            sleep(Duration::from_secs(1)).await;
        }
    }
}
