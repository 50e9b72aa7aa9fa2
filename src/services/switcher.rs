use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{WindowEvent, WindowEventKind};
use crate::layout::LayoutSnapshot;
use crate::services::layouts;
use crate::services::transport::Transport;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Машина состояний фокуса окон - ядро демона.
///
/// Помнит по идентификатору окна, какая раскладка была в нём активна,
/// и при смене фокуса восстанавливает её. Обработчики вызываются строго
/// последовательно одной задачей цикла событий.
pub struct LayoutSwitcher {
    transport: Arc<dyn Transport>,
    /// Раскладка по умолчанию для незнакомых окон. None - плавающий
    /// дефолт: незнакомое окно оставляет наблюдаемую раскладку как есть.
    default_layout: Option<LayoutSnapshot>,
    // Состояние компонента
    last_focused: RwLock<Option<i64>>,
    remembered: DashMap<i64, LayoutSnapshot>,
}

impl LayoutSwitcher {
    pub fn new(transport: Arc<dyn Transport>, default_layout: Option<String>) -> Self {
        info!(
            "Инициализация LayoutSwitcher (default_layout: {:?})",
            default_layout
        );

        Self {
            transport,
            default_layout: default_layout.map(LayoutSnapshot::Name),
            last_focused: RwLock::new(None),
            remembered: DashMap::new(),
        }
    }

    /// Точка входа для событий окна от наблюдателя.
    pub async fn handle_window_event(&self, event: WindowEvent) -> Result<()> {
        debug_if_enabled!("Обработка события окна: {}", event);

        match event.kind {
            WindowEventKind::Focus => self.window_focus(event.container_id).await,
            WindowEventKind::Close => {
                self.window_close(event.container_id);
                Ok(())
            }
        }
    }

    /// Смена фокуса: запомнить раскладку прежнего окна, применить раскладку
    /// нового.
    pub async fn window_focus(&self, container_id: i64) -> Result<()> {
        // Быстрый путь: повторное уведомление о том же окне не несёт
        // новой информации
        if *self.last_focused.read() == Some(container_id) {
            debug_if_enabled!("Повторный фокус окна {} - пропускаем", container_id);
            return Ok(());
        }

        // Живая раскладка до любых изменений состояния. Сюда попадает и
        // ручное переключение, сделанное пользователем посреди сессии
        let observed = layouts::read_snapshot(self.transport.as_ref()).await?;

        if let Some(previous_id) = *self.last_focused.read() {
            self.remembered.insert(previous_id, observed.clone());
        }

        let target = self
            .remembered
            .get(&container_id)
            .map(|entry| entry.value().clone())
            .or_else(|| self.default_layout.clone())
            .unwrap_or_else(|| observed.clone());

        debug!("Фокус окна {}: применяем раскладку {}", container_id, target);
        layouts::apply_snapshot(self.transport.as_ref(), &target).await?;

        // Фиксируем фокус только после успешного применения: при ошибке
        // следующее событие заново примет решение из прежнего состояния
        *self.last_focused.write() = Some(container_id);

        Ok(())
    }

    /// Закрытие окна: забыть его раскладку и сбросить фокус.
    pub fn window_close(&self, container_id: i64) {
        // Отсутствие записи - не ошибка: окно могло ни разу не терять фокус
        self.remembered.remove(&container_id);

        // Сбрасываем фокус безусловно, даже если закрылось не текущее окно:
        // иначе следующее событие фокуса отсеклось бы быстрым путём
        *self.last_focused.write() = None;

        debug_if_enabled!(
            "Окно {} закрыто, запомненных раскладок: {}",
            container_id,
            self.remembered.len()
        );
    }
}
