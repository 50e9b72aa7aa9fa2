use super::r#trait::{InputDevice, Transport};
use crate::error::Result;
use swayipc_async::{Connection, EventStream, EventType, Input};
use tokio::sync::Mutex;
use tracing::debug;

/// Транспорт поверх управляющего сокета Sway/i3 (переменная окружения
/// SWAYSOCK / I3SOCK).
pub struct SwayTransport {
    // Одно подключение, не больше одного запроса одновременно
    connection: Mutex<Connection>,
}

impl SwayTransport {
    pub async fn connect() -> Result<Self> {
        let connection = Connection::new().await?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Отдельное подключение с подпиской на события окон. Подписка в
    /// протоколе i3 забирает подключение целиком, поэтому подключение для
    /// запросов и команд держим своё.
    pub async fn subscribe_window_events() -> Result<EventStream> {
        let connection = Connection::new().await?;
        Ok(connection.subscribe(&[EventType::Window]).await?)
    }

    fn convert(input: Input) -> InputDevice {
        InputDevice {
            identifier: input.identifier,
            device_type: input.input_type,
            active_layout_index: input
                .xkb_active_layout_index
                .and_then(|index| usize::try_from(index).ok()),
            layout_names: input.xkb_layout_names,
        }
    }
}

#[async_trait::async_trait]
impl Transport for SwayTransport {
    async fn get_inputs(&self) -> Result<Vec<InputDevice>> {
        let inputs = self.connection.lock().await.get_inputs().await?;
        Ok(inputs.into_iter().map(Self::convert).collect())
    }

    async fn run_command(&self, command: &str) -> Result<()> {
        debug!("Команда оконному менеджеру: {}", command);
        let outcomes = self.connection.lock().await.run_command(command).await?;
        for outcome in outcomes {
            outcome?;
        }
        Ok(())
    }
}
