use super::r#trait::{InputDevice, Transport};
use crate::error::{Result, SwitcherError};
use parking_lot::Mutex;
use tracing::info;

/// Транспорт-эмуляция для режима сухого запуска и юнит-тестов.
///
/// Держит таблицу устройств в памяти, применяет команды переключения к
/// собственной таблице и записывает каждую отправленную команду.
pub struct DryRunTransport {
    devices: Mutex<Vec<InputDevice>>,
    sent_commands: Mutex<Vec<String>>,
}

impl DryRunTransport {
    pub fn new(devices: Vec<InputDevice>) -> Self {
        Self {
            devices: Mutex::new(devices),
            sent_commands: Mutex::new(Vec::new()),
        }
    }

    /// Типовая конфигурация: одна клавиатура с двумя раскладками и мышь.
    pub fn with_default_devices() -> Self {
        Self::new(vec![
            InputDevice {
                identifier: "1:1:AT_Translated_Set_2_keyboard".to_string(),
                device_type: "keyboard".to_string(),
                active_layout_index: Some(0),
                layout_names: vec!["English (US)".to_string(), "Russian".to_string()],
            },
            InputDevice {
                identifier: "2:10:TPPS/2_Elan_TrackPoint".to_string(),
                device_type: "pointer".to_string(),
                active_layout_index: None,
                layout_names: Vec::new(),
            },
        ])
    }

    /// Эмуляция ручного переключения раскладки пользователем.
    #[allow(dead_code)]
    pub fn set_active_index(&self, identifier: &str, index: usize) {
        let mut devices = self.devices.lock();
        if let Some(device) = devices
            .iter_mut()
            .find(|device| device.identifier == identifier)
        {
            device.active_layout_index = Some(index);
        }
    }

    #[allow(dead_code)]
    pub fn sent_commands(&self) -> Vec<String> {
        self.sent_commands.lock().clone()
    }

    #[allow(dead_code)]
    pub fn command_count(&self) -> usize {
        self.sent_commands.lock().len()
    }

    fn apply_switch(&self, identifier: &str, argument: &str) -> Result<()> {
        let mut devices = self.devices.lock();
        let device = devices
            .iter_mut()
            .find(|device| device.identifier == identifier)
            .ok_or_else(|| {
                SwitcherError::Internal(format!("Неизвестное устройство: {}", identifier))
            })?;

        let layout_count = device.layout_names.len().max(1);
        let index = match argument {
            "next" => device
                .active_layout_index
                .map(|current| (current + 1) % layout_count)
                .unwrap_or(0),
            _ => argument.parse::<usize>().map_err(|_| {
                SwitcherError::Internal(format!("Неверный индекс раскладки: {}", argument))
            })?,
        };

        device.active_layout_index = Some(index);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for DryRunTransport {
    async fn get_inputs(&self) -> Result<Vec<InputDevice>> {
        Ok(self.devices.lock().clone())
    }

    async fn run_command(&self, command: &str) -> Result<()> {
        info!("[DRY RUN] Команда оконному менеджеру: {}", command);
        self.sent_commands.lock().push(command.to_string());

        // Команды переключения применяем к своей таблице, чтобы следующий
        // get_inputs() вернул то, что вернул бы настоящий Sway
        let parts: Vec<&str> = command.split_whitespace().collect();
        match parts.as_slice() {
            ["input", identifier, "xkb_switch_layout", argument] => {
                self.apply_switch(identifier, argument)
            }
            _ => Err(SwitcherError::Internal(format!(
                "Неподдерживаемая команда: {}",
                command
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_switch_command_applies_to_device_table() {
        let transport = DryRunTransport::with_default_devices();

        transport
            .run_command("input 1:1:AT_Translated_Set_2_keyboard xkb_switch_layout 1")
            .await
            .unwrap();

        let inputs = transport.get_inputs().await.unwrap();
        let keyboard = inputs.iter().find(|device| device.is_keyboard()).unwrap();
        assert_eq!(keyboard.active_layout_index, Some(1));
        assert_eq!(transport.command_count(), 1);
    }

    #[tokio::test]
    async fn test_switch_next_cycles() {
        let transport = DryRunTransport::with_default_devices();

        transport
            .run_command("input 1:1:AT_Translated_Set_2_keyboard xkb_switch_layout next")
            .await
            .unwrap();
        let inputs = transport.get_inputs().await.unwrap();
        assert_eq!(inputs[0].active_layout_index, Some(1));

        transport
            .run_command("input 1:1:AT_Translated_Set_2_keyboard xkb_switch_layout next")
            .await
            .unwrap();
        let inputs = transport.get_inputs().await.unwrap();
        assert_eq!(inputs[0].active_layout_index, Some(0));
    }

    #[tokio::test]
    async fn test_unknown_device_is_error() {
        let transport = DryRunTransport::with_default_devices();
        let result = transport
            .run_command("input 9:9:Ghost_Keyboard xkb_switch_layout 0")
            .await;
        assert!(result.is_err());
    }
}
