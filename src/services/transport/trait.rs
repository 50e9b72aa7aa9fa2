use crate::error::Result;
use std::sync::Arc;

/// Устройство ввода в том виде, в котором его отдаёт оконный менеджер.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub identifier: String,
    pub device_type: String,
    /// Индекс активной раскладки. None у устройств без xkb-состояния.
    pub active_layout_index: Option<usize>,
    pub layout_names: Vec<String>,
}

impl InputDevice {
    pub fn is_keyboard(&self) -> bool {
        self.device_type == "keyboard"
    }
}

/// Trait for transports that can run in different modes
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Снимок всех устройств ввода. Один сетевой round trip.
    async fn get_inputs(&self) -> Result<Vec<InputDevice>>;

    /// Отправить одну команду оконному менеджеру.
    async fn run_command(&self, command: &str) -> Result<()>;
}

/// Factory function to create an appropriate transport based on the dry_run flag
pub async fn create_transport(dry_run: bool) -> Result<Arc<dyn Transport>> {
    if dry_run {
        Ok(Arc::new(super::dry_run::DryRunTransport::with_default_devices()))
    } else {
        Ok(Arc::new(super::sway::SwayTransport::connect().await?))
    }
}
