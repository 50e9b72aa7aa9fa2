use crate::error::Result;
use crate::services::LayoutSwitcher;
use std::sync::Arc;

/// Trait for window watchers that can run in different modes
#[async_trait::async_trait]
pub trait WindowWatcher {
    /// Run the watcher event loop
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate watcher based on the dry_run flag
pub fn create_watcher(
    switcher: Arc<LayoutSwitcher>,
    dry_run: bool,
) -> Result<Box<dyn WindowWatcher + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunWatcher::new(switcher)))
    } else {
        Ok(Box::new(super::sway::SwayWatcher::new(switcher)))
    }
}
