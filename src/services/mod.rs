pub mod layouts;
pub mod switcher;
pub mod transport;
pub mod watcher;

pub use switcher::LayoutSwitcher;
pub use transport::create_transport;
pub use watcher::create_watcher;
