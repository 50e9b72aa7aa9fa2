mod dry_run;
mod sway;
mod r#trait;

pub use self::r#trait::{create_watcher, WindowWatcher};
