//! Transport service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for talking to the
//! window manager control socket: querying input devices and sending
//! commands. It MUST NOT contain any layout bookkeeping or switching
//! decisions. All decisions are made exclusively by LayoutSwitcher.

mod dry_run;
mod sway;
mod r#trait;

pub use self::dry_run::DryRunTransport;
pub use self::r#trait::{create_transport, InputDevice, Transport};
pub use self::sway::SwayTransport;
