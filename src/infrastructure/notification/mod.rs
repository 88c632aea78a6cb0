//! Desktop notification adapters

pub mod desktop;

pub use desktop::DesktopNotifier;
