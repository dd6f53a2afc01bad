pub mod config_service;
pub mod download_sink;
pub mod paths;
pub mod session_store;
pub mod storage;
pub mod uploads;

pub use crate::config_service::ConfigService;
pub use crate::download_sink::FileSystemDownloadSink;
pub use crate::paths::DeskPaths;
pub use crate::session_store::FileSessionStore;
pub use crate::uploads::PresetPicker;
