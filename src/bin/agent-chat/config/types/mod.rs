mod agent;
mod app;
mod logging;
mod speech;
mod storage;

const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

pub use agent::AgentConfig;
pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use speech::{PlayerConfig, SpeechConfig};
use storage::StorageConfig;
