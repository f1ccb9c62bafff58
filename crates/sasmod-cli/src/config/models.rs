use sasmod::engine::config::EvaluationConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub output: Option<PathBuf>,
    pub core_config: EvaluationConfig,
}
