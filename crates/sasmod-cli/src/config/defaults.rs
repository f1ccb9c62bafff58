use sasmod::engine::config::QSpacing;

pub struct DefaultsConfig {
    pub scale: f64,
    pub background: f64,
    pub q_min: f64,
    pub q_max: f64,
    pub points: usize,
    pub spacing: QSpacing,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: 0.0,
            q_min: 0.001,
            q_max: 0.5,
            points: 200,
            spacing: QSpacing::Log,
        }
    }
}
