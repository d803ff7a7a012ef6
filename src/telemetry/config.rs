#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Anything other than `json` falls back to pretty output
    fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when RUST_LOG is unset
    pub default_filter: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("JMXFORGE_LOG_FORMAT").ok();

        Self {
            format: LogFormat::from_setting(format.as_deref()),
            default_filter: "jmxforge=info".to_string(),
        }
    }
}
