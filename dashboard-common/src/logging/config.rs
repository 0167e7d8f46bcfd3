use std::env;
use std::str::FromStr;

use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %z";
const UTC_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// HTTP stack crates that are chatty at `info` and below
const NOISY_DEPENDENCIES: [&str; 3] = ["hyper", "reqwest", "rustls"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// JSON lines, for log shipping from the proxy
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to pretty output.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    #[default]
    Local,
    Utc,
    None,
}

impl FromStr for TimestampFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "utc" => TimestampFormat::Utc,
            "none" | "off" => TimestampFormat::None,
            _ => TimestampFormat::Local,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub timestamps: TimestampFormat,
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Print file:line of each event
    pub show_location: bool,
    /// Cap the HTTP stack at `warn` unless `RUST_LOG` says otherwise
    pub quiet_dependencies: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            timestamps: TimestampFormat::Local,
            level: "info".to_string(),
            show_location: true,
            quiet_dependencies: true,
        }
    }
}

fn env_parse<T: FromStr + Default>(var: &str) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

impl LogConfig {
    /// Read `LOG_FORMAT`, `LOG_TIMESTAMPS`, `LOG_LEVEL` and `LOG_LOCATION`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            format: env_parse("LOG_FORMAT"),
            timestamps: env_parse("LOG_TIMESTAMPS"),
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            show_location: env::var("LOG_LOCATION")
                .map(|v| matches!(v.as_str(), "true" | "1"))
                .unwrap_or(defaults.show_location),
            quiet_dependencies: defaults.quiet_dependencies,
        }
    }

    /// Single-line output without locations, for a long-running proxy.
    pub fn for_server() -> Self {
        Self {
            format: LogFormat::Compact,
            show_location: false,
            ..Default::default()
        }
    }

    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// `RUST_LOG` when set, else the configured level plus the dependency caps.
    fn filter(&self) -> EnvFilter {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
        let mut directives = vec![self.level.clone()];
        if self.quiet_dependencies {
            directives.extend(NOISY_DEPENDENCIES.iter().map(|c| format!("{}=warn", c)));
        }
        EnvFilter::new(directives.join(","))
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let base = fmt::layer()
            .with_file(self.show_location)
            .with_line_number(self.show_location)
            .with_target(true);

        // each format/timer pair is a distinct layer type, so box per arm
        match (self.format, self.timestamps) {
            (LogFormat::Json, TimestampFormat::Local) => base
                .json()
                .with_timer(ChronoLocal::new(LOCAL_TIME_FORMAT.to_string()))
                .boxed(),
            (LogFormat::Json, TimestampFormat::Utc) => base
                .json()
                .with_timer(ChronoUtc::new(UTC_TIME_FORMAT.to_string()))
                .boxed(),
            (LogFormat::Json, TimestampFormat::None) => base.json().without_time().boxed(),
            (LogFormat::Compact, TimestampFormat::Local) => base
                .compact()
                .with_timer(ChronoLocal::new(LOCAL_TIME_FORMAT.to_string()))
                .boxed(),
            (LogFormat::Compact, TimestampFormat::Utc) => base
                .compact()
                .with_timer(ChronoUtc::new(UTC_TIME_FORMAT.to_string()))
                .boxed(),
            (LogFormat::Compact, TimestampFormat::None) => base.compact().without_time().boxed(),
            (LogFormat::Pretty, TimestampFormat::Local) => base
                .with_timer(ChronoLocal::new(LOCAL_TIME_FORMAT.to_string()))
                .boxed(),
            (LogFormat::Pretty, TimestampFormat::Utc) => base
                .with_timer(ChronoUtc::new(UTC_TIME_FORMAT.to_string()))
                .boxed(),
            (LogFormat::Pretty, TimestampFormat::None) => base.without_time().boxed(),
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(config.filter())
        .try_init()?;
    Ok(())
}
