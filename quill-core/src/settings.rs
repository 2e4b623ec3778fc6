//! Typed application settings built from a [`QuillConfig`].
//!
//! Every section falls back to a working development default, so an empty
//! config yields a server on `127.0.0.1:8000` with a local SQLite file and
//! log-only mail delivery.

use garde::Validate;

use crate::config::{ConfigError, ConfigProperties, ConfigValidationDetail, QuillConfig};

/// Every key read by [`Settings`], so `QUILL_*` environment variables map
/// onto them even when no YAML file mentions the key.
pub(crate) const SETTING_KEYS: &[&str] = &[
    "quill.server.addr",
    "quill.database.url",
    "quill.database.max_connections",
    "quill.mail.transport",
    "quill.mail.from",
    "quill.mail.to",
    "quill.mail.queue_capacity",
    "quill.mail.smtp.host",
    "quill.mail.smtp.port",
    "quill.mail.smtp.username",
    "quill.mail.smtp.password",
    "quill.logging.json",
];

#[derive(Debug, Clone, Validate)]
pub struct ServerSettings {
    #[garde(length(min = 1))]
    pub addr: String,
}

impl ConfigProperties for ServerSettings {
    fn from_config(config: &QuillConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            addr: config.get_or("quill.server.addr", "127.0.0.1:8000".to_string())?,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct DatabaseSettings {
    #[garde(length(min = 1))]
    pub url: String,
    #[garde(range(min = 1, max = 64))]
    pub max_connections: u32,
}

impl ConfigProperties for DatabaseSettings {
    fn from_config(config: &QuillConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.get_or("quill.database.url", "sqlite://quill.db".to_string())?,
            max_connections: config.get_or("quill.database.max_connections", 5u32)?,
        })
    }
}

/// How queued notifications leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransport {
    /// Write each message to the log instead of sending it.
    Log,
    Smtp,
}

impl std::str::FromStr for MailTransport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "console" => Ok(MailTransport::Log),
            "smtp" => Ok(MailTransport::Smtp),
            _ => Err(ConfigError::TypeMismatch {
                key: "quill.mail.transport".to_string(),
                expected: "one of: log, smtp",
            }),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct SmtpSettings {
    #[garde(length(min = 1))]
    pub host: String,
    #[garde(range(min = 1))]
    pub port: u16,
    #[garde(skip)]
    pub username: Option<String>,
    #[garde(skip)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct MailSettings {
    #[garde(skip)]
    pub transport: MailTransport,
    #[garde(email)]
    pub from: String,
    #[garde(length(min = 1), inner(email))]
    pub to: Vec<String>,
    #[garde(range(min = 1, max = 10_000))]
    pub queue_capacity: usize,
    #[garde(dive)]
    pub smtp: Option<SmtpSettings>,
}

impl ConfigProperties for MailSettings {
    fn from_config(config: &QuillConfig) -> Result<Self, ConfigError> {
        let transport: MailTransport = config
            .get_or("quill.mail.transport", "log".to_string())?
            .parse()?;
        let smtp = match transport {
            MailTransport::Smtp => Some(SmtpSettings {
                host: config.get("quill.mail.smtp.host")?,
                port: config.get_or("quill.mail.smtp.port", 587u16)?,
                username: config.get_or("quill.mail.smtp.username", None)?,
                password: config.get_or("quill.mail.smtp.password", None)?,
            }),
            MailTransport::Log => None,
        };
        Ok(Self {
            transport,
            from: config.get_or("quill.mail.from", "noreply@localhost.localdomain".to_string())?,
            to: config.get_or(
                "quill.mail.to",
                vec!["admin@localhost.localdomain".to_string()],
            )?,
            queue_capacity: config.get_or("quill.mail.queue_capacity", 64usize)?,
            smtp,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct LoggingSettings {
    /// Emit JSON lines instead of the human-readable format.
    #[garde(skip)]
    pub json: bool,
}

impl ConfigProperties for LoggingSettings {
    fn from_config(config: &QuillConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            json: config.get_or("quill.logging.json", false)?,
        })
    }
}

/// The complete, validated settings handed to process startup.
#[derive(Debug, Clone, Validate)]
pub struct Settings {
    #[garde(dive)]
    pub server: ServerSettings,
    #[garde(dive)]
    pub database: DatabaseSettings,
    #[garde(dive)]
    pub mail: MailSettings,
    #[garde(dive)]
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_config(config: &QuillConfig) -> Result<Self, ConfigError> {
        let settings = Self {
            server: ServerSettings::from_config(config)?,
            database: DatabaseSettings::from_config(config)?,
            mail: MailSettings::from_config(config)?,
            logging: LoggingSettings::from_config(config)?,
        };
        settings.validate().map_err(|report| {
            ConfigError::Validation(
                report
                    .iter()
                    .map(|(path, error)| ConfigValidationDetail {
                        key: format!("quill.{path}"),
                        message: error.message().to_string(),
                    })
                    .collect(),
            )
        })?;
        Ok(settings)
    }
}
