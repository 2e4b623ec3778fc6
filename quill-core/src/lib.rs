pub mod config;
pub mod error;
pub mod layers;
pub mod settings;
pub mod validation;

pub use config::{ConfigError, ConfigProperties, ConfigValue, QuillConfig};
pub use error::{error_page, HttpError};
pub use layers::{catch_panic_layer, default_trace, init_tracing};
pub use settings::{
    DatabaseSettings, LoggingSettings, MailSettings, MailTransport, ServerSettings, Settings,
    SmtpSettings,
};
pub use validation::{not_blank, FieldErrors, Validate};
