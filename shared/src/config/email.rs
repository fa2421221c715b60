//! Email transport configuration module

use serde::{Deserialize, Serialize};

/// Which mail transport delivers verification emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTransportKind {
    /// Deliver through an SMTP relay
    Smtp,
    /// Only log the message (development)
    #[default]
    Log,
}

impl std::str::FromStr for EmailTransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailTransportKind::Smtp),
            "log" | "mock" => Ok(EmailTransportKind::Log),
            _ => Err(format!("Invalid email transport: {}", s)),
        }
    }
}

/// SMTP settings used to send verification codes by email
#[derive(Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Transport selection
    #[serde(default)]
    pub transport: EmailTransportKind,

    /// SMTP relay host
    pub host: String,

    /// SMTP relay port
    pub port: u16,

    /// Use implicit TLS (usually port 465). When false the connection is
    /// upgraded with STARTTLS.
    pub secure: bool,

    /// SMTP user, also used as the sender address
    pub user: String,

    /// SMTP password
    pub pass: String,

    /// Display name of the sender and brand used in templates
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("transport", &self.transport)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            transport: EmailTransportKind::Log,
            host: String::from("localhost"),
            port: 587,
            secure: false,
            user: String::from("no-reply@shinegold.local"),
            pass: String::new(),
            from_name: default_from_name(),
        }
    }
}

impl EmailConfig {
    /// Load from `EMAIL_*` variables
    ///
    /// The transport defaults to SMTP when `EMAIL_HOST` is present and to the
    /// logging transport otherwise; `EMAIL_TRANSPORT` overrides both.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("EMAIL_HOST").ok();
        let transport = std::env::var("EMAIL_TRANSPORT")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(if host.is_some() {
                EmailTransportKind::Smtp
            } else {
                EmailTransportKind::Log
            });

        Self {
            transport,
            host: host.unwrap_or(defaults.host),
            port: std::env::var("EMAIL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            secure: std::env::var("EMAIL_SECURE")
                .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(defaults.secure),
            user: std::env::var("EMAIL_USER").unwrap_or(defaults.user),
            pass: std::env::var("EMAIL_PASS").unwrap_or(defaults.pass),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
        }
    }

    /// Sender mailbox in `"Name" <address>` form
    pub fn from_address(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.user)
    }
}

fn default_from_name() -> String {
    String::from("ShineGold")
}
