//! Mail backend configuration from environment variables.

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default Mailgun API endpoint (US region).
pub const DEFAULT_MAILGUN_BASE_URL: &str = "https://api.mailgun.net";

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (defaults to 587).
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MailBackend {
    Mailgun {
        api_key: String,
        domain: String,
        base_url: String,
    },
    Smtp(SmtpConfig),
    /// Log messages instead of sending them.
    Log,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub backend: MailBackend,
    /// Address used in `From` instead of the submitter's own address.
    pub sender: Option<String>,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable           | Required              | Default                   |
    /// |--------------------|-----------------------|---------------------------|
    /// | `MAIL_BACKEND`     | no                    | `log`                     |
    /// | `MAIL_FROM`        | no                    | submitter's address       |
    /// | `MAILGUN_API_KEY`  | for `mailgun`         |                           |
    /// | `MAILGUN_DOMAIN`   | for `mailgun`         |                           |
    /// | `MAILGUN_BASE_URL` | no                    | `https://api.mailgun.net` |
    /// | `SMTP_HOST`        | for `smtp`            |                           |
    /// | `SMTP_PORT`        | no                    | `587`                     |
    /// | `SMTP_USER`        | no                    |                           |
    /// | `SMTP_PASSWORD`    | no                    |                           |
    ///
    /// Panics on an unknown backend or a missing required variable, so a
    /// misconfigured server fails at startup.
    pub fn from_env() -> Self {
        let backend = match std::env::var("MAIL_BACKEND")
            .unwrap_or_else(|_| "log".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "mailgun" => MailBackend::Mailgun {
                api_key: std::env::var("MAILGUN_API_KEY")
                    .expect("MAILGUN_API_KEY must be set for the mailgun backend"),
                domain: std::env::var("MAILGUN_DOMAIN")
                    .expect("MAILGUN_DOMAIN must be set for the mailgun backend"),
                base_url: std::env::var("MAILGUN_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_MAILGUN_BASE_URL.to_string()),
            },
            "smtp" => MailBackend::Smtp(SmtpConfig {
                host: std::env::var("SMTP_HOST")
                    .expect("SMTP_HOST must be set for the smtp backend"),
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .map(|p| p.parse().expect("SMTP_PORT must be a valid u16"))
                    .unwrap_or(DEFAULT_SMTP_PORT),
                user: std::env::var("SMTP_USER").ok(),
                password: std::env::var("SMTP_PASSWORD").ok(),
            }),
            "log" => MailBackend::Log,
            other => panic!("Unknown MAIL_BACKEND '{other}' (expected mailgun, smtp or log)"),
        };

        Self {
            backend,
            sender: std::env::var("MAIL_FROM").ok().filter(|s| !s.trim().is_empty()),
        }
    }
}
