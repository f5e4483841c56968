use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// Super-admin chat ids from ADMIN_CHAT_IDS, comma separated. These ids
    /// always resolve as admin and can never be removed through the bot.
    pub admin_chat_ids: Vec<String>,
    /// Shared secret for the booking intake API. Empty disables the guard.
    pub api_key: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub default_to: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/bookings.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/bookings.db".to_string()
        } else {
            database_url
        };

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "4008".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let admin_chat_ids = split_ids(env::var("ADMIN_CHAT_IDS").ok().as_deref());
        let api_key = env::var("API_KEY").unwrap_or_default();

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            admin_chat_ids,
            api_key,
            smtp: SmtpConfig::from_env()?,
        })
    }
}

impl SmtpConfig {
    /// SMTP settings are optional; the email route answers with an error
    /// when they are absent instead of failing startup.
    fn from_env() -> Result<Option<Self>> {
        let host = match env::var("SMTP_HOST") {
            Ok(h) if !h.trim().is_empty() => h,
            _ => return Ok(None),
        };

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid SMTP_PORT"))?;

        let username = env::var("SMTP_USER").unwrap_or_default();
        let password = env::var("SMTP_PASS").unwrap_or_default();
        let from = env::var("MAIL_FROM")
            .map_err(|_| anyhow!("MAIL_FROM must be set when SMTP_HOST is configured"))?;
        let default_to = env::var("MAIL_TO").ok().filter(|s| !s.trim().is_empty());

        Ok(Some(SmtpConfig {
            host,
            port,
            username,
            password,
            from,
            default_to,
        }))
    }
}

fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ids_trims_and_drops_empties() {
        assert_eq!(split_ids(Some("111, 222 ,,333")), vec!["111", "222", "333"]);
        assert_eq!(split_ids(Some("")), Vec::<String>::new());
        assert_eq!(split_ids(None), Vec::<String>::new());
    }
}
