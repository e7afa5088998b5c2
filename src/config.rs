use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Bundled front end served for every non-API path
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The database location comes from `DATABASE_URL` when set, otherwise it
    /// is assembled from `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`,
    /// `MYSQL_PASSWORD` and `MYSQL_DATABASE`, each with a local default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => mysql_url(
                &env::var("MYSQL_HOST").unwrap_or_else(|_| "localhost".to_string()),
                parse_var("MYSQL_PORT", 3306u16)?,
                &env::var("MYSQL_USER").unwrap_or_else(|_| "root".to_string()),
                &env::var("MYSQL_PASSWORD").unwrap_or_default(),
                &env::var("MYSQL_DATABASE").unwrap_or_else(|_| "AgroTech".to_string()),
            ),
        };

        Ok(Self {
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,

            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: parse_var("API_PORT", 5000)?,

            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Database URL with the password replaced, for log lines.
    #[must_use]
    pub fn masked_database_url(&self) -> String {
        let url = &self.database_url;
        let Some(at) = url.rfind('@') else {
            return url.clone();
        };
        let Some(scheme_end) = url.find("://") else {
            return url.clone();
        };
        match url[scheme_end + 3..at].find(':') {
            Some(colon) => {
                let colon = scheme_end + 3 + colon;
                format!("{}:****{}", &url[..colon], &url[at..])
            }
            None => url.clone(),
        }
    }
}

/// Build a MySQL connection URL from its parts.
#[must_use]
pub fn mysql_url(host: &str, port: u16, user: &str, password: &str, database: &str) -> String {
    if password.is_empty() {
        format!("mysql://{user}@{host}:{port}/{database}")
    } else {
        format!("mysql://{user}:{password}@{host}:{port}/{database}")
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> Config {
        Config {
            database_url: url.to_string(),
            db_max_connections: 1,
            run_migrations: false,
            api_host: "127.0.0.1".to_string(),
            api_port: 5000,
            static_dir: "static".to_string(),
        }
    }

    #[test]
    fn mysql_url_omits_empty_password() {
        assert_eq!(
            mysql_url("localhost", 3306, "root", "", "AgroTech"),
            "mysql://root@localhost:3306/AgroTech"
        );
        assert_eq!(
            mysql_url("db", 3307, "agro", "s3cret", "AgroTech"),
            "mysql://agro:s3cret@db:3307/AgroTech"
        );
    }

    #[test]
    fn password_is_masked_in_logs() {
        let cfg = config_with_url("mysql://agro:s3cret@db:3306/AgroTech");
        assert_eq!(cfg.masked_database_url(), "mysql://agro:****@db:3306/AgroTech");

        let cfg = config_with_url("mysql://root@localhost:3306/AgroTech");
        assert_eq!(cfg.masked_database_url(), "mysql://root@localhost:3306/AgroTech");
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        assert_eq!(config_with_url("mysql://x").bind_address(), "127.0.0.1:5000");
    }
}
