use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Single-user deployment; the key space still carries the id so the
    /// store stays keyed by (user, date).
    pub user_id: i64,
    pub default_limit_mg: f64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:iron.db".into());
        let user_id = std::env::var("APP_USER_ID")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(1);
        let default_limit_mg = std::env::var("DEFAULT_LIMIT_MG")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(15.0);
        Ok(Self {
            database_url,
            user_id,
            default_limit_mg,
        })
    }
}
