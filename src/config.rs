use std::env;

pub const DEFAULT_DISTANCE_API_URL: &str = "https://www.distance24.org";
pub const DEFAULT_EMISSIONS_API_URL: &str = "https://api.monimpacttransport.fr/beta";
pub const DEFAULT_EQUIVALENTS_URL: &str = "https://raw.githubusercontent.com/datagir/monconvertisseurco2/1677802d89e9f1ad1678a0eb8d506c78e6f1f050/public/data/equivalents.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub luis_app_id: String,
    pub luis_api_key: String,
    pub luis_api_host_name: String,
    pub distance_api_url: String,
    pub emissions_api_url: String,
    pub equivalents_url: String,
    pub callback_url: String,
    pub conversation_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "flightbot.db".to_string()),
            luis_app_id: env::var("LUIS_APP_ID").unwrap_or_default(),
            luis_api_key: env::var("LUIS_API_KEY").unwrap_or_default(),
            luis_api_host_name: env::var("LUIS_API_HOST_NAME").unwrap_or_default(),
            distance_api_url: env::var("DISTANCE_API_URL")
                .unwrap_or_else(|_| DEFAULT_DISTANCE_API_URL.to_string()),
            emissions_api_url: env::var("EMISSIONS_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMISSIONS_API_URL.to_string()),
            equivalents_url: env::var("EQUIVALENTS_URL")
                .unwrap_or_else(|_| DEFAULT_EQUIVALENTS_URL.to_string()),
            callback_url: env::var("CALLBACK_URL").unwrap_or_default(),
            conversation_ttl_minutes: env::var("CONVERSATION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// NLU needs all three LUIS settings.
    pub fn luis_is_configured(&self) -> bool {
        !self.luis_app_id.is_empty()
            && !self.luis_api_key.is_empty()
            && !self.luis_api_host_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luis_requires_all_settings() {
        let mut config = AppConfig {
            port: 3000,
            database_url: ":memory:".to_string(),
            luis_app_id: "app".to_string(),
            luis_api_key: "key".to_string(),
            luis_api_host_name: String::new(),
            distance_api_url: DEFAULT_DISTANCE_API_URL.to_string(),
            emissions_api_url: DEFAULT_EMISSIONS_API_URL.to_string(),
            equivalents_url: DEFAULT_EQUIVALENTS_URL.to_string(),
            callback_url: String::new(),
            conversation_ttl_minutes: 30,
        };
        assert!(!config.luis_is_configured());

        config.luis_api_host_name = "westeurope.api.cognitive.microsoft.com".to_string();
        assert!(config.luis_is_configured());
    }
}
