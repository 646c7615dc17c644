use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Optional JSON catalog replacing the built-in appliances, technicians,
    /// week and slots.
    pub catalog_path: Option<String>,
    /// Month shown next to day numbers on confirmations.
    pub display_month: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            catalog_path: env::var("CATALOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            display_month: env::var("DISPLAY_MONTH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "Sep".to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            catalog_path: None,
            display_month: "Sep".to_string(),
        }
    }
}
