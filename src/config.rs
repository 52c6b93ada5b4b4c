use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Absolute origin used for SEO alternate links
    pub site_origin: String,

    // Directory holding <locale>.json translation tables
    pub locales_dir: String,

    // HTTP
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            site_origin: std::env::var("SITE_ORIGIN")
                .unwrap_or_else(|_| "https://hangzhou2025.example.org".to_string()),

            locales_dir: std::env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string()),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
