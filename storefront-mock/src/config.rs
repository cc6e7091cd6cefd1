/// storefront-mock configuration, read from the environment
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Seed the demo catalog, accounts and reviews on startup
    pub seed_demo: bool,
}

impl MockConfig {
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("MOCK_HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            seed_demo: std::env::var("MOCK_SEED_DEMO")
                .ok()
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }
}
