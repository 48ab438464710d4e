use std::time::Duration;

/// Storefront the scraper talks to. Links and images are made absolute against it.
pub const DEFAULT_ORIGIN: &str = "https://obuv-tut2000.ru";

pub struct ScraperConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Scheme and host of the shop, without a trailing slash.
    pub origin: String,
    /// Upper bound for a single page navigation (default: 60s).
    pub navigation_timeout: Duration,
    /// How long to wait for the product-card marker after navigating (default: 5s).
    pub marker_timeout: Duration,
    /// Stop after this many result pages. `None` paginates until the shop runs out.
    pub max_pages: Option<u32>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            origin: DEFAULT_ORIGIN.to_string(),
            navigation_timeout: Duration::from_secs(60),
            marker_timeout: Duration::from_secs(5),
            max_pages: None,
        }
    }
}

impl ScraperConfig {
    pub fn builder() -> ScraperBuilder {
        ScraperBuilder::new()
    }
}

pub struct ScraperBuilder {
    config: ScraperConfig,
}

impl ScraperBuilder {
    pub fn new() -> Self {
        Self {
            config: ScraperConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Point the scraper at another host serving the same markup.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.config.origin = origin.trim_end_matches('/').to_string();
        self
    }

    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.config.navigation_timeout = timeout;
        self
    }

    pub fn marker_timeout(mut self, timeout: Duration) -> Self {
        self.config.marker_timeout = timeout;
        self
    }

    pub fn max_pages(mut self, pages: u32) -> Self {
        self.config.max_pages = Some(pages);
        self
    }

    pub fn build(self) -> ScraperConfig {
        self.config
    }
}

impl Default for ScraperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shop() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert_eq!(config.origin, "https://obuv-tut2000.ru");
        assert_eq!(config.navigation_timeout, Duration::from_secs(60));
        assert_eq!(config.marker_timeout, Duration::from_secs(5));
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn builder_overrides_and_strips_trailing_slash() {
        let config = ScraperConfig::builder()
            .headless(false)
            .origin("http://127.0.0.1:8080/")
            .marker_timeout(Duration::from_millis(250))
            .max_pages(3)
            .build();
        assert!(!config.headless);
        assert_eq!(config.origin, "http://127.0.0.1:8080");
        assert_eq!(config.marker_timeout, Duration::from_millis(250));
        assert_eq!(config.max_pages, Some(3));
    }
}
