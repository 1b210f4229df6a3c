//! Browser session management wrapping thirtyfour WebDriver.

use crate::config::{BrowserConfig, BrowserType};
use kanban_core::{KanbanError, Result};
use std::sync::Arc;
use std::time::Duration;
use thirtyfour::prelude::*;
use tokio::sync::RwLock;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A browser session that wraps thirtyfour's WebDriver.
///
/// Share it via `Arc<BrowserSession>`; the driver is created by `start()`.
pub struct BrowserSession {
    driver: RwLock<Option<WebDriver>>,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Create a new browser session with the given configuration.
    ///
    /// Note: This does not start the browser immediately.
    /// Call `start()` to initialize the WebDriver connection.
    pub fn new(config: BrowserConfig) -> Self {
        Self { driver: RwLock::new(None), config }
    }

    /// Create a browser session with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(BrowserConfig::default())
    }

    /// Start the browser session by connecting to WebDriver.
    pub async fn start(&self) -> Result<()> {
        let mut driver_guard = self.driver.write().await;

        if driver_guard.is_some() {
            return Ok(()); // Already started
        }

        let caps = self.build_capabilities()?;
        let driver = WebDriver::new(&self.config.webdriver_url, caps)
            .await
            .map_err(|e| KanbanError::Surface(format!("Failed to start browser: {}", e)))?;

        driver
            .set_page_load_timeout(Duration::from_secs(self.config.page_load_timeout_secs))
            .await
            .map_err(|e| KanbanError::Surface(format!("Failed to set page load timeout: {}", e)))?;

        driver
            .set_implicit_wait_timeout(Duration::from_secs(self.config.implicit_wait_secs))
            .await
            .map_err(|e| KanbanError::Surface(format!("Failed to set implicit wait: {}", e)))?;

        driver
            .set_window_rect(0, 0, self.config.viewport_width, self.config.viewport_height)
            .await
            .map_err(|e| KanbanError::Surface(format!("Failed to set viewport: {}", e)))?;

        tracing::info!(
            webdriver = %self.config.webdriver_url,
            browser = ?self.config.browser,
            "browser session started"
        );
        *driver_guard = Some(driver);
        Ok(())
    }

    /// Stop the browser session.
    pub async fn stop(&self) -> Result<()> {
        let mut driver_guard = self.driver.write().await;

        if let Some(driver) = driver_guard.take() {
            driver
                .quit()
                .await
                .map_err(|e| KanbanError::Surface(format!("Failed to quit browser: {}", e)))?;
        }

        Ok(())
    }

    /// Check if the session is active.
    pub async fn is_active(&self) -> bool {
        self.driver.read().await.is_some()
    }

    /// Get the configuration.
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    async fn driver(&self) -> Result<WebDriver> {
        self.driver
            .read()
            .await
            .clone()
            .ok_or_else(|| KanbanError::Surface("Browser session not started".to_string()))
    }

    /// Navigate to a URL.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let driver = self.driver().await?;
        driver
            .goto(url)
            .await
            .map_err(|e| KanbanError::Surface(format!("Navigation failed: {}", e)))
    }

    /// Find all elements matching a CSS selector. An empty result is not an error.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<WebElement>> {
        let driver = self.driver().await?;
        driver
            .find_all(By::Css(selector))
            .await
            .map_err(|e| {
                KanbanError::Surface(format!("Elements query failed '{}': {}", selector, e))
            })
    }

    /// Find all elements matching an XPath expression.
    pub async fn find_all_by_xpath(&self, xpath: &str) -> Result<Vec<WebElement>> {
        let driver = self.driver().await?;
        driver
            .find_all(By::XPath(xpath))
            .await
            .map_err(|e| KanbanError::Surface(format!("XPath query failed '{}': {}", xpath, e)))
    }

    /// Wait until a CSS selector matches, or fail with `NotFound`.
    pub async fn wait_for_element(&self, selector: &str) -> Result<WebElement> {
        let driver = self.driver().await?;
        let timeout = Duration::from_secs(self.config.action_timeout_secs);

        driver.query(By::Css(selector)).wait(timeout, POLL_INTERVAL).first().await.map_err(|e| {
            tracing::debug!(selector, error = %e, "element did not appear");
            KanbanError::not_found("element", selector)
        })
    }

    /// Wait until nothing matches the XPath expression.
    ///
    /// Fails with `Surface` if it is still present after `action_timeout_secs`.
    pub async fn wait_for_absent(&self, xpath: &str) -> Result<()> {
        let driver = self.driver().await?;
        let timeout = Duration::from_secs(self.config.action_timeout_secs);

        driver.query(By::XPath(xpath)).wait(timeout, POLL_INTERVAL).not_exists().await.map_err(|e| {
            tracing::debug!(xpath, error = %e, "element did not go away");
            KanbanError::Surface(format!("Still present after {:?}: '{}'", timeout, xpath))
        })
    }

    /// Wait for the XPath target to become clickable, then click it.
    pub async fn click_xpath(&self, xpath: &str) -> Result<()> {
        let driver = self.driver().await?;
        let timeout = Duration::from_secs(self.config.action_timeout_secs);

        let element = driver
            .query(By::XPath(xpath))
            .wait(timeout, POLL_INTERVAL)
            .and_clickable()
            .first()
            .await
            .map_err(|e| {
                tracing::debug!(xpath, error = %e, "element not clickable");
                KanbanError::not_found("element", xpath)
            })?;

        element
            .click()
            .await
            .map_err(|e| KanbanError::Surface(format!("Click failed on '{}': {}", xpath, e)))
    }

    /// Build browser capabilities based on configuration.
    fn build_capabilities(&self) -> Result<Capabilities> {
        let caps = match self.config.browser {
            BrowserType::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if self.config.headless {
                    caps.add_arg("--headless=new").map_err(|e| {
                        KanbanError::Surface(format!("Failed to add headless arg: {}", e))
                    })?;
                }
                caps.add_arg("--no-sandbox")
                    .map_err(|e| KanbanError::Surface(format!("Failed to add no-sandbox: {}", e)))?;
                caps.add_arg("--disable-dev-shm-usage").map_err(|e| {
                    KanbanError::Surface(format!("Failed to add disable-dev-shm: {}", e))
                })?;

                if let Some(ref ua) = self.config.user_agent {
                    caps.add_arg(&format!("--user-agent={}", ua)).map_err(|e| {
                        KanbanError::Surface(format!("Failed to add user-agent: {}", e))
                    })?;
                }

                for arg in &self.config.browser_args {
                    caps.add_arg(arg).map_err(|e| {
                        KanbanError::Surface(format!("Failed to add arg '{}': {}", arg, e))
                    })?;
                }

                caps.into()
            }
            BrowserType::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if self.config.headless {
                    caps.add_arg("-headless").map_err(|e| {
                        KanbanError::Surface(format!("Failed to add headless: {}", e))
                    })?;
                }
                caps.into()
            }
            BrowserType::Edge => {
                let mut caps = DesiredCapabilities::edge();
                if self.config.headless {
                    caps.add_arg("--headless").map_err(|e| {
                        KanbanError::Surface(format!("Failed to add headless: {}", e))
                    })?;
                }
                caps.into()
            }
        };

        Ok(caps)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Can't quit asynchronously here; thirtyfour closes the session on its own drop
        tracing::debug!("BrowserSession dropped");
    }
}

/// Create a shared browser session.
pub fn shared_session(config: BrowserConfig) -> Arc<BrowserSession> {
    Arc::new(BrowserSession::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_not_started() {
        let session = BrowserSession::with_defaults();
        assert!(!session.is_active().await);

        let result = session.navigate("https://example.com").await;
        assert!(matches!(result, Err(KanbanError::Surface(_))));
        assert!(session.find_elements("section").await.is_err());
        assert!(matches!(session.wait_for_absent("//button").await, Err(KanbanError::Surface(_))));
    }

    #[tokio::test]
    async fn test_stop_without_start_is_ok() {
        let session = shared_session(BrowserConfig::new().headless(true));
        session.stop().await.unwrap();
        assert!(session.config().headless);
    }
}
