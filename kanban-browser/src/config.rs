//! Browser and locator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for browser sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver server URL (e.g., "http://localhost:4444")
    pub webdriver_url: String,

    /// Browser type to use
    pub browser: BrowserType,

    /// Run in headless mode (no visible window)
    pub headless: bool,

    /// Viewport width in pixels
    pub viewport_width: u32,

    /// Viewport height in pixels
    pub viewport_height: u32,

    /// Page load timeout in seconds
    pub page_load_timeout_secs: u64,

    /// Implicit wait timeout in seconds.
    ///
    /// Kept at zero so that counting cards of an empty column returns at
    /// once; explicit waits use `action_timeout_secs`.
    pub implicit_wait_secs: u64,

    /// How long to wait for an element to become clickable or appear
    pub action_timeout_secs: u64,

    /// User agent string override
    pub user_agent: Option<String>,

    /// Additional browser arguments
    pub browser_args: Vec<String>,
}

/// Supported browser types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    Chrome,
    Firefox,
    Edge,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            browser: BrowserType::Chrome,
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            page_load_timeout_secs: 30,
            implicit_wait_secs: 0,
            action_timeout_secs: 10,
            user_agent: None,
            browser_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the WebDriver URL.
    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    /// Set the browser type.
    pub fn browser(mut self, browser: BrowserType) -> Self {
        self.browser = browser;
        self
    }

    /// Enable or disable headless mode.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the viewport size.
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the explicit wait used before clicks and board reads.
    pub fn action_timeout(mut self, secs: u64) -> Self {
        self.action_timeout_secs = secs;
        self
    }

    /// Add a browser argument.
    pub fn add_arg(mut self, arg: impl Into<String>) -> Self {
        self.browser_args.push(arg.into());
        self
    }
}

/// Where the board's parts live in the page.
///
/// Fields ending in `_css` are CSS selectors, the rest are XPath. Templates
/// containing `{name}` get the card title substituted as an XPath literal.
/// Defaults match the DOM of the reference kanban application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLocators {
    pub columns_css: String,
    pub column_header_css: String,
    pub card_css: String,
    pub card_title_css: String,
    pub card_subtasks_css: String,
    /// Rows of the subtask checklist in an open card.
    pub subtask_rows_css: String,
    /// Class that marks a completed subtask.
    pub completed_class: String,

    pub card_tile: String,
    pub card_menu: String,
    pub subtask_checkboxes: String,
    pub subtask_label: String,

    pub status_dropdown: String,
    pub status_options: String,
    pub edit_option: String,
    pub delete_option: String,
    pub confirm_delete_button: String,
    pub cancel_delete_button: String,
    pub submit_button: String,
}

impl Default for BoardLocators {
    fn default() -> Self {
        Self {
            columns_css: "div.flex.gap-6 > section".to_string(),
            column_header_css: "h2".to_string(),
            card_css: "article".to_string(),
            card_title_css: "h3".to_string(),
            card_subtasks_css: "p.text-xs".to_string(),
            subtask_rows_css: "div.flex.flex-col.gap-2 label".to_string(),
            completed_class: "line-through".to_string(),

            card_tile: "//h3[normalize-space(text())={name}]".to_string(),
            card_menu: "//h4[normalize-space(text())={name}]/following-sibling::div".to_string(),
            subtask_checkboxes: concat!(
                "//h4[normalize-space(text())={name}]",
                "/following::label//input[@type='checkbox']"
            )
            .to_string(),
            subtask_label: concat!(
                "//h4[normalize-space(text())={name}]",
                "/following::p[contains(normalize-space(.), 'Subtasks')]"
            )
            .to_string(),

            status_dropdown: "//p[text()=' Current Status ']/following-sibling::div".to_string(),
            status_options: "(//div[contains(@class,'p-4 text-medium-grey')])".to_string(),
            edit_option: r#"//p[normalize-space(text())="Edit Task"]"#.to_string(),
            delete_option: r#"//p[normalize-space(text())="Delete Task"]"#.to_string(),
            confirm_delete_button: r#"//button[text()="Delete"]"#.to_string(),
            cancel_delete_button: r#"//button[normalize-space(text())="Cancel"]"#.to_string(),
            submit_button: "//button[@type='submit']".to_string(),
        }
    }
}

impl BoardLocators {
    /// Fill a `{name}` template with `name` quoted as an XPath literal.
    pub fn for_card(template: &str, name: &str) -> String {
        template.replace("{name}", &xpath_literal(name))
    }
}

/// Quote `value` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// assembled with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    let parts: Vec<String> = value.split('\'').map(|part| format!("'{}'", part)).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert!(config.headless);
        assert_eq!(config.implicit_wait_secs, 0);
    }

    #[test]
    fn test_builder() {
        let config = BrowserConfig::new()
            .browser(BrowserType::Firefox)
            .headless(false)
            .viewport(1280, 720)
            .action_timeout(3);

        assert_eq!(config.browser, BrowserType::Firefox);
        assert!(!config.headless);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.action_timeout_secs, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BrowserConfig = toml::from_str("browser = \"edge\"\nheadless = false").unwrap();
        assert_eq!(config.browser, BrowserType::Edge);
        assert!(!config.headless);
        assert_eq!(config.viewport_height, 1080);

        let locators: BoardLocators = toml::from_str("card_css = \"li.card\"").unwrap();
        assert_eq!(locators.card_css, "li.card");
        assert_eq!(locators.column_header_css, "h2");
    }

    #[test]
    fn test_xpath_literal() {
        assert_eq!(xpath_literal("Build UI"), "'Build UI'");
        assert_eq!(xpath_literal("Don't panic"), "\"Don't panic\"");
        assert_eq!(xpath_literal(r#"It's "done""#), r#"concat('It', "'", 's "done"')"#);
    }

    #[test]
    fn test_for_card() {
        let locators = BoardLocators::default();
        assert_eq!(
            BoardLocators::for_card(&locators.card_tile, "Build UI"),
            "//h3[normalize-space(text())='Build UI']"
        );
    }
}
