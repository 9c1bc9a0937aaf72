//! Page rendering: turns a URL into a parsed document the extractors can query

use anyhow::{Context, Result};
use scraper::Html;
use std::time::Duration;

/// A loaded page, addressed by its final URL
pub struct RenderedPage {
    pub url: String,
    pub document: Html,
}

impl RenderedPage {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }
}

/// Loads pages one at a time. Any error aborts the crawl.
pub trait Renderer {
    fn render(&mut self, url: &str) -> Result<RenderedPage>;
}

/// Fetches pages over HTTP and parses the returned HTML
pub struct HttpRenderer {
    client: reqwest::blocking::Client,
}

impl HttpRenderer {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Renderer for HttpRenderer {
    fn render(&mut self, url: &str) -> Result<RenderedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch: {}", url))?
            .error_for_status()
            .with_context(|| format!("Bad status for: {}", url))?;

        let final_url = response.url().to_string();
        let text = response
            .text()
            .with_context(|| format!("Failed to read response: {}", url))?;

        Ok(RenderedPage::parse(&final_url, &text))
    }
}

/// Serves canned HTML by URL and remembers what was requested
#[cfg(test)]
#[derive(Default)]
pub struct StaticRenderer {
    pages: std::collections::HashMap<String, String>,
    pub visited: Vec<String>,
}

#[cfg(test)]
impl StaticRenderer {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[cfg(test)]
impl Renderer for StaticRenderer {
    fn render(&mut self, url: &str) -> Result<RenderedPage> {
        self.visited.push(url.to_string());
        let html = self
            .pages
            .get(url)
            .with_context(|| format!("Failed to fetch: {}", url))?;
        Ok(RenderedPage::parse(url, html))
    }
}
