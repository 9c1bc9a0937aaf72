//! Crawl configuration: target collections, vendor and output settings
//!
//! Loaded from a CONL file when one is given, otherwise the built-in storefront
//! collections are used.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::types::CollectionSpec;

/// Placeholder until the vendor's catalog UUID is known
pub const DEFAULT_VENDOR_ID: &str = "00000000-0000-0000-0000-000000000000";
pub const DEFAULT_OUTPUT: &str = "products.json";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; StorefrontCatalog/1.0)";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_vendor_id")]
    pub vendor_id: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Stop a collection after this many pages even if it never runs dry
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
}

fn default_vendor_id() -> String {
    DEFAULT_VENDOR_ID.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_id: default_vendor_id(),
            output: default_output(),
            max_pages: None,
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout_secs(),
            collections: default_collections(),
        }
    }
}

/// The storefront's topwear and bottomwear collections
pub fn default_collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec::new(
            "https://izfworld.com/collections/top",
            &["women", "topwear", "tops", "tank tops", "sleeveless"],
        ),
        CollectionSpec::new(
            "https://izfworld.com/collections/tees",
            &["women", "topwear", "tops", "t-shirts", "tees"],
        ),
        CollectionSpec::new(
            "https://izfworld.com/collections/women-shirts",
            &["women", "topwear", "tops", "shirts"],
        ),
        CollectionSpec::new(
            "https://izfworld.com/collections/shrugs",
            &["women", "topwear", "shrugs", "layering"],
        ),
        CollectionSpec::new(
            "https://izfworld.com/collections/skirts",
            &["women", "bottomwear", "skirts"],
        ),
        CollectionSpec::new(
            "https://izfworld.com/collections/skirts-1",
            &["women", "bottomwear", "skirts"],
        ),
        CollectionSpec::new(
            "https://izfworld.com/collections/jeans-pants-more",
            &["women", "bottomwear", "pants", "jeans", "trousers"],
        ),
    ]
}

impl Config {
    /// Load from `path`, or fall back to the built-in configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_conl::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.collections.is_empty() {
            bail!("No collections configured. Add at least one entry under 'collections'.");
        }
        for collection in &self.collections {
            Url::parse(&collection.url)
                .with_context(|| format!("Invalid collection URL: '{}'", collection.url))?;
        }
        if self.max_pages == Some(0) {
            bail!("max_pages must be at least 1");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
