//! Catalog types shared by the crawl pipeline and the JSON output

use serde::{Deserialize, Serialize};

/// One paginated collection on the storefront and the tags every product in it receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub url: String,
    #[serde(default)]
    pub category_tags: Vec<String>,
}

impl CollectionSpec {
    pub fn new(url: &str, category_tags: &[&str]) -> Self {
        Self {
            url: url.to_string(),
            category_tags: category_tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Current and struck-through price of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub current: Option<f64>,
    pub original: Option<f64>,
}

/// One entry of a collection listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSummary {
    pub label: String,
    /// Absolute detail page URL, empty when the listing had no product link
    pub product_url: String,
    pub vendor_id: String,
    pub price: Price,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
}

impl ProductSummary {
    pub fn has_detail_page(&self) -> bool {
        !self.product_url.is_empty()
    }
}

/// Labeled attributes found on a product detail page
///
/// Only the fields whose label was present on the page are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

impl DetailFields {
    /// The fields that double as tags, in merge order
    pub fn tag_fields(&self) -> [Option<&str>; 5] {
        [
            self.fit.as_deref(),
            self.neck.as_deref(),
            self.sleeve.as_deref(),
            self.length.as_deref(),
            self.print_type.as_deref(),
        ]
    }
}

/// Everything pulled from a detail page's description block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
    pub description: String,
    pub fields: DetailFields,
    /// Hashtag and styling-tip keywords, unique, in order of discovery
    pub extracted_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    pub product_url: String,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_details: Option<DetailFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Final catalog entry as written to disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub label: String,
    pub description: String,
    pub images: Vec<String>,
    pub vendor_id: String,
    pub price: Price,
    pub meta: ProductMeta,
}

impl From<ProductSummary> for ProductRecord {
    fn from(summary: ProductSummary) -> Self {
        Self {
            label: summary.label,
            description: String::new(),
            images: summary.images,
            vendor_id: summary.vendor_id,
            price: summary.price,
            meta: ProductMeta {
                product_url: summary.product_url,
                rating: summary.rating,
                review_count: summary.review_count,
                sizes: summary.sizes,
                colors: summary.colors,
                product_details: None,
                tags: None,
            },
        }
    }
}

/// Products in collection, page, then listing order
pub type Catalog = Vec<ProductRecord>;
