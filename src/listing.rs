//! Product summaries from a collection listing page

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::render::RenderedPage;
use crate::types::{Price, ProductSummary};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

static PRODUCT_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector(".product-block"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".title"));
static PRODUCT_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.caption"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector(".price .theme-money"));
static WAS_PRICE: LazyLock<Selector> = LazyLock::new(|| selector(".was-price"));
static REVIEW_BADGE: LazyLock<Selector> = LazyLock::new(|| selector(".jdgm-prev-badge"));
static SIZES: LazyLock<Selector> = LazyLock::new(|| selector(".prd_name ul li a"));
static COLORS: LazyLock<Selector> = LazyLock::new(|| selector(".cc-swatches li a"));

const IMAGES_ATTR: &str = "data-product-images";
const WIDTH_PLACEHOLDER: &str = "{width}x";
const IMAGE_WIDTH: &str = "1024x";

/// Extract every product block on a listing page
///
/// An empty result means the collection has no more pages.
pub fn extract_listing(page: &RenderedPage, vendor_id: &str) -> Vec<ProductSummary> {
    let base = Url::parse(&page.url).ok();

    page.document
        .select(&PRODUCT_BLOCK)
        .map(|block| {
            let badge = block.select(&REVIEW_BADGE).next();

            ProductSummary {
                label: first_text(block, &TITLE).unwrap_or_default(),
                product_url: block
                    .select(&PRODUCT_LINK)
                    .next()
                    .and_then(|link| link.value().attr("href"))
                    .map(|href| resolve_href(base.as_ref(), href))
                    .unwrap_or_default(),
                vendor_id: vendor_id.to_string(),
                price: Price {
                    current: first_text(block, &PRICE).and_then(|t| parse_price(&t)),
                    original: first_text(block, &WAS_PRICE).and_then(|t| parse_price(&t)),
                },
                rating: badge
                    .and_then(|b| b.value().attr("data-average-rating"))
                    .and_then(parse_rating),
                review_count: badge
                    .and_then(|b| b.value().attr("data-number-of-reviews"))
                    .and_then(parse_leading_int)
                    .unwrap_or(0),
                sizes: block.select(&SIZES).map(element_text).collect(),
                colors: block
                    .select(&COLORS)
                    .map(|a| a.value().attr("title").unwrap_or_default().trim().to_string())
                    .collect(),
                images: block
                    .value()
                    .attr(IMAGES_ATTR)
                    .map(parse_images)
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Rendered text of an element with whitespace runs collapsed
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(block: ElementRef, selector: &Selector) -> Option<String> {
    block.select(selector).next().map(element_text)
}

/// Make an href absolute against the page it appeared on
fn resolve_href(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    match base.and_then(|b| b.join(href).ok()) {
        Some(url) => url.to_string(),
        None => href.to_string(),
    }
}

/// Parse a price like "₹1,299.00" by keeping only digits and dots
///
/// Returns None when no digits are present.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    parse_leading_float(&cleaned)
}

/// Average rating; a zero or unreadable rating counts as unrated
fn parse_rating(text: &str) -> Option<f64> {
    parse_leading_float(text.trim()).filter(|r| *r != 0.0)
}

/// Parse the longest numeric prefix, so "4.5 stars" is 4.5 and "1.2.3" is 1.2
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            '-' | '+' if i == 0 => {}
            _ => break,
        }
    }
    text[..end].parse().ok()
}

fn parse_leading_int(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn parse_images(attr: &str) -> Vec<String> {
    attr.split(',')
        .map(str::trim)
        .filter(|img| !img.is_empty())
        .map(|img| img.replacen(WIDTH_PLACEHOLDER, IMAGE_WIDTH, 1))
        .collect()
}
