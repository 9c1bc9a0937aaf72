//! Pagination over one collection

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::listing::extract_listing;
use crate::render::Renderer;
use crate::types::{CollectionSpec, ProductSummary};

/// URL of page `page` of a collection
pub fn page_url(collection_url: &str, page: u32) -> String {
    let separator = if collection_url.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", collection_url, separator, page)
}

/// Walk a collection page by page until a page lists no products
///
/// Also stops when `max_pages` pages have been read, or when a page lists
/// exactly the same products as the previous page (storefronts that serve
/// their last page for any page number past the end).
pub fn crawl_collection<R: Renderer>(
    renderer: &mut R,
    collection: &CollectionSpec,
    vendor_id: &str,
    max_pages: Option<u32>,
) -> Result<Vec<ProductSummary>> {
    let mut products = Vec::new();
    let mut previous_page: Vec<ProductSummary> = Vec::new();
    let mut page_number = 1;

    loop {
        if max_pages.is_some_and(|max| page_number > max) {
            warn!(
                collection = %collection.url,
                max_pages = page_number - 1,
                "Page limit reached, stopping collection"
            );
            break;
        }

        let url = page_url(&collection.url, page_number);
        info!("Scraping: {}", url);
        let page = renderer.render(&url)?;
        let page_products = extract_listing(&page, vendor_id);
        debug!(page = page_number, count = page_products.len(), "Listing page read");

        if page_products.is_empty() {
            break;
        }

        if page_products == previous_page {
            warn!(
                collection = %collection.url,
                page = page_number,
                "Page repeats the previous page, stopping collection"
            );
            break;
        }

        products.extend(page_products.iter().cloned());
        previous_page = page_products;
        page_number += 1;
    }

    Ok(products)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::StaticRenderer;

    pub(crate) const EMPTY_PAGE: &str = "<html><body><p>No products found</p></body></html>";

    pub(crate) fn listing_html(handles: &[&str]) -> String {
        let blocks: String = handles
            .iter()
            .map(|h| {
                format!(
                    r#"<div class="product-block"><a class="caption" href="/products/{h}"><span class="title">{h}</span></a></div>"#
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", blocks)
    }

    fn collection() -> CollectionSpec {
        CollectionSpec::new("https://shop.test/collections/tops", &["women", "tops"])
    }

    fn labels(products: &[ProductSummary]) -> Vec<&str> {
        products.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url("https://shop.test/collections/tops", 3),
            "https://shop.test/collections/tops?page=3"
        );
        assert_eq!(
            page_url("https://shop.test/collections/tops?sort_by=price", 2),
            "https://shop.test/collections/tops?sort_by=price&page=2"
        );
    }

    #[test]
    fn test_stops_at_first_empty_page() {
        let mut renderer = StaticRenderer::default()
            .with_page("https://shop.test/collections/tops?page=1", &listing_html(&["a", "b"]))
            .with_page("https://shop.test/collections/tops?page=2", &listing_html(&["c"]))
            .with_page("https://shop.test/collections/tops?page=3", EMPTY_PAGE)
            .with_page("https://shop.test/collections/tops?page=4", &listing_html(&["d"]));

        let products = crawl_collection(&mut renderer, &collection(), "v", None).unwrap();

        assert_eq!(labels(&products), vec!["a", "b", "c"]);
        assert_eq!(renderer.visited.len(), 3);
        assert_eq!(products[2].product_url, "https://shop.test/products/c");
    }

    #[test]
    fn test_immediately_empty_collection() {
        let mut renderer = StaticRenderer::default()
            .with_page("https://shop.test/collections/tops?page=1", EMPTY_PAGE);
        let products = crawl_collection(&mut renderer, &collection(), "v", None).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_repeated_page_stops_crawl() {
        let mut renderer = StaticRenderer::default()
            .with_page("https://shop.test/collections/tops?page=1", &listing_html(&["a"]))
            .with_page("https://shop.test/collections/tops?page=2", &listing_html(&["b"]))
            .with_page("https://shop.test/collections/tops?page=3", &listing_html(&["b"]));

        let products = crawl_collection(&mut renderer, &collection(), "v", None).unwrap();
        assert_eq!(labels(&products), vec!["a", "b"]);
    }

    #[test]
    fn test_unlinked_pages_are_not_repeats() {
        let unlinked = |label: &str| {
            format!(
                r#"<html><body><div class="product-block"><span class="title">{label}</span></div></body></html>"#
            )
        };
        let mut renderer = StaticRenderer::default()
            .with_page("https://shop.test/collections/tops?page=1", &unlinked("a"))
            .with_page("https://shop.test/collections/tops?page=2", &unlinked("b"))
            .with_page("https://shop.test/collections/tops?page=3", EMPTY_PAGE);

        let products = crawl_collection(&mut renderer, &collection(), "v", None).unwrap();
        assert_eq!(labels(&products), vec!["a", "b"]);
        assert!(products.iter().all(|p| p.product_url.is_empty()));
        assert_eq!(renderer.visited.len(), 3);
    }

    #[test]
    fn test_page_limit() {
        let mut renderer = StaticRenderer::default()
            .with_page("https://shop.test/collections/tops?page=1", &listing_html(&["a"]))
            .with_page("https://shop.test/collections/tops?page=2", &listing_html(&["b"]));

        let products = crawl_collection(&mut renderer, &collection(), "v", Some(1)).unwrap();
        assert_eq!(labels(&products), vec!["a"]);
        assert_eq!(renderer.visited.len(), 1);
    }

    #[test]
    fn test_render_failure_propagates() {
        let mut renderer = StaticRenderer::default()
            .with_page("https://shop.test/collections/tops?page=1", &listing_html(&["a"]));
        assert!(crawl_collection(&mut renderer, &collection(), "v", None).is_err());
    }
}
