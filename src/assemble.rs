//! Turning listing summaries into catalog records

use anyhow::Result;
use tracing::{info, warn};

use crate::detail::extract_details;
use crate::render::Renderer;
use crate::tags::merge_tags;
use crate::types::{ProductDetails, ProductRecord, ProductSummary};

/// Build the catalog record for one listed product
///
/// Products with a detail page get its description, labeled fields and merged
/// tags. A product without a link, or whose page has no description block, is
/// kept with an empty description and no tags.
pub fn assemble_product<R: Renderer>(
    renderer: &mut R,
    summary: ProductSummary,
    category_tags: &[String],
) -> Result<ProductRecord> {
    let details = if summary.has_detail_page() {
        info!("Fetching details for: {}", summary.product_url);
        let page = renderer.render(&summary.product_url)?;
        let details = extract_details(&page);
        if details.is_none() {
            warn!(url = %summary.product_url, "No description block on product page");
        }
        details
    } else {
        None
    };

    let mut record = ProductRecord::from(summary);
    if let Some(details) = details {
        enrich(&mut record, details, category_tags);
    }
    Ok(record)
}

fn enrich(record: &mut ProductRecord, details: ProductDetails, category_tags: &[String]) {
    let tags = merge_tags(category_tags, &details.extracted_tags, &details.fields);
    record.description = details.description;
    record.meta.product_details = Some(details.fields);
    record.meta.tags = Some(tags);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StaticRenderer;
    use crate::types::Price;

    const PRODUCT_URL: &str = "https://shop.test/products/wrap-top";

    fn summary(url: &str) -> ProductSummary {
        ProductSummary {
            label: "Wrap Top".to_string(),
            product_url: url.to_string(),
            vendor_id: "vendor-1".to_string(),
            price: Price {
                current: Some(899.0),
                original: None,
            },
            rating: Some(4.0),
            review_count: 3,
            sizes: vec!["S".to_string()],
            colors: vec!["Red".to_string()],
            images: vec!["//cdn.shop/wrap_1024x.jpg".to_string()],
        }
    }

    fn category_tags() -> Vec<String> {
        vec!["Women".to_string(), "tops".to_string()]
    }

    #[test]
    fn test_enriches_from_detail_page() {
        let mut renderer = StaticRenderer::default().with_page(
            PRODUCT_URL,
            r#"<html><body><div class="cc-accordion-item__content rte">
                <p>Wrap top in crepe. #Office #tops</p>
                <p>Fit: Regular</p>
                <p>Sleeve : Full Sleeves</p>
                <p>Occasion: Work</p>
            </div></body></html>"#,
        );

        let record = assemble_product(&mut renderer, summary(PRODUCT_URL), &category_tags()).unwrap();

        assert_eq!(record.description, "Wrap top in crepe. #Office #tops");
        // Occasion is recorded but is not a tag source
        assert_eq!(
            record.meta.tags,
            Some(
                ["women", "tops", "office", "regular", "full sleeves"]
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<String>>()
            )
        );
        let fields = record.meta.product_details.unwrap();
        assert_eq!(fields.occasion.as_deref(), Some("Work"));
        assert_eq!(record.vendor_id, "vendor-1");
        assert_eq!(record.meta.review_count, 3);
        assert_eq!(record.price.current, Some(899.0));
    }

    #[test]
    fn test_missing_description_block_leaves_record_plain() {
        let mut renderer = StaticRenderer::default()
            .with_page(PRODUCT_URL, "<html><body><h1>Wrap Top</h1></body></html>");

        let record = assemble_product(&mut renderer, summary(PRODUCT_URL), &category_tags()).unwrap();

        assert_eq!(record.description, "");
        assert_eq!(record.meta.product_details, None);
        assert_eq!(record.meta.tags, None);
        assert_eq!(record.label, "Wrap Top");
    }

    #[test]
    fn test_product_without_link_is_not_fetched() {
        let mut renderer = StaticRenderer::default();
        let record = assemble_product(&mut renderer, summary(""), &category_tags()).unwrap();

        assert!(renderer.visited.is_empty());
        assert_eq!(record.meta.tags, None);
    }

    #[test]
    fn test_detail_fetch_failure_propagates() {
        let mut renderer = StaticRenderer::default();
        assert!(assemble_product(&mut renderer, summary(PRODUCT_URL), &category_tags()).is_err());
    }
}
