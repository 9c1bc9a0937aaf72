//! Description, labeled attributes and mined tags from a product detail page

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

use crate::render::RenderedPage;
use crate::tags::{extract_tags, push_unique};
use crate::types::{DetailFields, ProductDetails};

static DESCRIPTION_BLOCK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".cc-accordion-item__content.rte").expect("hardcoded selector is valid")
});
static FIRST_PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p:first-child").expect("hardcoded selector is valid"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("hardcoded selector is valid"));

fn paragraph_text(paragraph: ElementRef) -> String {
    paragraph.text().collect::<String>().trim().to_string()
}

/// Extract product details from a detail page
///
/// Returns None when the page has no description block. Fields and the main
/// description come from the first block; tags are mined from the paragraphs of
/// every block, since styling tips often sit in a later accordion panel.
pub fn extract_details(page: &RenderedPage) -> Option<ProductDetails> {
    let container = page.document.select(&DESCRIPTION_BLOCK).next()?;

    let description = container
        .select(&FIRST_PARAGRAPH)
        .next()
        .map(paragraph_text)
        .unwrap_or_default();

    let mut fields = DetailFields::default();
    for paragraph in container.select(&PARAGRAPH) {
        apply_labels(&paragraph_text(paragraph), &mut fields);
    }

    let mut extracted_tags = Vec::new();
    for block in page.document.select(&DESCRIPTION_BLOCK) {
        for paragraph in block.select(&PARAGRAPH) {
            for tag in extract_tags(&paragraph_text(paragraph)) {
                push_unique(&mut extracted_tags, tag);
            }
        }
    }

    Some(ProductDetails {
        description,
        fields,
        extracted_tags,
    })
}

/// Set every field whose label occurs in `text` to what follows the label
fn apply_labels(text: &str, fields: &mut DetailFields) {
    let slots = [
        ("Fit:", &mut fields.fit),
        ("Neck :", &mut fields.neck),
        ("Sleeve :", &mut fields.sleeve),
        ("Length :", &mut fields.length),
        ("Print Type:", &mut fields.print_type),
        ("Occasion:", &mut fields.occasion),
        ("Shipping Time:", &mut fields.shipping_time),
        ("Delivery Time:", &mut fields.delivery_time),
    ];
    for (label, slot) in slots {
        if let Some((_, value)) = text.split_once(label) {
            *slot = Some(value.trim().to_string());
        }
    }
}
