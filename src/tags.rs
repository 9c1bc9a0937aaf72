//! Tag mining from free text and the tag merge used for catalog records

use regex::Regex;
use std::sync::LazyLock;

use crate::types::DetailFields;

static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9A-Za-z_]+").expect("hardcoded regex pattern is valid"));

const STYLING_TIP_MARKER: &str = "styling tip";
const STYLING_PHRASES: &[&str] = &["pair with", "wear with"];
const STOP_WORDS: &[&str] = &["with", "and", "the", "for"];
const MIN_KEYWORD_CHARS: usize = 4;

/// Append `tag` unless an equal entry is already present
pub fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Extract hashtags and styling-tip keywords from a block of text
///
/// Hashtags are returned without the `#`, lower-cased. Styling-tip keywords are
/// only mined when the text mentions a "styling tip": every sentence that says
/// "pair with" or "wear with" contributes its words longer than three characters,
/// minus a few stop words.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();

    for hashtag in HASHTAG_REGEX.find_iter(text) {
        push_unique(&mut tags, hashtag.as_str()[1..].to_lowercase());
    }

    let lower = text.to_lowercase();
    if !lower.contains(STYLING_TIP_MARKER) {
        return tags;
    }

    for sentence in lower.split(['.', ',', '!', '?']) {
        if !STYLING_PHRASES.iter().any(|phrase| sentence.contains(phrase)) {
            continue;
        }
        for word in sentence.split_whitespace() {
            if word.chars().count() >= MIN_KEYWORD_CHARS && !STOP_WORDS.contains(&word) {
                push_unique(&mut tags, word.to_string());
            }
        }
    }

    tags
}

/// Normalize candidate tags and drop repeats, keeping first occurrences in order
pub fn dedupe_tags<'a, I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags = Vec::new();
    for candidate in candidates {
        let tag = candidate.trim().to_lowercase();
        if !tag.is_empty() {
            push_unique(&mut tags, tag);
        }
    }
    tags
}

/// Build a product's tag list: category tags, then mined tags, then the
/// fit/neck/sleeve/length/print type fields that are present
pub fn merge_tags(
    category_tags: &[String],
    extracted_tags: &[String],
    fields: &DetailFields,
) -> Vec<String> {
    let structured = fields.tag_fields();
    dedupe_tags(
        category_tags
            .iter()
            .map(String::as_str)
            .chain(extracted_tags.iter().map(String::as_str))
            .chain(structured.into_iter().flatten()),
    )
}
