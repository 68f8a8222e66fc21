// ----------------------------------------------------------------------------
// Raw catalog pages, e.g. a department listing under
// inside.bard.edu/academic/courses/current/. Pages are fetched as HTML and
// flattened to plain text so the scrape export can be built from them.
// ----------------------------------------------------------------------------

use crate::error::*;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use scraper::Html;
use std::path::Path;

const USER_AGENT: &str = "catalog-cleaner";

// Text under these never shows on the page
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

pub async fn fetch_catalog_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    info!("Fetched {} ({} bytes)", url, html.len());

    Ok(html)
}

/// Visible text of an HTML page: scripts, styles and comments dropped,
/// entities decoded, every text run separated by one space.
pub fn strip_tags(html: &str) -> String {
    let document = Html::parse_document(html);

    let runs: Vec<&str> = document
        .root_element()
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
            })
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect();

    WHITESPACE_RE.replace_all(&runs.join(" "), " ").to_string()
}

pub async fn save_catalog_text(url: &str, out: &Path) -> Result<()> {
    let html = fetch_catalog_page(url).await?;
    let text = strip_tags(&html);

    tokio::fs::write(out, text.as_bytes()).await?;

    info!("Saved {} characters of text to {}", text.chars().count(), out.display());

    Ok(())
}
