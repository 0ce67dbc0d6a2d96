use crate::error::{AcquireError, Result};
use crate::http::PageSource;
use crate::text;
use dickinson_model::IndexEntry;
use scraper::{Html, Selector};
use url::Url;

/// First-column links of every row in the list's data tables.
const ENTRY_SELECTOR: &str = "table.wikitable > tbody > tr > td:first-child > a";

/// Fetch the poem list page and return its entries in document order.
pub async fn fetch_index<S: PageSource>(source: &S, index_url: &str) -> Result<Vec<IndexEntry>> {
    tracing::info!(url = %index_url, "Parsing table...");
    let html = source.fetch(index_url).await?;

    let entries = parse_index(&html, index_url)?;
    tracing::info!(entries = entries.len(), "Parsed poem table");

    Ok(entries)
}

/// Extract (title, link) pairs from the list page HTML.
///
/// Relative links are resolved against `page_url`. Anchors with no `href`
/// are skipped.
pub fn parse_index(html: &str, page_url: &str) -> Result<Vec<IndexEntry>> {
    let base = Url::parse(page_url).map_err(|source| AcquireError::InvalidUrl {
        url: page_url.to_string(),
        source,
    })?;

    let document = Html::parse_document(html);
    let link_sel = Selector::parse(ENTRY_SELECTOR).expect("valid selector");

    let mut entries = Vec::new();
    for link in document.select(&link_sel) {
        let title = text::inner_text(link);

        let Some(href) = link.value().attr("href") else {
            tracing::debug!(title = %title, "Skipping row link without href");
            continue;
        };

        let url = base.join(href).map_err(|source| AcquireError::InvalidUrl {
            url: href.to_string(),
            source,
        })?;

        entries.push(IndexEntry {
            title,
            url: url.to_string(),
        });
    }

    Ok(entries)
}
