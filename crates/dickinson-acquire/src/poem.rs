use crate::error::Result;
use crate::http::PageSource;
use crate::text;
use scraper::{Html, Selector};

const POEM_SELECTOR: &str = ".poem";

/// Fetch a detail page and pull out its poem text.
///
/// Returns `Ok(None)` when the page loads but has no poem container.
/// Fetch failures are returned as errors.
pub async fn extract_text<S: PageSource>(source: &S, url: &str) -> Result<Option<String>> {
    tracing::info!(url = %url, "Parsing");
    let html = source.fetch(url).await?;

    let poem = parse_poem(&html);
    match &poem {
        Some(text) => tracing::debug!(url = %url, lines = text.lines().count(), "Extracted poem"),
        None => tracing::warn!(url = %url, "No poem in {url}"),
    }

    Ok(poem)
}

/// Text of the first poem container on the page, if any.
pub fn parse_poem(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let poem_sel = Selector::parse(POEM_SELECTOR).expect("valid selector");

    document.select(&poem_sel).next().map(text::inner_text)
}
