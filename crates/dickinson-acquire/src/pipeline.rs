use crate::config::ScrapeConfig;
use crate::error::{AcquireError, Result};
use crate::http::{HttpFetcher, PageSource};
use crate::{index, output, poem};
use dickinson_model::{CatalogSummary, PoemRecord};
use futures::stream::{self, StreamExt, TryStreamExt};

/// Scrape the whole catalog and write it to `config.output_path`.
///
/// Nothing is written unless every fetch succeeds.
pub async fn acquire(config: &ScrapeConfig) -> Result<CatalogSummary> {
    let pipeline = Pipeline::from_config(config)?;
    let records = pipeline.run().await?;

    output::persist(&records, &config.output_path)?;

    Ok(CatalogSummary::from_records(&records))
}

/// Index-then-details scrape over a single page source.
///
/// The source (and the HTTP client inside it) lives as long as the pipeline
/// and is released when the pipeline is dropped.
pub struct Pipeline<S> {
    source: S,
    index_url: String,
    concurrency: usize,
}

impl Pipeline<HttpFetcher> {
    /// Build a pipeline backed by a fresh HTTP client.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(source: S, config: &ScrapeConfig) -> Self {
        Self {
            source,
            index_url: config.index_url.clone(),
            concurrency: config.effective_concurrency(),
        }
    }

    /// Read the index, then every detail page, returning records in index order.
    ///
    /// Stops at the first fetch error. Pages without a poem container yield
    /// records with no content.
    pub async fn run(&self) -> Result<Vec<PoemRecord>> {
        let entries = index::fetch_index(&self.source, &self.index_url).await?;
        let total = entries.len();

        tracing::info!(
            poems = total,
            concurrency = self.concurrency,
            "Fetching poem pages"
        );

        let source = &self.source;
        stream::iter(entries.into_iter().enumerate())
            .map(|(i, entry)| async move {
                tracing::debug!(index = i + 1, total, title = %entry.title, "Fetching poem");
                let content = poem::extract_text(source, &entry.url).await?;
                Ok::<_, AcquireError>(PoemRecord::new(entry.title, content))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const INDEX: &str = "https://example.org/wiki/List";

    /// Serves fixed pages and remembers the order they were requested in.
    struct StaticPages {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticPages {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl PageSource for StaticPages {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AcquireError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::NOT_FOUND,
                })
        }
    }

    fn config(concurrency: usize) -> ScrapeConfig {
        ScrapeConfig {
            index_url: INDEX.to_string(),
            concurrency,
            ..ScrapeConfig::default()
        }
    }

    fn index_page(rows: &[(&str, &str)]) -> String {
        let rows: String = rows
            .iter()
            .map(|(title, href)| format!(r#"<tr><td><a href="{href}">{title}</a></td></tr>"#))
            .collect();
        format!(r#"<table class="wikitable"><tbody>{rows}</tbody></table>"#)
    }

    #[tokio::test]
    async fn test_records_follow_index_order() {
        let index = index_page(&[("Poem A", "/wiki/A"), ("Poem B", "/wiki/B")]);
        let pages = StaticPages::new(&[
            (INDEX, index.as_str()),
            ("https://example.org/wiki/A", r#"<div class="poem">Line1<br>Line2</div>"#),
            ("https://example.org/wiki/B", "<p>no poem</p>"),
        ]);

        let pipeline = Pipeline::new(pages, &config(1));
        let records = pipeline.run().await.unwrap();

        assert_eq!(
            records,
            vec![
                PoemRecord::new("Poem A", Some("Line1\nLine2".to_string())),
                PoemRecord::new("Poem B", None),
            ]
        );
        assert_eq!(
            pipeline.source.requested(),
            vec![
                INDEX.to_string(),
                "https://example.org/wiki/A".to_string(),
                "https://example.org/wiki/B".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_titles_are_kept() {
        let index = index_page(&[("Same", "/wiki/1"), ("Same", "/wiki/2")]);
        let pages = StaticPages::new(&[
            (INDEX, index.as_str()),
            ("https://example.org/wiki/1", r#"<div class="poem">one</div>"#),
            ("https://example.org/wiki/2", r#"<div class="poem">two</div>"#),
        ]);

        let records = Pipeline::new(pages, &config(1)).run().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content.as_deref(), Some("one"));
        assert_eq!(records[1].content.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_concurrent_run_preserves_order() {
        let titles: Vec<String> = (0..12).map(|i| format!("Poem {i}")).collect();
        let hrefs: Vec<String> = (0..12).map(|i| format!("/wiki/{i}")).collect();
        let rows: Vec<(&str, &str)> = titles
            .iter()
            .zip(&hrefs)
            .map(|(t, h)| (t.as_str(), h.as_str()))
            .collect();
        let index = index_page(&rows);

        let bodies: Vec<(String, String)> = (0..12)
            .map(|i| {
                (
                    format!("https://example.org/wiki/{i}"),
                    format!(r#"<div class="poem">text {i}</div>"#),
                )
            })
            .collect();
        let mut all: Vec<(&str, &str)> = vec![(INDEX, index.as_str())];
        all.extend(bodies.iter().map(|(u, b)| (u.as_str(), b.as_str())));

        let records = Pipeline::new(StaticPages::new(&all), &config(4))
            .run()
            .await
            .unwrap();

        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.title, format!("Poem {i}"));
            assert_eq!(record.content, Some(format!("text {i}")));
        }
        assert_eq!(records.len(), 12);
    }

    #[tokio::test]
    async fn test_empty_index() {
        let pages = StaticPages::new(&[(INDEX, "<html><body></body></html>")]);
        let records = Pipeline::new(pages, &config(1)).run().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_index_failure_propagates() {
        let pages = StaticPages::new(&[]);
        let err = Pipeline::new(pages, &config(1)).run().await.unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_detail_failure_aborts_run() {
        let index = index_page(&[("Poem A", "/wiki/A"), ("Gone", "/wiki/Gone")]);
        let pages = StaticPages::new(&[
            (INDEX, index.as_str()),
            ("https://example.org/wiki/A", r#"<div class="poem">ok</div>"#),
        ]);

        let err = Pipeline::new(pages, &config(1)).run().await.unwrap_err();

        match err {
            AcquireError::Status { url, status } => {
                assert_eq!(url, "https://example.org/wiki/Gone");
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
