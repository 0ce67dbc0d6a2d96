pub mod config;
pub mod error;
pub mod http;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod poem;
pub mod text;

pub use config::ScrapeConfig;
pub use error::{AcquireError, Result};
pub use http::{HttpFetcher, PageSource};
pub use pipeline::{acquire, Pipeline};
