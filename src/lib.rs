pub mod api;
pub mod config;
pub mod error;
pub mod scraper;
pub mod summarizer;

use std::sync::Arc;
use crate::config::Config;
use crate::scraper::{ContentExtractor, SelectorExtractor};
use crate::summarizer::{CohereSummarizer, Summarizer};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    /// Production wiring: CBC markup and the Cohere summarize endpoint from the config.
    pub fn new(config: Config) -> Self {
        let summarizer = CohereSummarizer::new(config.cohere_api_key.clone(), config.cohere_api_url.clone());
        Self {
            config: Arc::new(config),
            extractor: Arc::new(SelectorExtractor::cbc()),
            summarizer: Arc::new(summarizer),
        }
    }
}
