//! Article fetching and text extraction.
//!
//! Extraction is a strategy behind [`ContentExtractor`] so other publishers' markup can be
//! supported without touching the request pipeline.

use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use once_cell::sync::Lazy;
use crate::error::{AppError, Result};

const USER_AGENT: &str = concat!("article-summarizer/", env!("CARGO_PKG_VERSION"));

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

// CBC News markup
static CBC_STORY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".story").expect("Failed to parse story selector")
});

static CBC_NOISE: Lazy<Vec<Selector>> = Lazy::new(|| {
    [".similarLinks", ".image-caption", ".mediaEmbed"]
        .iter()
        .map(|s| Selector::parse(s).expect("Failed to parse noise selector"))
        .collect()
});

pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::FetchError(format!("{} responded with {}", url, status)));
    }
    let html = response.text().await?;
    Ok(html)
}

/// Turns a fetched page into the plain text handed to the summarizer.
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<String>;
}

/// Removes every element matching a noise selector, then reads the text of the first
/// element matching the container selector.
#[derive(Clone, Debug)]
pub struct SelectorExtractor {
    container: Selector,
    noise: Vec<Selector>,
}

impl SelectorExtractor {
    pub fn new(container: &str, noise: &[&str]) -> Result<Self> {
        let parse = |s: &str| {
            Selector::parse(s).map_err(|e| AppError::ConfigError(format!("Invalid selector {:?}: {:?}", s, e)))
        };
        Ok(Self {
            container: parse(container)?,
            noise: noise.iter().map(|s| parse(*s)).collect::<Result<_>>()?,
        })
    }

    /// Markup used by cbc.ca news articles.
    pub fn cbc() -> Self {
        Self {
            container: CBC_STORY.clone(),
            noise: CBC_NOISE.clone(),
        }
    }
}

impl ContentExtractor for SelectorExtractor {
    fn extract(&self, html: &str) -> Result<String> {
        let mut document = Html::parse_document(html);

        for selector in &self.noise {
            let ids: Vec<_> = document.select(selector).map(|element| element.id()).collect();
            for id in ids {
                if let Some(mut node) = document.tree.get_mut(id) {
                    node.detach();
                }
            }
        }

        // Detached subtrees are still walked by select, so only accept matches under the root.
        let root = document.tree.root().id();
        let container = document
            .select(&self.container)
            .find(|element| element.ancestors().any(|node| node.id() == root))
            .ok_or_else(|| AppError::UnsupportedPage("article container not found in page".to_string()))?;

        let text = tidy_text(&container.text().collect::<String>());
        if text.is_empty() {
            return Err(AppError::ExtractionError("article container has no text".to_string()));
        }

        Ok(text)
    }
}

/// Trims every line and drops blank ones.
pub fn tidy_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());

    for line in raw.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(trimmed);
        }
    }

    result
}
