pub mod api;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod summarizer;

use std::sync::Arc;

use config::Config;
use summarizer::Summarizer;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let summarizer = Summarizer::new(&config);
        Self {
            config: Arc::new(config),
            summarizer: Arc::new(summarizer),
        }
    }
}
