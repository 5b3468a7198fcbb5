//! Background loading of data series with last-selection-wins semantics.
//!
//! Every request is tagged with a generation number. Fetches are never
//! cancelled; a result whose generation is no longer current is simply
//! dropped when it arrives.

use crate::data::DataSeries;
use crate::domain::traits::DataSource;
use async_channel::{Receiver, Sender};
use std::sync::Arc;

/// Completion message of one fetch-and-parse.
#[derive(Debug, Clone)]
pub struct DataLoaded {
    pub generation: u64,
    pub url: String,
    pub result: Result<DataSeries, String>,
}

pub struct DataLoader {
    source: Arc<dyn DataSource>,
    offset_secs: f64,
    generation: u64,
    tx: Sender<DataLoaded>,
    rx: Receiver<DataLoaded>,
}

impl DataLoader {
    pub fn new(source: Arc<dyn DataSource>, offset_secs: f64) -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self {
            source,
            offset_secs,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Supersede any outstanding request without starting a new fetch.
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Start fetching `url` on a worker thread. The result arrives on
    /// [`receiver`](Self::receiver).
    pub fn request(&mut self, url: &str) -> u64 {
        let generation = self.invalidate();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let url = url.to_string();
        let offset = self.offset_secs;

        tracing::info!(%url, generation, "loading data series");
        std::thread::spawn(move || {
            let loaded = fetch_and_parse(source.as_ref(), &url, offset, generation);
            // The session may be gone by now; nothing to deliver to.
            let _ = tx.send_blocking(loaded);
        });
        generation
    }

    /// Fetch `url` on the calling thread.
    pub fn load_now(&mut self, url: &str) -> DataLoaded {
        let generation = self.invalidate();
        fetch_and_parse(self.source.as_ref(), url, self.offset_secs, generation)
    }

    pub fn receiver(&self) -> Receiver<DataLoaded> {
        self.rx.clone()
    }

    pub fn try_recv(&self) -> Option<DataLoaded> {
        self.rx.try_recv().ok()
    }
}

fn fetch_and_parse(source: &dyn DataSource, url: &str, offset_secs: f64, generation: u64) -> DataLoaded {
    let result = source
        .fetch_text(url)
        .map(|text| DataSeries::parse(&text, offset_secs))
        .map_err(|e| format!("{:#}", e));
    DataLoaded {
        generation,
        url: url.to_string(),
        result,
    }
}
