// Background model-list requests. Only the latest request's result is kept.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::OpenAiSettings;
use crate::event::FetchEvent;
use crate::llm::{ModelFetcher, ModelsState};

pub struct ModelsLoader {
    fetcher: ModelFetcher,
    generation: u64,
    task: Option<JoinHandle<()>>,
    event_tx: mpsc::UnboundedSender<FetchEvent>,
    event_rx: mpsc::UnboundedReceiver<FetchEvent>,
}

impl ModelsLoader {
    pub fn new(fetcher: ModelFetcher) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            generation: 0,
            task: None,
            event_tx,
            event_rx,
        }
    }

    /// Start fetching for `settings`, superseding any request in flight.
    /// Must be called inside a tokio runtime.
    pub fn request(&mut self, settings: OpenAiSettings) -> ModelsState {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;

        let generation = self.generation;
        let fetcher = self.fetcher.clone();
        let event_tx = self.event_tx.clone();

        tracing::debug!("Model list request #{}", generation);
        self.task = Some(tokio::spawn(async move {
            let result = fetcher.list_model_ids(&settings).await;
            let _ = event_tx.send(FetchEvent { generation, result });
        }));

        ModelsState::Loading
    }

    /// Drain finished requests; returns the new state if the latest one completed
    pub fn poll(&mut self) -> Option<ModelsState> {
        let mut latest = None;
        while let Ok(event) = self.event_rx.try_recv() {
            if event.generation != self.generation {
                tracing::debug!("Dropping stale model list #{}", event.generation);
                continue;
            }
            if let Err(e) = &event.result {
                tracing::warn!("Model list request failed: {}", e);
            }
            self.task = None;
            latest = Some(ModelsState::from(event.result));
        }
        latest
    }
}
