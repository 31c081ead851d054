use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::client::TranscriptionClient;
use crate::config::TranscribeOptions;
use crate::error::TranscribeError;
use crate::TranscriptionOutcome;

/// One unit of batch work: a media path plus its probed duration
/// (0.0 when the probe failed upstream — the file still transcribes).
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub path: PathBuf,
    pub duration_seconds: f64,
}

/// Transient batch progress, updated under a mutex by whichever job
/// finishes next. Observers receive read-only snapshots.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub current_file: String,
}

pub type ProgressFn = Arc<dyn Fn(&BatchProgress) + Send + Sync>;

/// Fans out independent transcription jobs under an admission gate and
/// collects one outcome per input item, in input order.
pub struct BatchOrchestrator {
    client: Arc<TranscriptionClient>,
    max_concurrent: usize,
}

impl BatchOrchestrator {
    pub fn new(client: Arc<TranscriptionClient>, max_concurrent: usize) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Runs every item to completion. Outcomes land in the slot matching
    /// the item's input index regardless of completion order; one item's
    /// failure (including a panic) never affects its siblings.
    pub async fn run_batch(
        &self,
        items: Vec<BatchItem>,
        options: &TranscribeOptions,
        progress: Option<ProgressFn>,
    ) -> Vec<TranscriptionOutcome> {
        let total = items.len();
        let gate = Arc::new(Semaphore::new(self.max_concurrent));
        let state = Arc::new(Mutex::new(BatchProgress {
            completed: 0,
            total,
            current_file: String::new(),
        }));

        debug!(total, max_concurrent = self.max_concurrent, "Batch started");

        let mut tasks = JoinSet::new();
        let mut index_of_task = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            let gate = Arc::clone(&gate);
            let client = Arc::clone(&self.client);
            let state = Arc::clone(&state);
            let progress = progress.clone();
            let options = options.clone();
            let item = item.clone();

            let handle = tasks.spawn(async move {
                // The gate is never closed while tasks hold clones of it.
                let _permit = gate.acquire().await.expect("admission gate closed");

                let outcome = client
                    .transcribe(&item.path, &options, item.duration_seconds)
                    .await;

                let snapshot = {
                    let mut state = state.lock().await;
                    state.completed += 1;
                    state.current_file = item.path.display().to_string();
                    state.clone()
                };
                if let Some(report) = &progress {
                    report(&snapshot);
                }

                (index, outcome)
            });
            index_of_task.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<TranscriptionOutcome>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, (index, outcome))) => slots[index] = Some(outcome),
                Err(join_error) => {
                    // A panicked item fails alone; its slot still gets an
                    // outcome so the batch stays one-to-one with its input.
                    let Some(&index) = index_of_task.get(&join_error.id()) else {
                        continue;
                    };
                    warn!(index, error = %join_error, "Batch task aborted");
                    let item = &items[index];
                    slots[index] = Some(TranscriptionOutcome::failed(
                        item.path.clone(),
                        item.duration_seconds,
                        options,
                        TranscribeError::Unknown(format!("transcription task failed: {join_error}")),
                    ));
                }
            }
        }

        debug!(total, "Batch finished");

        slots
            .into_iter()
            .map(|slot| slot.expect("every batch slot is filled on join"))
            .collect()
    }
}
