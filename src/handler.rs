use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error, info, warn};

use crate::client::UploadTransport;
use crate::config::{UploaderConfig, ERROR_MESSAGE};
use crate::errors::UploadError;
use crate::models::result_item::ResultItem;
use crate::page::{lock, Page, ResultsContainer, Shared, SubmitEvent, UploadForm};

/// What a single submission did to the results container.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Rendered { generation: u64, rows: usize },
    Failed { generation: u64, error: UploadError },
    /// A newer submission was started before this one finished; the container
    /// was left alone.
    Superseded { generation: u64 },
}

impl SubmissionOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            SubmissionOutcome::Rendered { generation, .. }
            | SubmissionOutcome::Failed { generation, .. }
            | SubmissionOutcome::Superseded { generation } => *generation,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmissionOutcome::Rendered { .. })
    }
}

pub struct SubmissionHandler<T> {
    form: Shared<UploadForm>,
    results: Shared<ResultsContainer>,
    transport: T,
    generation: AtomicU64,
}

impl<T: UploadTransport> SubmissionHandler<T> {
    /// Binds to the page's form and results container. Both must already be
    /// present under the configured ids.
    pub fn attach(
        page: &Page,
        config: &UploaderConfig,
        transport: T,
    ) -> Result<Self, UploadError> {
        let form = page.form(&config.form_id)?;
        let results = page.results(&config.results_id)?;
        info!(
            "Upload handler attached to #{} -> #{}",
            config.form_id, config.results_id
        );

        Ok(Self {
            form,
            results,
            transport,
            generation: AtomicU64::new(0),
        })
    }

    pub fn results(&self) -> Shared<ResultsContainer> {
        self.results.clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn on_submit(&self, event: &mut SubmitEvent) -> SubmissionOutcome {
        // No full-page navigation, whatever happens next
        event.prevent_default();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Submission {} started", generation);

        let result = self.exchange().await;

        // The generation check must happen under the container lock, otherwise a
        // newer submission could render between the check and the write.
        let mut results = lock(&self.results);
        if self.current_generation() != generation {
            drop(results);
            match &result {
                Ok(items) => info!(
                    "Discarding {} result(s) from superseded submission {}",
                    items.len(),
                    generation
                ),
                Err(e) => warn!("Superseded submission {} failed: {}", generation, e),
            }
            return SubmissionOutcome::Superseded { generation };
        }

        match result {
            Ok(items) => {
                results.render_items(&items);
                debug!("Submission {} rendered {} row(s)", generation, items.len());
                SubmissionOutcome::Rendered {
                    generation,
                    rows: items.len(),
                }
            }
            Err(e) => {
                // Details only go to the log, the page gets the generic notice
                error!("Error: {}", e);
                results.show_error(ERROR_MESSAGE);
                SubmissionOutcome::Failed {
                    generation,
                    error: e,
                }
            }
        }
    }

    async fn exchange(&self) -> Result<Vec<ResultItem>, UploadError> {
        // Snapshot the form so the lock is not held while files are read
        let form = lock(&self.form).clone();
        let payload = form.capture().await?;
        let response = self.transport.post(payload).await?;
        response.result_items()
    }
}
