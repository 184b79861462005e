use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{Recognition, RecognitionAdapter, RecognitionError};

type RecognizerInit =
    Arc<dyn Fn() -> Result<Arc<dyn RecognitionAdapter>, RecognitionError> + Send + Sync>;

/// Builds a heavy recognizer on first use. Concurrent first callers share one
/// construction; a failed construction is retried by the next caller.
pub struct LazyRecognizer {
    name: String,
    init: RecognizerInit,
    cell: OnceCell<Arc<dyn RecognitionAdapter>>,
}

impl LazyRecognizer {
    pub fn new<F>(name: impl Into<String>, init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn RecognitionAdapter>, RecognitionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            init: Arc::new(init),
            cell: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    async fn get(&self) -> Result<&Arc<dyn RecognitionAdapter>, RecognitionError> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!(recognizer = %self.name, "Initializing recognizer on first use");
                let init = Arc::clone(&self.init);
                tokio::task::spawn_blocking(move || init())
                    .await
                    .map_err(|e| RecognitionError::ModelLoadFailed(format!("init task: {e}")))?
            })
            .await
    }
}

#[async_trait]
impl RecognitionAdapter for LazyRecognizer {
    async fn transcribe(&self, media_path: &Path) -> Result<Recognition, RecognitionError> {
        self.get().await?.transcribe(media_path).await
    }
}
