use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::{
    client::EncodeService,
    error::{FormError, SubmitError},
    form::{Completion, EncodeForm, FormEvent},
};

/// Owned copy of the banner text, for callers that cannot hold the form lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerSnapshot {
    pub rotor: Option<String>,
    pub plugboard: Option<String>,
}

/// Async submission flow around an [`EncodeForm`]. The form lock is released while a request
/// is in flight, so input events keep being handled.
pub struct FormSession<S: EncodeService> {
    form: Mutex<EncodeForm>,
    service: S,
}

impl<S: EncodeService> FormSession<S> {
    pub fn new(form: EncodeForm, service: S) -> Self {
        Self {
            form: Mutex::new(form),
            service,
        }
    }

    pub async fn handle(&self, event: FormEvent) -> Result<(), FormError> {
        self.form.lock().await.handle(event)
    }

    pub async fn banners(&self) -> BannerSnapshot {
        let form = self.form.lock().await;
        let banners = form.banners();
        BannerSnapshot {
            rotor: banners.rotor.map(str::to_string),
            plugboard: banners.plugboard.map(str::to_string),
        }
    }

    pub async fn ciphertext(&self) -> String {
        self.form.lock().await.ciphertext().to_string()
    }

    /// Submits once. Exactly one request is sent when the gate lets the form through; none
    /// otherwise. No retry on failure.
    pub async fn submit(&self) -> Result<String, SubmitError> {
        let submission = self.form.lock().await.submit()?;
        let generation = submission.generation;

        let outcome = self.service.encode(&submission.payload).await;

        let mut form = self.form.lock().await;
        match form.complete(generation, outcome) {
            Completion::Applied => Ok(form.ciphertext().to_string()),
            Completion::Stale(Some(err)) => {
                error!(generation, error = %err, "superseded encode request failed");
                Err(err.into())
            }
            Completion::Stale(None) => {
                warn!(generation, "encode response superseded by a newer submission");
                Err(SubmitError::Superseded { generation })
            }
            Completion::Failed(err) => {
                error!(generation, error = %err, "encode request failed");
                Err(err.into())
            }
        }
    }
}
