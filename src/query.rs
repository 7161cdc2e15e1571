use crate::{
    config::Config,
    engine::{AnalysisService, ImagePayload},
    error::{PaletteError, Result},
    model::ColorRuleResult,
    results::ResultStore,
};
use tracing::{error, info, warn};

/// Query flow for one session: submit an image, keep the latest verdict.
pub struct QuerySession<S: AnalysisService> {
    service: S,
    test_id: String,
    max_image_bytes: u64,
    store: ResultStore,
}

impl<S: AnalysisService> QuerySession<S> {
    pub fn new(cfg: &Config, service: S) -> Self {
        Self {
            service,
            test_id: cfg.service.test_id.clone(),
            max_image_bytes: cfg.limits.max_image_bytes,
            store: ResultStore::new(),
        }
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&str, &ColorRuleResult) + 'static,
    {
        self.store.subscribe(observer);
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn current(&self) -> Option<&ColorRuleResult> {
        self.store.get(&self.test_id)
    }

    /// Sends the image to the analysis service and records the verdict.
    ///
    /// On any failure the previously stored result is left untouched. The
    /// call holds `&mut self` until the service answers, so a session never
    /// has more than one request in flight.
    pub fn submit(&mut self, image: Option<ImagePayload>) -> Result<ColorRuleResult> {
        let Some(payload) = image.filter(|p| !p.is_empty()) else {
            error!("no image file found in the submission");
            return Err(PaletteError::MissingInput);
        };

        let size = payload.bytes.len() as u64;
        if size > self.max_image_bytes {
            error!("image {} too large: {size} > {}", payload.file_name, self.max_image_bytes);
            return Err(PaletteError::ImageTooLarge {
                size,
                max: self.max_image_bytes,
            });
        }

        info!("submitting {} ({size} bytes) to test {}", payload.file_name, self.test_id);
        match self.service.analyze(&self.test_id, &payload) {
            Ok(result) => {
                if !result.is_consistent() {
                    warn!(
                        "rule_followed={} disagrees with details {:?}; keeping service verdict",
                        result.rule_followed, result.details
                    );
                }
                info!("test {} rule_followed={}", self.test_id, result.rule_followed);
                self.store.set(&self.test_id, result);
                Ok(result)
            }
            Err(err) => {
                error!("error uploading image {}: {err}", payload.file_name);
                Err(err)
            }
        }
    }
}
