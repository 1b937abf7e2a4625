//! Replaces a remote image: retire the old asset, upload the new one.
//!
//! One orchestrator owns one asset slot (e.g. an activity's cover image).
//! At most one replacement runs per slot; a second request while one is in
//! flight is rejected with `Busy`.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tripnav_core::asset::{AssetRef, ImagePayload, storage_id_from_url};
use tripnav_core::config::AppConfig;
use tripnav_core::error::{Result, TripError};
use tripnav_core::services::AssetService;

/// Phase of the replacement state machine.
///
/// `Done` and `Failed` are terminal for one run; the orchestrator returns to
/// `Idle` before `replace` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementPhase {
    Idle,
    Deleting,
    Uploading,
    Done,
    Failed,
}

pub struct AssetReplacementOrchestrator {
    assets: Arc<dyn AssetService>,
    upload_marker: String,
    delete_timeout: Duration,
    upload_timeout: Duration,
    phase: Arc<watch::Sender<ReplacementPhase>>,
    asset: RwLock<AssetRef>,
    /// Local bytes of the image being uploaded, shown while in flight.
    preview: Arc<RwLock<Option<Vec<u8>>>>,
}

impl AssetReplacementOrchestrator {
    pub fn new(assets: Arc<dyn AssetService>, current: AssetRef) -> Self {
        Self::with_config(assets, current, &AppConfig::default())
    }

    pub fn with_config(
        assets: Arc<dyn AssetService>,
        current: AssetRef,
        config: &AppConfig,
    ) -> Self {
        let (phase, _) = watch::channel(ReplacementPhase::Idle);
        Self {
            assets,
            upload_marker: config.assets.upload_marker.clone(),
            delete_timeout: config.network.delete_timeout(),
            upload_timeout: config.network.upload_timeout(),
            phase: Arc::new(phase),
            asset: RwLock::new(current),
            preview: Arc::new(RwLock::new(None)),
        }
    }

    pub fn phase(&self) -> ReplacementPhase {
        *self.phase.borrow()
    }

    /// Receiver notified on every phase change.
    pub fn subscribe(&self) -> watch::Receiver<ReplacementPhase> {
        self.phase.subscribe()
    }

    /// Last stable asset reference.
    pub fn asset(&self) -> AssetRef {
        self.asset.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Bytes to display: the in-flight image if any, else the stable one.
    pub fn preview(&self) -> Option<Vec<u8>> {
        let pending = self.preview.read().unwrap_or_else(PoisonError::into_inner).clone();
        pending.or_else(|| self.asset().local_binary)
    }

    /// Deletes the previous remote asset (best effort) and uploads `image`.
    ///
    /// The delete, when there is a previous asset, is always issued before
    /// the upload starts. Its failure is logged and does not stop the upload.
    ///
    /// # Errors
    ///
    /// - `Busy` if a replacement is already in flight; that run is unaffected
    /// - `AssetUpload` if the upload fails or times out; the previous asset
    ///   reference is kept
    pub async fn replace(&self, image: ImagePayload) -> Result<AssetRef> {
        // The previous reference is read while claiming the slot. A finished
        // run stores its asset before returning to `Idle`, so the snapshot is
        // always the latest stable reference.
        let mut claim = Err(ReplacementPhase::Idle);
        self.phase.send_if_modified(|phase| {
            if *phase != ReplacementPhase::Idle {
                claim = Err(*phase);
                return false;
            }
            let previous_url = self.asset().remote_url;
            *phase = if previous_url.is_some() {
                ReplacementPhase::Deleting
            } else {
                ReplacementPhase::Uploading
            };
            claim = Ok(previous_url);
            true
        });
        let previous_url = match claim {
            Ok(previous_url) => previous_url,
            Err(phase) => {
                tracing::info!("[AssetReplacement] Rejecting request while {:?}", phase);
                return Err(TripError::busy("asset replacement"));
            }
        };

        let _guard = InFlightGuard {
            phase: self.phase.clone(),
            preview: self.preview.clone(),
        };
        *self.preview.write().unwrap_or_else(PoisonError::into_inner) = Some(image.bytes.clone());

        if let Some(url) = previous_url {
            self.delete_previous(&url).await;
            self.phase.send_replace(ReplacementPhase::Uploading);
        }

        let upload = self.assets.upload(image);
        let uploaded = match tokio::time::timeout(self.upload_timeout, upload).await {
            Ok(result) => result,
            Err(_) => Err(TripError::timeout("upload", self.upload_timeout.as_secs())),
        };

        match uploaded {
            Ok(uploaded) => {
                let updated = AssetRef {
                    remote_url: Some(uploaded.url),
                    local_binary: Some(uploaded.bytes),
                };
                *self.asset.write().unwrap_or_else(PoisonError::into_inner) = updated.clone();
                self.phase.send_replace(ReplacementPhase::Done);
                tracing::info!(
                    "[AssetReplacement] Uploaded replacement as '{}'",
                    uploaded.storage_id
                );
                Ok(updated)
            }
            Err(e) => {
                self.phase.send_replace(ReplacementPhase::Failed);
                tracing::error!("[AssetReplacement] Upload failed: {}", e);
                Err(TripError::AssetUpload(e.to_string()))
            }
        }
    }

    async fn delete_previous(&self, url: &str) {
        let Some(storage_id) = storage_id_from_url(url, &self.upload_marker) else {
            tracing::warn!(
                "[AssetReplacement] No storage id in previous url, skipping delete: {}",
                url
            );
            return;
        };

        let delete = self.assets.delete(&storage_id);
        let result = match tokio::time::timeout(self.delete_timeout, delete).await {
            Ok(result) => result,
            Err(_) => Err(TripError::timeout("delete", self.delete_timeout.as_secs())),
        };

        match result {
            Ok(()) => {
                tracing::debug!("[AssetReplacement] Deleted previous asset '{}'", storage_id)
            }
            Err(e) => {
                let failure = TripError::AssetDelete {
                    storage_id,
                    message: e.to_string(),
                };
                tracing::warn!("[AssetReplacement] {} (continuing with upload)", failure);
            }
        }
    }
}

/// Returns the slot to `Idle` when a run ends, including when the `replace`
/// future is dropped mid-flight.
struct InFlightGuard {
    phase: Arc<watch::Sender<ReplacementPhase>>,
    preview: Arc<RwLock<Option<Vec<u8>>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        *self.preview.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.phase.send_replace(ReplacementPhase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use tripnav_core::asset::UploadedAsset;

    const OLD_URL: &str = "https://cdn.example.com/demo/image/upload/v17/trips/old-cover.jpg";
    const NEW_URL: &str = "https://cdn.example.com/demo/image/upload/v18/trips/new-cover.jpg";

    #[derive(Default)]
    struct MockAssetService {
        calls: Mutex<Vec<String>>,
        fail_delete: bool,
        fail_upload: bool,
        upload_gate: Option<Arc<Notify>>,
    }

    impl MockAssetService {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AssetService for MockAssetService {
        async fn upload(&self, image: ImagePayload) -> Result<UploadedAsset> {
            self.calls.lock().unwrap().push(format!("upload:{}", image.bytes.len()));
            if let Some(gate) = &self.upload_gate {
                gate.notified().await;
            }
            if self.fail_upload {
                return Err(TripError::internal("502 Bad Gateway"));
            }
            Ok(UploadedAsset {
                url: NEW_URL.to_string(),
                storage_id: "trips/new-cover".to_string(),
                bytes: image.bytes,
            })
        }

        async fn delete(&self, storage_id: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("delete:{}", storage_id));
            if self.fail_delete {
                Err(TripError::internal("404 Not Found"))
            } else {
                Ok(())
            }
        }
    }

    fn image() -> ImagePayload {
        ImagePayload::jpeg(vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_no_previous_reference_skips_delete() {
        let service = Arc::new(MockAssetService::default());
        let orchestrator = AssetReplacementOrchestrator::new(service.clone(), AssetRef::empty());

        let asset = orchestrator.replace(image()).await.unwrap();

        assert_eq!(service.calls(), vec!["upload:3"]);
        assert!(asset.remote_url.unwrap().ends_with("new-cover.jpg"));
        assert_eq!(asset.local_binary, Some(vec![1, 2, 3]));
        assert_eq!(orchestrator.phase(), ReplacementPhase::Idle);
    }

    #[tokio::test]
    async fn test_delete_runs_before_upload() {
        let service = Arc::new(MockAssetService::default());
        let orchestrator =
            AssetReplacementOrchestrator::new(service.clone(), AssetRef::remote(OLD_URL));

        orchestrator.replace(image()).await.unwrap();

        assert_eq!(service.calls(), vec!["delete:trips/old-cover", "upload:3"]);
        assert!(orchestrator.asset().remote_url.unwrap().ends_with("new-cover.jpg"));
    }

    #[tokio::test]
    async fn test_next_replacement_retires_latest_asset() {
        let service = Arc::new(MockAssetService::default());
        let orchestrator =
            AssetReplacementOrchestrator::new(service.clone(), AssetRef::remote(OLD_URL));

        orchestrator.replace(image()).await.unwrap();
        orchestrator.replace(ImagePayload::jpeg(vec![4, 5])).await.unwrap();

        assert_eq!(
            service.calls(),
            vec![
                "delete:trips/old-cover",
                "upload:3",
                "delete:trips/new-cover",
                "upload:2"
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_failure_does_not_block_upload() {
        let service = Arc::new(MockAssetService {
            fail_delete: true,
            ..MockAssetService::default()
        });
        let orchestrator =
            AssetReplacementOrchestrator::new(service.clone(), AssetRef::remote(OLD_URL));

        let asset = orchestrator.replace(image()).await.unwrap();

        assert_eq!(service.calls(), vec!["delete:trips/old-cover", "upload:3"]);
        assert!(asset.remote_url.unwrap().ends_with("new-cover.jpg"));
    }

    #[tokio::test]
    async fn test_underivable_storage_id_skips_delete() {
        let service = Arc::new(MockAssetService::default());
        let orchestrator = AssetReplacementOrchestrator::new(
            service.clone(),
            AssetRef::remote("https://elsewhere.example.com/pic.png"),
        );

        orchestrator.replace(image()).await.unwrap();
        assert_eq!(service.calls(), vec!["upload:3"]);
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_previous_reference() {
        let service = Arc::new(MockAssetService {
            fail_upload: true,
            ..MockAssetService::default()
        });
        let previous = AssetRef {
            remote_url: Some(OLD_URL.to_string()),
            local_binary: Some(vec![9]),
        };
        let orchestrator = AssetReplacementOrchestrator::new(service.clone(), previous.clone());

        let err = orchestrator.replace(image()).await.unwrap_err();

        assert!(matches!(err, TripError::AssetUpload(_)));
        assert!(err.user_message().is_some());
        assert_eq!(orchestrator.asset(), previous);
        assert_eq!(orchestrator.preview(), Some(vec![9]));
        assert_eq!(orchestrator.phase(), ReplacementPhase::Idle);
    }

    #[tokio::test]
    async fn test_second_request_while_in_flight_is_busy() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(MockAssetService {
            upload_gate: Some(gate.clone()),
            ..MockAssetService::default()
        });
        let orchestrator = Arc::new(AssetReplacementOrchestrator::new(
            service.clone(),
            AssetRef::remote(OLD_URL),
        ));

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.replace(image()).await })
        };
        let mut phase = orchestrator.subscribe();
        phase
            .wait_for(|p| *p == ReplacementPhase::Uploading)
            .await
            .unwrap();
        assert_eq!(orchestrator.preview(), Some(vec![1, 2, 3]));
        assert_eq!(orchestrator.asset().remote_url.as_deref(), Some(OLD_URL));

        let err = orchestrator
            .replace(ImagePayload::jpeg(vec![7; 10]))
            .await
            .unwrap_err();
        assert!(err.is_busy());

        gate.notify_one();
        let asset = first.await.unwrap().unwrap();
        assert!(asset.remote_url.unwrap().ends_with("new-cover.jpg"));
        assert_eq!(service.calls(), vec!["delete:trips/old-cover", "upload:3"]);
        assert_eq!(orchestrator.phase(), ReplacementPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_timeout_is_failure() {
        let service = Arc::new(MockAssetService {
            upload_gate: Some(Arc::new(Notify::new())),
            ..MockAssetService::default()
        });
        let orchestrator = AssetReplacementOrchestrator::new(service, AssetRef::empty());

        let err = orchestrator.replace(image()).await.unwrap_err();
        assert!(matches!(err, TripError::AssetUpload(_)));
        assert_eq!(orchestrator.phase(), ReplacementPhase::Idle);
        assert!(orchestrator.asset().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_replacement_returns_to_idle() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(MockAssetService {
            upload_gate: Some(gate),
            ..MockAssetService::default()
        });
        let orchestrator = Arc::new(AssetReplacementOrchestrator::new(service, AssetRef::empty()));

        let run = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.replace(image()).await })
        };
        let mut phase = orchestrator.subscribe();
        phase
            .wait_for(|p| *p == ReplacementPhase::Uploading)
            .await
            .unwrap();

        run.abort();
        let _ = run.await;
        assert_eq!(orchestrator.phase(), ReplacementPhase::Idle);
        assert_eq!(orchestrator.preview(), None);
    }
}
