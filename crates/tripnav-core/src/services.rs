//! Remote collaborator traits.
//!
//! HTTP transport lives outside this crate; the coordinators only depend on
//! these interfaces so they can be driven by mocks in tests.

use async_trait::async_trait;

use crate::asset::{ImagePayload, UploadedAsset};
use crate::error::Result;
use crate::navigation::TripId;

/// Service that adds the current user to a trip.
#[async_trait]
pub trait ParticipantService: Send + Sync {
    /// Joins the trip identified by `trip_id`.
    async fn join(&self, trip_id: TripId) -> Result<()>;
}

/// Service that stores and retires remote images.
#[async_trait]
pub trait AssetService: Send + Sync {
    /// Uploads a new image and returns its remote location.
    async fn upload(&self, image: ImagePayload) -> Result<UploadedAsset>;

    /// Deletes a previously uploaded image by storage identifier.
    async fn delete(&self, storage_id: &str) -> Result<()>;
}
