//! Remote asset references.

use serde::{Deserialize, Serialize};
use url::Url;

/// Reference to an image that lives on the asset service.
///
/// While a replacement is in flight the remote URL may still point at the
/// old asset; callers should read the preview from the orchestrator rather
/// than assume both fields describe the same image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub remote_url: Option<String>,
    #[serde(skip)]
    pub local_binary: Option<Vec<u8>>,
}

impl AssetRef {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            remote_url: Some(url.into()),
            local_binary: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remote_url.is_none() && self.local_binary.is_none()
    }
}

/// Encoded image submitted for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl ImagePayload {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "image.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub url: String,
    pub storage_id: String,
    pub bytes: Vec<u8>,
}

/// Derives the storage identifier from a remote asset URL.
///
/// The identifier is the path after the `marker` segment with the file
/// extension removed from the last segment. A leading version segment
/// (`v` followed by digits) is not part of the identifier.
///
/// ```
/// use tripnav_core::asset::storage_id_from_url;
///
/// let url = "https://cdn.example.com/demo/image/upload/v1712/trips/abc123.jpg";
/// assert_eq!(storage_id_from_url(url, "upload").as_deref(), Some("trips/abc123"));
/// ```
pub fn storage_id_from_url(remote_url: &str, marker: &str) -> Option<String> {
    let url = Url::parse(remote_url).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    let marker_index = segments.iter().position(|segment| *segment == marker)?;
    let mut rest = &segments[marker_index + 1..];

    if rest.len() > 1 && is_version_segment(rest[0]) {
        rest = &rest[1..];
    }

    let (last, parents) = rest.split_last()?;
    let stem = match last.rfind('.') {
        Some(0) | None => *last,
        Some(dot) => &last[..dot],
    };
    if stem.is_empty() {
        return None;
    }

    let mut parts: Vec<&str> = parents.to_vec();
    parts.push(stem);
    Some(parts.join("/"))
}

fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_id_simple() {
        assert_eq!(
            storage_id_from_url("https://cdn.example.com/image/upload/abc123.png", "upload"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_storage_id_skips_version_and_keeps_folders() {
        assert_eq!(
            storage_id_from_url(
                "https://cdn.example.com/demo/image/upload/v1712345/trips/7/cover.photo.jpg",
                "upload"
            ),
            Some("trips/7/cover.photo".to_string())
        );
    }

    #[test]
    fn test_storage_id_without_extension() {
        assert_eq!(
            storage_id_from_url("https://cdn.example.com/upload/plain", "upload"),
            Some("plain".to_string())
        );
    }

    #[test]
    fn test_storage_id_requires_marker() {
        assert_eq!(
            storage_id_from_url("https://cdn.example.com/image/abc.png", "upload"),
            None
        );
        assert_eq!(
            storage_id_from_url("https://cdn.example.com/image/upload/", "upload"),
            None
        );
        assert_eq!(storage_id_from_url("not a url", "upload"), None);
    }

    #[test]
    fn test_asset_ref_helpers() {
        assert!(AssetRef::empty().is_empty());
        assert!(!AssetRef::remote("https://x/upload/a.png").is_empty());
    }
}
