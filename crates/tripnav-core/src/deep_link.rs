//! Deep link parsing.
//!
//! Turns an externally delivered URI into a typed intent. Only the join-trip
//! link is currently understood:
//!
//! ```text
//! myapp://trip/join?tripId=42
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DeepLinkConfig;
use crate::error::{Result, TripError};
use crate::navigation::TripId;

/// Intent carried by a deep link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum DeepLinkIntent {
    #[serde(rename_all = "camelCase")]
    JoinTrip { trip_id: TripId },
}

impl DeepLinkIntent {
    pub fn trip_id(&self) -> TripId {
        match self {
            DeepLinkIntent::JoinTrip { trip_id } => *trip_id,
        }
    }
}

/// Parser for links matching the configured scheme/host/path.
#[derive(Debug, Clone, Default)]
pub struct DeepLinkParser {
    config: DeepLinkConfig,
}

impl DeepLinkParser {
    pub fn new(config: DeepLinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeepLinkConfig {
        &self.config
    }

    /// Parses `uri` into an intent.
    ///
    /// # Errors
    ///
    /// - `UnsupportedLink` if the URI cannot be parsed or its scheme, host or
    ///   path do not match the join-link shape
    /// - `InvalidParameter` if the trip id parameter is absent, empty or not
    ///   an integer
    pub fn parse(&self, uri: &str) -> Result<DeepLinkIntent> {
        let url = Url::parse(uri.trim()).map_err(|_| TripError::unsupported_link(uri))?;

        if !url.scheme().eq_ignore_ascii_case(&self.config.scheme) {
            return Err(TripError::unsupported_link(uri));
        }

        let host_matches = url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(&self.config.host));
        if !host_matches {
            return Err(TripError::unsupported_link(uri));
        }

        let path = url.path();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        if path != self.config.path {
            return Err(TripError::unsupported_link(uri));
        }

        let param = &self.config.trip_id_param;
        let raw = url
            .query_pairs()
            .find(|(key, _)| key == param.as_str())
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| TripError::invalid_parameter(param.as_str(), "missing"))?;

        let trip_id = raw.trim().parse::<i64>().map_err(|_| {
            TripError::invalid_parameter(param.as_str(), format!("not an integer: '{}'", raw))
        })?;

        Ok(DeepLinkIntent::JoinTrip {
            trip_id: TripId(trip_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DeepLinkParser {
        DeepLinkParser::default()
    }

    #[test]
    fn test_parse_join_link() {
        let intent = parser().parse("myapp://trip/join?tripId=42").unwrap();
        assert_eq!(intent, DeepLinkIntent::JoinTrip { trip_id: TripId(42) });
        assert_eq!(intent.trip_id(), TripId(42));
    }

    #[test]
    fn test_trailing_slash_and_extra_params() {
        let intent = parser()
            .parse("myapp://trip/join/?utm=share&tripId=7")
            .unwrap();
        assert_eq!(intent.trip_id(), TripId(7));
    }

    #[test]
    fn test_missing_trip_id_is_invalid_parameter() {
        let err = parser().parse("myapp://trip/join").unwrap_err();
        assert!(matches!(err, TripError::InvalidParameter { ref name, .. } if name == "tripId"));
    }

    #[test]
    fn test_non_numeric_trip_id_is_invalid_parameter() {
        let err = parser().parse("myapp://trip/join?tripId=abc").unwrap_err();
        assert!(matches!(err, TripError::InvalidParameter { .. }));

        let err = parser().parse("myapp://trip/join?tripId=").unwrap_err();
        assert!(matches!(err, TripError::InvalidParameter { .. }));
    }

    #[test]
    fn test_other_shapes_are_unsupported() {
        for uri in [
            "other://x",
            "myapp://profile/join?tripId=1",
            "myapp://trip/leave?tripId=1",
            "https://trip/join?tripId=1",
            "not a uri",
            "",
        ] {
            let err = parser().parse(uri).unwrap_err();
            assert!(
                matches!(err, TripError::UnsupportedLink { .. }),
                "expected UnsupportedLink for {uri:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_custom_config() {
        let parser = DeepLinkParser::new(DeepLinkConfig {
            scheme: "tripapp".to_string(),
            host: "invite".to_string(),
            path: "/accept".to_string(),
            trip_id_param: "id".to_string(),
        });
        assert_eq!(
            parser.parse("tripapp://invite/accept?id=3").unwrap().trip_id(),
            TripId(3)
        );
        assert!(parser.parse("myapp://trip/join?tripId=3").is_err());
    }
}
