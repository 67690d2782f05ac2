//! The platform position source.
//!
//! Hosts implement [`PositionSource`] on top of whatever the platform offers
//! (browser geolocation, Android fused location, a GPS daemon). One call is
//! one reading; there are no partial results.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::models::ReportedPosition;

/// Why a position request failed. Every cause is retryable by the player.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Location permission was denied")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Unknown location error: {0}")]
    Unknown(String),
}

impl LocationError {
    /// Stable machine-readable cause, e.g. `permission_denied`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Text shown to the player.
    pub fn user_message(&self) -> String {
        let hint = match self {
            Self::Unsupported => "Geolocation is not supported on this device.",
            Self::PermissionDenied => "Please allow location access to play.",
            Self::PositionUnavailable => "Location information is unavailable.",
            Self::Timeout => "Location request timed out. Try again.",
            Self::Unknown(_) => "An unknown error occurred.",
        };
        format!("Location access failed. {hint}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    /// Upper bound for one request; enforced by [`request_position`].
    pub timeout: Duration,
    /// How old a cached platform fix may be.
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

pub trait PositionSource: Send + Sync {
    fn request<'a>(
        &'a self,
        options: &'a LocationOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ReportedPosition, LocationError>> + Send + 'a>>;
}

/// Issue one request and give up after `options.timeout`, whether or not the
/// source honours the timeout itself.
pub async fn request_position(
    source: &dyn PositionSource,
    options: &LocationOptions,
) -> Result<ReportedPosition, LocationError> {
    tracing::debug!(
        high_accuracy = options.high_accuracy,
        timeout_ms = options.timeout.as_millis() as u64,
        "requesting position"
    );

    match tokio::time::timeout(options.timeout, source.request(options)).await {
        Ok(Ok(position)) => Ok(position),
        Ok(Err(e)) => {
            tracing::warn!(cause = e.code(), "position request failed");
            Err(e)
        }
        Err(_) => {
            tracing::warn!("position request timed out");
            Err(LocationError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverResolves;

    impl PositionSource for NeverResolves {
        fn request<'a>(
            &'a self,
            _options: &'a LocationOptions,
        ) -> Pin<Box<dyn Future<Output = Result<ReportedPosition, LocationError>> + Send + 'a>>
        {
            Box::pin(std::future::pending::<Result<ReportedPosition, LocationError>>())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_enforced() {
        let options = LocationOptions::default();
        let result = request_position(&NeverResolves, &options).await;
        assert_eq!(result, Err(LocationError::Timeout));
    }

    #[test]
    fn test_codes_and_messages() {
        assert_eq!(LocationError::PermissionDenied.code(), "permission_denied");
        assert_eq!(LocationError::Unknown("boom".into()).code(), "unknown");
        assert_eq!(
            LocationError::Timeout.user_message(),
            "Location access failed. Location request timed out. Try again."
        );
    }

    #[test]
    fn test_default_options() {
        let options = LocationOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }
}
