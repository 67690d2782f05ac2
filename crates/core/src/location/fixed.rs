//! Position sources that do not talk to hardware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::location::traits::{LocationError, LocationOptions, PositionSource};
use crate::models::ReportedPosition;

/// Answers every request with a preset reading or failure.
///
/// Used by the CLI, where the player types in where they are, and by tests.
#[derive(Debug)]
pub struct FixedPositionSource {
    reply: Mutex<Result<ReportedPosition, LocationError>>,
    requests: AtomicUsize,
}

impl FixedPositionSource {
    pub fn new(reply: Result<ReportedPosition, LocationError>) -> Self {
        Self {
            reply: Mutex::new(reply),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn at(position: ReportedPosition) -> Self {
        Self::new(Ok(position))
    }

    pub fn failing(error: LocationError) -> Self {
        Self::new(Err(error))
    }

    /// Change what later requests return.
    pub fn set_reply(&self, reply: Result<ReportedPosition, LocationError>) {
        match self.reply.lock() {
            Ok(mut guard) => *guard = reply,
            Err(poisoned) => *poisoned.into_inner() = reply,
        }
    }

    /// How many requests have been made so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn current_reply(&self) -> Result<ReportedPosition, LocationError> {
        match self.reply.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PositionSource for FixedPositionSource {
    fn request<'a>(
        &'a self,
        _options: &'a LocationOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ReportedPosition, LocationError>> + Send + 'a>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let reply = self.current_reply();
        Box::pin(async move { reply })
    }
}

/// For hosts without any location capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedPositionSource;

impl PositionSource for UnsupportedPositionSource {
    fn request<'a>(
        &'a self,
        _options: &'a LocationOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ReportedPosition, LocationError>> + Send + 'a>> {
        Box::pin(async { Err(LocationError::Unsupported) })
    }
}
