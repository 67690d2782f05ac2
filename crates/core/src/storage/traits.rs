//! Pluggable persistence trait.
//!
//! Backends only deal in strings; the engine maps its structured keys and
//! JSON values onto them. A single `set` or `delete` is the unit of
//! durability and is assumed atomic.

use std::future::Future;
use std::pin::Pin;

use crate::models::Result;

pub trait KeyValueStore: Send + Sync {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;

    /// Resolves once the value is durable.
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Deleting a missing key is not an error.
    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// All keys starting with `prefix`, sorted.
    fn list_keys<'a>(
        &'a self,
        prefix: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;
}
