// Fetcher trait - One cancellation-aware retrieval for one data source
use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::domain::outcome::{FetchError, WidgetPayload};

pub type FetchResult = Result<WidgetPayload, FetchError>;

/// Performs one retrieval-and-parse cycle for one source.
///
/// Implementations never panic out of `fetch`: every failure path (network
/// error, bad status, malformed payload, missing credential) comes back as
/// a `FetchError`. Auxiliary lookups (e.g. geolocation before weather)
/// compose with `?` so the first failing step short-circuits the whole
/// fetch.
///
/// Cancellation is cooperative: implementations wrap network awaits in
/// [`cancelable`] and return `FetchError::Canceled` promptly once the token
/// fires, without mutating any shared state.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, cancel: &CancellationToken) -> FetchResult;
}

/// Race one fallible step against the cancellation token.
pub async fn cancelable<T, F>(cancel: &CancellationToken, step: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>> + Send,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Canceled),
        result = step => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancelable_passes_through_completed_step() {
        let cancel = CancellationToken::new();
        let result = cancelable(&cancel, async { Ok::<_, FetchError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_cancelable_returns_canceled_without_finishing_step() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = cancelable(&cancel, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, FetchError>(7)
        })
        .await;
        assert_eq!(result, Err(FetchError::Canceled));
    }
}
