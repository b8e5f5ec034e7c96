// HTTP plumbing shared by the concrete fetchers
use serde::de::DeserializeOwned;

use crate::domain::outcome::FetchError;

/// GET a URL and decode the JSON body into `T`.
///
/// Maps every failure into the fetch error taxonomy: connection problems
/// become `Transport`, non-2xx responses become `HttpStatus`, and decode
/// problems (including required fields absent from the body) become
/// `MalformedPayload`.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::MalformedPayload(e.to_string()))
}
