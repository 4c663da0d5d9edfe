//! HTTP implementation of [`RemoteStore`] speaking the backend game API.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::dto::payload::GamePayload;
use crate::dto::puzzle::PuzzleDto;
use crate::store::{
    RemoteStore,
    storage::{StorageError, StorageResult},
};

/// Convenient result alias returning [`HttpStoreError`] failures.
pub type HttpResult<T> = Result<T, HttpStoreError>;

/// Failures that can occur while talking to the game API.
#[derive(Debug, Error)]
pub enum HttpStoreError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build game API client")]
    ClientBuilder {
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent.
    #[error("failed to send game API request to `{path}`")]
    RequestSend {
        /// Request path.
        path: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The API returned an unexpected status code.
    #[error("unexpected game API response status {status} for `{path}`")]
    RequestStatus {
        /// Request path.
        path: String,
        /// Status returned.
        status: StatusCode,
    },
    /// Response payload could not be parsed.
    #[error("failed to decode game API response for `{path}`")]
    DecodeResponse {
        /// Request path.
        path: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl From<HttpStoreError> for StorageError {
    fn from(err: HttpStoreError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}

/// Runtime configuration describing how to reach the game API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Bearer token of the authenticated user, when present. The auth
    /// protocol that produces it is out of the engine's scope.
    pub bearer_token: Option<String>,
}

impl RemoteConfig {
    /// Construct a configuration from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Attach the authenticated user's bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Body of the like-toggle response.
#[derive(Debug, serde::Deserialize)]
struct LikeResponse {
    liked: bool,
}

/// [`RemoteStore`] backed by the backend HTTP API.
#[derive(Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base_url: Arc<str>,
    bearer_token: Option<Arc<str>>,
}

impl HttpRemoteStore {
    /// Build the API client from its configuration.
    pub fn connect(config: RemoteConfig) -> HttpResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| HttpStoreError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(config.base_url.trim_end_matches('/')),
            bearer_token: config.bearer_token.map(Arc::<str>::from),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        if let Some(ref token) = self.bearer_token {
            builder.bearer_auth(token.as_ref())
        } else {
            builder
        }
    }

    async fn get_json<T>(&self, path: &str) -> HttpResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|source| HttpStoreError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                response.json::<T>().await.map(Some).map_err(|source| {
                    HttpStoreError::DecodeResponse {
                        path: path.to_string(),
                        source,
                    }
                })
            }
            other => Err(HttpStoreError::RequestStatus {
                path: path.to_string(),
                status: other,
            }),
        }
    }

    async fn put_json<B, T>(&self, path: &str, body: Option<&B>) -> HttpResult<T>
    where
        B: ?Sized + Serialize,
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::PUT, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| HttpStoreError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(HttpStoreError::RequestStatus {
                path: path.to_string(),
                status: response.status(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| HttpStoreError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }
}

impl RemoteStore for HttpRemoteStore {
    fn fetch_puzzle(&self, puzzle_id: Uuid) -> BoxFuture<'static, StorageResult<PuzzleDto>> {
        let store = self.clone();
        Box::pin(async move {
            let path = format!("puzzle/{puzzle_id}");
            match store.get_json::<PuzzleDto>(&path).await? {
                Some(puzzle) => Ok(puzzle),
                None => Err(HttpStoreError::RequestStatus {
                    path,
                    status: StatusCode::NOT_FOUND,
                }
                .into()),
            }
        })
    }

    fn fetch_game(
        &self,
        puzzle_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GamePayload>>> {
        let store = self.clone();
        Box::pin(async move {
            let path = format!("game/{puzzle_id}");
            store.get_json::<GamePayload>(&path).await.map_err(Into::into)
        })
    }

    fn save_game(
        &self,
        puzzle_id: Uuid,
        payload: GamePayload,
    ) -> BoxFuture<'static, StorageResult<GamePayload>> {
        let store = self.clone();
        Box::pin(async move {
            let path = format!("game/{puzzle_id}");
            store
                .put_json::<GamePayload, GamePayload>(&path, Some(&payload))
                .await
                .map_err(Into::into)
        })
    }

    fn toggle_like(&self, puzzle_id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let path = format!("puzzle/like/{puzzle_id}");
            let response: LikeResponse = store.put_json::<(), _>(&path, None).await?;
            Ok(response.liked)
        })
    }
}
