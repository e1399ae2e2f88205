// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote store abstraction and its HTTP implementation.
//!
//! Provides a trait-based remote layer that enables:
//! - A REST client for production ([`HttpRemote`])
//! - In-memory remotes for unit testing
//!
//! Wire contract (JSON bodies):
//!
//! ```text
//! POST   /tags        PATCH /tags/:id     DELETE /tags/:id     GET /tags
//! POST   /todos       PATCH /todos/:id    DELETE /todos/:id    GET /todos
//! GET    /health
//! ```

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;

use tock_core::{Entity, EntityKind, Fields, Storage};

use crate::config::SyncConfig;
use crate::error::{RemoteError, RemoteResult};

/// The authoritative store: the storage contract plus replay and liveness.
pub trait RemoteStore: Storage<Error = RemoteError> {
    /// Create an entity that already carries a locally assigned id.
    fn create_full<'a>(
        &'a self,
        kind: EntityKind,
        entity: &'a Entity,
    ) -> BoxFuture<'a, RemoteResult<Entity>>;

    /// Bounded liveness probe. Never fails: any error reads as unreachable.
    fn health_check(&self) -> BoxFuture<'_, bool>;
}

/// REST client for the remote store.
pub struct HttpRemote {
    client: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl HttpRemote {
    /// Create a client for the server named in `config`.
    pub fn new(config: &SyncConfig) -> RemoteResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(HttpRemote {
            client,
            base_url,
            health_timeout: config.health_timeout,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and turn non-2xx answers into [`RemoteError::Http`].
    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn post_entity(&self, kind: EntityKind, body: &Value) -> RemoteResult<Option<Entity>> {
        let url = self.endpoint(&[kind.collection()])?;
        let response = self.send(self.client.post(url).json(body)).await?;
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(None);
        }
        let value: Value =
            serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))?;
        Entity::from_value(value)
            .map(Some)
            .map_err(|e| RemoteError::InvalidEntity(e.to_string()))
    }
}

impl Storage for HttpRemote {
    type Error = RemoteError;

    fn create(&self, kind: EntityKind, input: Fields) -> BoxFuture<'_, RemoteResult<Entity>> {
        Box::pin(async move {
            self.post_entity(kind, &Value::Object(input))
                .await?
                .ok_or_else(|| RemoteError::Decode(format!("empty response creating {kind}")))
        })
    }

    fn update<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            let url = self.endpoint(&[kind.collection(), id])?;
            self.send(self.client.patch(url).json(&changes)).await?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, kind: EntityKind, id: &'a str) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            let url = self.endpoint(&[kind.collection(), id])?;
            self.send(self.client.delete(url)).await?;
            Ok(())
        })
    }

    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, RemoteResult<Vec<Entity>>> {
        Box::pin(async move {
            let url = self.endpoint(&[kind.collection()])?;
            let response = self.send(self.client.get(url)).await?;
            let values: Vec<Value> = response
                .json()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()))?;

            values
                .into_iter()
                .map(|value| {
                    Entity::from_value(value)
                        .map_err(|e| RemoteError::InvalidEntity(format!("{kind}: {e}")))
                })
                .collect()
        })
    }
}

impl RemoteStore for HttpRemote {
    fn create_full<'a>(
        &'a self,
        kind: EntityKind,
        entity: &'a Entity,
    ) -> BoxFuture<'a, RemoteResult<Entity>> {
        Box::pin(async move {
            let body = Value::Object(entity.fields().clone());
            let created = self.post_entity(kind, &body).await?;
            Ok(created.unwrap_or_else(|| entity.clone()))
        })
    }

    fn health_check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            let url = match self.endpoint(&["health"]) {
                Ok(url) => url,
                Err(_) => return false,
            };

            let probe = self.client.get(url).timeout(self.health_timeout).send();
            match tokio::time::timeout(self.health_timeout, probe).await {
                Ok(Ok(response)) => response.status().is_success(),
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "health check failed");
                    false
                }
                Err(_) => {
                    tracing::debug!("health check timed out");
                    false
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
