//! Remote node store contract and HTTP implementation.
//!
//! The engine never touches the transport directly; everything goes through
//! `RemoteNodes`, so tests can substitute an in-memory double.

use crate::error::Error;
use crate::node::{Node, NodeChanges, NodeDraft};
use crate::types::NodeId;
use async_trait::async_trait;
use std::time::Duration;

/// Contract for the remote file/folder storage collaborator.
///
/// Cascading deletion of descendants is the collaborator's responsibility:
/// `delete` is issued exactly once for the target id, and the remote side
/// must remove the target's whole subtree. The local cache mirrors the
/// cascade independently so stale descendants never survive a delete.
#[async_trait]
pub trait RemoteNodes: Send + Sync {
    /// Fetch the full flat node list.
    async fn fetch_all(&self) -> Result<Vec<Node>, Error>;

    /// Fetch a single node by id; `Error::NotFound` if absent.
    async fn fetch(&self, id: &NodeId) -> Result<Node, Error>;

    /// Create a node; the store assigns and returns the id.
    async fn create(&self, draft: &NodeDraft) -> Result<Node, Error>;

    /// Apply a partial update and return the authoritative updated record.
    async fn update(&self, id: &NodeId, changes: &NodeChanges) -> Result<Node, Error>;

    /// Delete a node (and, on the remote side, its descendants).
    async fn delete(&self, id: &NodeId) -> Result<(), Error>;
}

/// `RemoteNodes` over an HTTP JSON API (`/nodes` collection).
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Build a client for `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::from_transport)?;
        Ok(HttpRemote {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/nodes", self.base_url)
    }

    fn node_url(&self, id: &NodeId) -> String {
        format!("{}/nodes/{}", self.base_url, id)
    }

    /// Map a non-success response to a typed error, reading the body as the
    /// message. 404 on an id-addressed request becomes `NotFound`.
    async fn check(
        response: reqwest::Response,
        id: Option<&NodeId>,
    ) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(Error::NotFound(id.clone()));
            }
        }
        let message = response.text().await.unwrap_or_default();
        Err(Error::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RemoteNodes for HttpRemote {
    async fn fetch_all(&self) -> Result<Vec<Node>, Error> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(Error::from_transport)?;
        Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(Error::from_transport)
    }

    async fn fetch(&self, id: &NodeId) -> Result<Node, Error> {
        let response = self
            .client
            .get(self.node_url(id))
            .send()
            .await
            .map_err(Error::from_transport)?;
        Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(Error::from_transport)
    }

    async fn create(&self, draft: &NodeDraft) -> Result<Node, Error> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(Error::from_transport)?;
        Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(Error::from_transport)
    }

    async fn update(&self, id: &NodeId, changes: &NodeChanges) -> Result<Node, Error> {
        let response = self
            .client
            .patch(self.node_url(id))
            .json(changes)
            .send()
            .await
            .map_err(Error::from_transport)?;
        Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(Error::from_transport)
    }

    async fn delete(&self, id: &NodeId) -> Result<(), Error> {
        let response = self
            .client
            .delete(self.node_url(id))
            .send()
            .await
            .map_err(Error::from_transport)?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
