//! The five post operations the view controllers depend on.
//!
//! `PostApi` pairs a `PostClient` with a `Transport`. Every failure is
//! logged before it is returned; nothing is retried.

use std::rc::Rc;
use std::sync::Arc;

use crate::client::PostClient;
use crate::config::Config;
use crate::error::TransportError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Post, PostDraft, PostId, Saved};

pub trait PostAccess {
    fn list(&self) -> Result<Vec<Post>, TransportError>;
    fn get(&self, id: &PostId) -> Result<Post, TransportError>;
    fn create(&self, draft: &PostDraft) -> Result<Saved, TransportError>;
    fn update(&self, id: &PostId, draft: &PostDraft) -> Result<Saved, TransportError>;
    fn remove(&self, id: &PostId) -> Result<PostId, TransportError>;
}

macro_rules! forward_access {
    ($($ptr:ty),*) => {$(
        impl<A: PostAccess + ?Sized> PostAccess for $ptr {
            fn list(&self) -> Result<Vec<Post>, TransportError> {
                (**self).list()
            }
            fn get(&self, id: &PostId) -> Result<Post, TransportError> {
                (**self).get(id)
            }
            fn create(&self, draft: &PostDraft) -> Result<Saved, TransportError> {
                (**self).create(draft)
            }
            fn update(&self, id: &PostId, draft: &PostDraft) -> Result<Saved, TransportError> {
                (**self).update(id, draft)
            }
            fn remove(&self, id: &PostId) -> Result<PostId, TransportError> {
                (**self).remove(id)
            }
        }
    )*};
}

forward_access!(&A, Rc<A>, Arc<A>);

#[derive(Debug, Clone)]
pub struct PostApi<T = UreqTransport> {
    client: PostClient,
    transport: T,
}

impl PostApi<UreqTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(PostClient::new(&config.base_url), UreqTransport::new())
    }
}

impl<T: Transport> PostApi<T> {
    pub fn new(client: PostClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PostClient {
        &self.client
    }
}

/// Logs a failed operation and hands the result back untouched.
fn logged<V>(operation: &'static str, result: Result<V, TransportError>) -> Result<V, TransportError> {
    if let Err(err) = &result {
        tracing::error!(operation, status = err.status(), error = %err, "post request failed");
    }
    result
}

impl<T: Transport> PostAccess for PostApi<T> {
    fn list(&self) -> Result<Vec<Post>, TransportError> {
        let result = self
            .transport
            .execute(self.client.build_list_posts())
            .and_then(|response| self.client.parse_list_posts(response));
        logged("list", result)
    }

    fn get(&self, id: &PostId) -> Result<Post, TransportError> {
        let result = self
            .transport
            .execute(self.client.build_get_post(id))
            .and_then(|response| self.client.parse_get_post(response));
        logged("get", result)
    }

    fn create(&self, draft: &PostDraft) -> Result<Saved, TransportError> {
        let result = self
            .client
            .build_create_post(draft)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_create_post(response));
        logged("create", result)
    }

    fn update(&self, id: &PostId, draft: &PostDraft) -> Result<Saved, TransportError> {
        let result = self
            .client
            .build_update_post(id, draft)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_update_post(response));
        logged("update", result)
    }

    fn remove(&self, id: &PostId) -> Result<PostId, TransportError> {
        let result = self
            .transport
            .execute(self.client.build_delete_post(id))
            .and_then(|response| self.client.parse_delete_post(id, response));
        logged("remove", result)
    }
}
