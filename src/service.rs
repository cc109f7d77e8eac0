//! Generic CRUD service over a resource type.

use std::fmt;
use std::marker::PhantomData;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::client::ApiClient;
use crate::context::Context;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::traits::{Creatable, Deletable, HealthChecked, Listable, Resource, Updatable};

/// CRUD operations for resource type `R`.
///
/// Which operations exist depends on the capability traits `R` implements:
/// [`get`](Self::get) for every [`Resource`], [`list`](Self::list) for
/// [`Listable`], [`create`](Self::create) for [`Creatable`],
/// [`update`](Self::update) for [`Updatable`] and [`delete`](Self::delete)
/// for [`Deletable`]. Resource-specific operations are added in separate
/// `impl ResourceService<ConcreteType>` blocks next to the model.
///
/// # Example
///
/// ```no_run
/// use intelowl::{Context, IntelOwlClient, TagParams};
///
/// # async fn example(client: IntelOwlClient) -> intelowl::Result<()> {
/// let ctx = Context::background();
/// let tag = client
///     .tags
///     .create(&ctx, &TagParams::new("phishing", "#ff0000"))
///     .await?;
/// assert!(client.tags.delete(&ctx, tag.id).await?);
/// # Ok(())
/// # }
/// ```
pub struct ResourceService<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("collection", &R::COLLECTION)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceService<R> {
    /// Create a service sending requests through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch one resource by id.
    ///
    /// # Errors
    ///
    /// An unknown id is a [`ClientError`](crate::ClientError) with status 404.
    #[tracing::instrument(skip(self, ctx, id), fields(collection = R::COLLECTION, id = %id))]
    pub async fn get(&self, ctx: &Context, id: R::Id) -> Result<R> {
        self.client
            .fetch(ctx, ApiRequest::get(R::item_path(&id)))
            .await
    }
}

impl<R: Listable> ResourceService<R> {
    /// Fetch the whole collection, in server order.
    ///
    /// An empty collection is an empty vector.
    #[tracing::instrument(skip(self, ctx), fields(collection = R::COLLECTION))]
    pub async fn list(&self, ctx: &Context) -> Result<Vec<R>> {
        self.client
            .fetch(ctx, ApiRequest::get(R::COLLECTION))
            .await
    }
}

impl<R: Creatable> ResourceService<R> {
    /// Create a resource and return the server's representation of it.
    ///
    /// # Errors
    ///
    /// Validation failures are a [`ClientError`](crate::ClientError) with
    /// status 400 whose message is the server's body verbatim.
    #[tracing::instrument(skip(self, ctx, params), fields(collection = R::COLLECTION))]
    pub async fn create(&self, ctx: &Context, params: &R::CreateParams) -> Result<R> {
        let request = ApiRequest::post(R::COLLECTION)
            .json(params)?
            .expect(R::CREATE_STATUS);
        self.client.fetch(ctx, request).await
    }
}

impl<R: Updatable> ResourceService<R> {
    /// Update a resource and return the updated version.
    #[tracing::instrument(skip(self, ctx, id, params), fields(collection = R::COLLECTION, id = %id))]
    pub async fn update(&self, ctx: &Context, id: R::Id, params: &R::UpdateParams) -> Result<R> {
        let request = ApiRequest::new(R::UPDATE_METHOD, R::item_path(&id))
            .json(params)?
            .expect(R::UPDATE_STATUS);
        self.client.fetch(ctx, request).await
    }
}

impl<R: Deletable> ResourceService<R> {
    /// Delete a resource. Returns `true` on `204 No Content`.
    ///
    /// # Errors
    ///
    /// Any other status, including 404 for an already deleted id, is a
    /// [`ClientError`](crate::ClientError).
    #[tracing::instrument(skip(self, ctx, id), fields(collection = R::COLLECTION, id = %id))]
    pub async fn delete(&self, ctx: &Context, id: R::Id) -> Result<bool> {
        let request = ApiRequest::delete(R::item_path(&id)).expect(&[StatusCode::NO_CONTENT]);
        self.client.no_content(ctx, request).await
    }
}

#[derive(Debug, Default, Deserialize)]
struct HealthStatus {
    status: bool,
}

impl<R: HealthChecked> ResourceService<R> {
    /// Ask the server whether the named plugin is up.
    #[tracing::instrument(skip(self, ctx), fields(collection = R::COLLECTION))]
    pub async fn health_check(&self, ctx: &Context, name: &str) -> Result<bool> {
        let path = format!("{}/health_check", R::item_path(&name.to_string()));
        let health: HealthStatus = self.client.fetch(ctx, ApiRequest::get(path)).await?;
        Ok(health.status)
    }
}
