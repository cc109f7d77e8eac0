//! Current user information.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::context::Context;
use crate::error::Result;
use crate::request::ApiRequest;

/// Submission counters of the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccess {
    #[serde(default)]
    pub total_submissions: u64,
    #[serde(default)]
    pub month_submissions: u64,
}

/// Reads information about the token's owner.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submission counters for the current user.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn access(&self, ctx: &Context) -> Result<UserAccess> {
        self.client.fetch(ctx, ApiRequest::get("api/me/access")).await
    }
}
