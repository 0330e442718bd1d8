//! User listing and retrieval.

use std::sync::Arc;

use tracing::warn;

use idgate_store::IdentityStore;

use crate::error::{ScimError, ScimResult};
use crate::models::{ScimListResponse, ScimPagination, ScimUser};
use crate::services::resource_mapper::{ColumnIndex, ResourceMapper};

/// Service for the `/Users` resource.
///
/// With the entitlements extension enabled, every mapped user costs
/// one additional association query, so a page of n users issues n
/// extra round trips. That linear cost is the gateway's main
/// scalability constraint and is deliberate: entitlement data is an
/// enhancement, not part of the base SCIM contract.
pub struct UserService {
    store: Arc<dyn IdentityStore>,
    mapper: ResourceMapper,
    entitlements_enabled: bool,
}

impl UserService {
    /// Create the service.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        mapper: ResourceMapper,
        entitlements_enabled: bool,
    ) -> Self {
        Self {
            store,
            mapper,
            entitlements_enabled,
        }
    }

    /// List one page of users wrapped in the SCIM envelope.
    ///
    /// The total count and the page come from separate queries that are
    /// not transactionally linked; under concurrent writes the two may
    /// disagree. Accepted eventual-consistency gap.
    pub async fn list_users(
        &self,
        pagination: ScimPagination,
    ) -> ScimResult<ScimListResponse<ScimUser>> {
        let total_results = self.store.count_users().await?;
        let page = self
            .store
            .fetch_user_page(pagination.offset(), pagination.limit())
            .await?;

        let index = ColumnIndex::new(&page.columns);
        let mut resources = Vec::with_capacity(page.len());
        for row in &page.rows {
            let mut user = self.mapper.map_user(row, &index)?;
            self.merge_entitlements(&mut user).await;
            resources.push(user);
        }

        Ok(ScimListResponse::new(
            self.mapper.version(),
            resources,
            total_results,
            pagination.start_index,
        ))
    }

    /// Fetch one user by id.
    pub async fn get_user(&self, id: &str) -> ScimResult<ScimUser> {
        let result = self.store.fetch_user_by_id(id).await?;
        let index = ColumnIndex::new(&result.columns);

        let row = result
            .rows
            .first()
            .ok_or_else(|| ScimError::NotFound("User not found".to_string()))?;

        let mut user = self.mapper.map_user(row, &index)?;
        self.merge_entitlements(&mut user).await;
        Ok(user)
    }

    /// Attach entitlement summaries to a mapped user.
    ///
    /// A failed lookup degrades to no entitlements with a warning —
    /// it must never fail the enclosing user operation, because the
    /// association tables are optional. An empty summary list leaves
    /// the attribute absent.
    async fn merge_entitlements(&self, user: &mut ScimUser) {
        if !self.entitlements_enabled || user.id.is_empty() {
            return;
        }

        let summaries = match self.store.fetch_user_entitlements(&user.id).await {
            Ok(rows) => self.mapper.entitlement_summaries(&rows),
            Err(e) => {
                warn!(
                    user_id = %user.id,
                    error = %e,
                    "could not fetch entitlements; returning user without them"
                );
                Vec::new()
            }
        };

        if !summaries.is_empty() {
            user.entitlements = Some(summaries);
        }
    }
}
