//! Entitlement listing and retrieval (extension variant).

use std::sync::Arc;

use idgate_store::IdentityStore;

use crate::error::{ScimError, ScimResult};
use crate::models::{ScimEntitlement, ScimListResponse, ScimPagination};
use crate::services::resource_mapper::{ColumnIndex, ResourceMapper};

/// Service for the `/Entitlements` resource.
pub struct EntitlementService {
    store: Arc<dyn IdentityStore>,
    mapper: ResourceMapper,
}

impl EntitlementService {
    /// Create the service.
    pub fn new(store: Arc<dyn IdentityStore>, mapper: ResourceMapper) -> Self {
        Self { store, mapper }
    }

    /// List one page of entitlements wrapped in the SCIM envelope.
    pub async fn list_entitlements(
        &self,
        pagination: ScimPagination,
    ) -> ScimResult<ScimListResponse<ScimEntitlement>> {
        let total_results = self.store.count_entitlements().await?;
        let page = self
            .store
            .fetch_entitlement_page(pagination.offset(), pagination.limit())
            .await?;

        let index = ColumnIndex::new(&page.columns);
        let resources = page
            .rows
            .iter()
            .map(|row| self.mapper.map_entitlement(row, &index))
            .collect::<ScimResult<Vec<_>>>()?;

        Ok(ScimListResponse::new(
            self.mapper.version(),
            resources,
            total_results,
            pagination.start_index,
        ))
    }

    /// Fetch one entitlement by id.
    pub async fn get_entitlement(&self, id: &str) -> ScimResult<ScimEntitlement> {
        let result = self.store.fetch_entitlement_by_id(id).await?;
        let index = ColumnIndex::new(&result.columns);

        let row = result
            .rows
            .first()
            .ok_or_else(|| ScimError::NotFound("Entitlement not found".to_string()))?;

        self.mapper.map_entitlement(row, &index)
    }
}
