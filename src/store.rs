//! Storage collaborator boundary.
//!
//! The resolver itself is pure; this module is the seam where it meets the
//! persistence layer. [`ResourceStore`] abstracts that layer, expected to
//! enforce short-code uniqueness as a constraint. [`create_resource`] owns
//! the retry loop the constraint implies, and [`resolve`] implements the
//! routing-side lookup order over an extracted identifier.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{ResourceId, ResourceKeys, ShortCode};
use crate::url::{compose_path, extract_identifier};

/// How many fresh short codes `create_resource` tries before giving up.
///
/// Collisions are birthday-bound rare (under 1e-5 at 100k resources), so one
/// retry is already exceptional and five exhausted attempts indicate a broken
/// RNG or a store that rejects everything.
pub const MAX_SHORT_CODE_ATTEMPTS: usize = 5;

/// A stored resource as the resolver sees it: its identifier pair and the
/// title its slug derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResource {
    /// Identifier pair, assigned at creation.
    pub keys: ResourceKeys,

    /// Current title. The slug is derived from this on every render.
    pub title: String,
}

impl StoredResource {
    /// The resource's current path under the given collection.
    #[must_use]
    pub fn path(&self, collection: &str) -> String {
        compose_path(collection, &self.title, &self.keys)
    }
}

/// The persistence layer, as seen from the resolver.
///
/// Implementations must enforce uniqueness of short codes and signal a
/// violation with [`StoreError::ShortCodeTaken`]; `create_resource` turns
/// that into regeneration-and-retry.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Inserts a new resource. Fails with [`StoreError::ShortCodeTaken`]
    /// when the resource's short code is already assigned.
    async fn insert(&self, resource: StoredResource) -> Result<(), StoreError>;

    /// Looks a resource up by short code.
    async fn find_by_short_code(
        &self,
        code: &ShortCode,
    ) -> Result<Option<StoredResource>, StoreError>;

    /// Looks a resource up by primary id.
    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<StoredResource>, StoreError>;
}

/// Creates a resource with a fresh id and short code, regenerating the code
/// on collision up to [`MAX_SHORT_CODE_ATTEMPTS`] times.
///
/// Returns the keys the resource was stored under.
pub async fn create_resource<S>(store: &S, title: &str) -> Result<ResourceKeys, StoreError>
where
    S: ResourceStore + ?Sized,
{
    let id = ResourceId::new();
    for attempt in 1..=MAX_SHORT_CODE_ATTEMPTS {
        let keys = ResourceKeys::new(id).with_short_code(ShortCode::generate());
        let resource = StoredResource {
            keys: keys.clone(),
            title: title.to_string(),
        };
        match store.insert(resource).await {
            Ok(()) => return Ok(keys),
            Err(StoreError::ShortCodeTaken) => {
                tracing::warn!(attempt, %id, "short code collision, regenerating");
            }
            Err(other) => return Err(other),
        }
    }
    Err(StoreError::ShortCodeExhausted {
        attempts: MAX_SHORT_CODE_ATTEMPTS,
    })
}

/// Resolves a URL path segment to a stored resource.
///
/// Extracts the identifier, then tries the short-code space first and the
/// primary-id space second. Extraction cannot tell a short code from the
/// last word of a slug with certainty, so both spaces are consulted before
/// reporting a miss. A miss is `Ok(None)`, never an error.
pub async fn resolve<S>(store: &S, segment: &str) -> Result<Option<StoredResource>, StoreError>
where
    S: ResourceStore + ?Sized,
{
    let extracted = extract_identifier(segment);

    if let Ok(code) = extracted.value().parse::<ShortCode>() {
        if let Some(resource) = store.find_by_short_code(&code).await? {
            return Ok(Some(resource));
        }
    }

    if let Ok(id) = extracted.value().parse::<ResourceId>() {
        if let Some(resource) = store.find_by_id(&id).await? {
            return Ok(Some(resource));
        }
    }

    tracing::debug!(
        segment,
        value = extracted.value(),
        kind = ?extracted.kind(),
        "extracted identifier matched no resource"
    );
    Ok(None)
}

/// In-memory [`ResourceStore`] for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<ResourceId, StoredResource>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored resources.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    /// Returns true if the store holds no resources.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<ResourceId, StoredResource>>, StoreError>
    {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<ResourceId, StoredResource>>, StoreError>
    {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn insert(&self, resource: StoredResource) -> Result<(), StoreError> {
        let mut map = self.write()?;
        if let Some(code) = &resource.keys.short_code {
            let taken = map
                .values()
                .any(|existing| existing.keys.short_code.as_ref() == Some(code));
            if taken {
                return Err(StoreError::ShortCodeTaken);
            }
        }
        map.insert(resource.keys.id, resource);
        Ok(())
    }

    async fn find_by_short_code(
        &self,
        code: &ShortCode,
    ) -> Result<Option<StoredResource>, StoreError> {
        let map = self.read()?;
        Ok(map
            .values()
            .find(|resource| resource.keys.short_code.as_ref() == Some(code))
            .cloned())
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<StoredResource>, StoreError> {
        let map = self.read()?;
        Ok(map.get(id).cloned())
    }
}
