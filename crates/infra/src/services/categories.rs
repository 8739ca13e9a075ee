use std::collections::{HashSet, VecDeque};

use stockroom_core::RecordId;
use stockroom_products::{
    CategoryError, CategoryNode, CategoryRecord, LeveledCategory, ProductRecord,
    build_flat_with_level, build_tree, descendant_ids,
};

use crate::config::StoreConfig;
use crate::record_store::{Collection, ListQuery, RecordStore, get_record};

use super::{ServiceError, fetch_all};

/// Category views over the `categories` collection.
#[derive(Debug)]
pub struct CategoryService<S> {
    store: S,
    page_size: u32,
}

impl<S> CategoryService<S>
where
    S: RecordStore,
{
    pub fn new(store: S, config: &StoreConfig) -> Self {
        Self {
            store,
            page_size: config.page_size,
        }
    }

    /// All categories, ordered by name.
    pub async fn list(&self) -> Result<Vec<CategoryRecord>, ServiceError> {
        let query = ListQuery::new().sort("name")?;
        Ok(fetch_all(&self.store, Collection::Categories, query, self.page_size).await?)
    }

    /// The category forest. Roots and siblings come out in name order because
    /// the list is fetched sorted by name.
    pub async fn tree(&self) -> Result<Vec<CategoryNode>, ServiceError> {
        let categories = self.list().await?;
        let tree = build_tree(&categories);

        let placed: usize = tree.iter().map(CategoryNode::len).sum();
        if placed < categories.len() {
            tracing::warn!(
                dropped = categories.len() - placed,
                "categories with unresolvable parents left out of the tree"
            );
        }
        Ok(tree)
    }

    pub async fn flat_with_level(&self) -> Result<Vec<LeveledCategory>, ServiceError> {
        let categories = self.list().await?;
        Ok(build_flat_with_level(&categories)?)
    }

    /// Ancestor chain of `category_id`, root first, ending with the category
    /// itself.
    ///
    /// Ancestors are fetched one at a time by id. The walk stops at a category
    /// without parent or at a parent that cannot be found; an unknown
    /// `category_id` yields an empty path. A parent chain that loops fails with
    /// [`CategoryError::Cycle`].
    pub async fn path(&self, category_id: &RecordId) -> Result<Vec<CategoryRecord>, ServiceError> {
        let mut path = VecDeque::new();
        let mut visited: HashSet<RecordId> = HashSet::new();
        let mut next = Some(category_id.clone());

        while let Some(id) = next {
            if !visited.insert(id.clone()) {
                return Err(CategoryError::Cycle {
                    id: category_id.clone(),
                }
                .into());
            }

            let Some(category) =
                get_record::<CategoryRecord, _>(&self.store, Collection::Categories, &id).await?
            else {
                if id != *category_id {
                    tracing::debug!(
                        category_id = %category_id,
                        missing = %id,
                        "category path stops at missing parent"
                    );
                }
                break;
            };

            next = category.parent_id.clone();
            path.push_front(category);
        }

        Ok(path.into())
    }

    /// Products filed under `category_id` or any of its descendants.
    pub async fn products_in_subtree(
        &self,
        category_id: &RecordId,
    ) -> Result<Vec<ProductRecord>, ServiceError> {
        let categories = self.list().await?;
        let ids: HashSet<RecordId> = descendant_ids(&categories, category_id).into_iter().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = ListQuery::new().sort("name")?;
        let products: Vec<ProductRecord> =
            fetch_all(&self.store, Collection::Products, query, self.page_size).await?;
        Ok(products
            .into_iter()
            .filter(|p| p.category_id.as_ref().is_some_and(|c| ids.contains(c)))
            .collect())
    }
}
