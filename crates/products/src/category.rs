//! Category records and the derived category views.
//!
//! Categories form a forest: each record names at most one parent. Two views
//! are derived from a flat list of records:
//!
//! - [`build_tree`]: root categories with their descendants nested as `children`.
//! - [`build_flat_with_level`]: every category annotated with its depth, ordered
//!   by depth then name (for indented selects and listings).
//!
//! Both are recomputed from the records on every call; nothing is cached.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use stockroom_core::{DomainError, RecordId};

/// A category as stored in the `categories` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryRecord {
    /// Build a validated category record.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        parent_id: Option<RecordId>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if parent_id.as_ref() == Some(&id) {
            return Err(DomainError::invariant("category cannot be its own parent"));
        }
        Ok(Self {
            id,
            name,
            parent_id,
            description: None,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A category with its nested children (one node of the category forest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: CategoryRecord,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A category annotated with its depth (root = 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeveledCategory {
    #[serde(flatten)]
    pub category: CategoryRecord,
    pub level: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// Following `parent_id` from this category revisits a category.
    #[error("category parent chain contains a cycle (starting at {id})")]
    Cycle { id: RecordId },
}

/// Assemble the category forest.
///
/// Roots and children keep input order. A category whose `parent_id` names a
/// category missing from `categories` is dropped: it is neither promoted to a
/// root nor attached anywhere, and its own descendants go with it. Categories
/// caught in a parent cycle are unreachable from any root and are dropped too.
pub fn build_tree(categories: &[CategoryRecord]) -> Vec<CategoryNode> {
    // Lookup holds indices only; nodes are owned by exactly one children vec
    // or by the root list.
    let index: HashMap<&RecordId, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (&c.id, i))
        .collect();

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];

    for (i, category) in categories.iter().enumerate() {
        match &category.parent_id {
            None => roots.push(i),
            Some(parent_id) => {
                if let Some(&parent) = index.get(parent_id) {
                    children[parent].push(i);
                }
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|i| assemble(i, categories, &children))
        .collect()
}

/// Build the subtree under `root` without recursing, so chain depth is bounded
/// by memory rather than by the call stack.
///
/// Every index sits in at most one `children` list, so each node is built
/// exactly once: parents precede their descendants in `order`, and walking it
/// backwards finds every child already assembled.
fn assemble(
    root: usize,
    categories: &[CategoryRecord],
    children: &[Vec<usize>],
) -> Option<CategoryNode> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().copied());
    }

    let mut built: HashMap<usize, CategoryNode> = HashMap::with_capacity(order.len());
    for &i in order.iter().rev() {
        let kids = children[i]
            .iter()
            .filter_map(|c| built.remove(c))
            .collect();
        built.insert(
            i,
            CategoryNode {
                category: categories[i].clone(),
                children: kids,
            },
        );
    }
    built.remove(&root)
}

/// Flatten categories with their depth, ordered by `(level, name)`.
///
/// The level is the number of resolvable parent hops: the walk stops at a
/// `None` parent or at a parent id missing from `categories`, so an orphaned
/// category sits at level 0 here even though [`build_tree`] drops it.
///
/// Returns [`CategoryError::Cycle`] instead of walking forever when a parent
/// chain loops back on itself.
pub fn build_flat_with_level(
    categories: &[CategoryRecord],
) -> Result<Vec<LeveledCategory>, CategoryError> {
    let lookup: HashMap<&RecordId, &CategoryRecord> =
        categories.iter().map(|c| (&c.id, c)).collect();

    let mut leveled = categories
        .iter()
        .map(|category| {
            Ok(LeveledCategory {
                level: level_of(category, &lookup)?,
                category: category.clone(),
            })
        })
        .collect::<Result<Vec<_>, CategoryError>>()?;

    leveled.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| compare_names(&a.category.name, &b.category.name))
    });

    Ok(leveled)
}

fn level_of<'a>(
    category: &'a CategoryRecord,
    lookup: &HashMap<&'a RecordId, &'a CategoryRecord>,
) -> Result<usize, CategoryError> {
    let mut visited: HashSet<&RecordId> = HashSet::from([&category.id]);
    let mut level = 0;
    let mut current = category;

    while let Some(parent_id) = &current.parent_id {
        let Some(&parent) = lookup.get(parent_id) else {
            break;
        };
        if !visited.insert(&parent.id) {
            return Err(CategoryError::Cycle {
                id: category.id.clone(),
            });
        }
        level += 1;
        current = parent;
    }

    Ok(level)
}

/// Locale-aware name order: accents and case are ignored first ("Óleos" sorts
/// with "oleos", before "Parafusos"), then the unaccented spelling wins a tie,
/// then exact comparison settles the rest.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Canonical decomposition with combining marks stripped, lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Ids of `root_id` and all of its transitive children, root first.
///
/// Returns an empty list when `root_id` is unknown. Cyclic links are visited
/// once.
pub fn descendant_ids(categories: &[CategoryRecord], root_id: &RecordId) -> Vec<RecordId> {
    if !categories.iter().any(|c| &c.id == root_id) {
        return Vec::new();
    }

    let mut by_parent: HashMap<&RecordId, Vec<&RecordId>> = HashMap::new();
    for c in categories {
        if let Some(parent_id) = &c.parent_id {
            by_parent.entry(parent_id).or_default().push(&c.id);
        }
    }

    let mut seen: HashSet<&RecordId> = HashSet::from([root_id]);
    let mut out = vec![root_id.clone()];
    let mut cursor = 0;
    while cursor < out.len() {
        if let Some(kids) = by_parent.get(&out[cursor]) {
            for kid in kids {
                if seen.insert(*kid) {
                    out.push((*kid).clone());
                }
            }
        }
        cursor += 1;
    }
    out
}
