//! Products domain module.
//!
//! Product and category records as the backend stores them, plus the derived
//! category views (forest and leveled list). Pure domain logic: no IO, no
//! storage, every view is rebuilt from the records passed in.

pub mod category;
pub mod product;

pub use category::{
    CategoryError, CategoryNode, CategoryRecord, LeveledCategory, build_flat_with_level,
    build_tree, descendant_ids,
};
pub use product::{ProductRecord, ProductStatus};
