//! The four product search operations
//!
//! Each operation takes its collaborator and a [`CallContext`]
//! explicitly, makes its remote call(s) under that context, writes to the
//! supplied sink and passes any error back unchanged.
//!
//! [`CallContext`]: crate::context::CallContext

mod delete;
mod list;
mod search;

pub use delete::{delete_product, delete_reference_image};
pub use list::list_product_sets;
pub use search::{
    search_similar_products, search_similar_products_from_reader, SimilarProductsQuery,
};
