//! Product Search Common Library
//!
//! Resource names, response types and text rendering shared by the
//! product search client and its command line front end.

pub mod error;
pub mod render;
pub mod resource;
pub mod types;

pub use error::{Error, Result};
pub use render::{
    format_labels, write_index_time, write_product_set, write_search_result,
    write_search_results,
};
pub use resource::ResourceName;
pub use types::{
    ImageContext, IndexTime, Product, ProductLabel, ProductSearchParams, ProductSearchResults,
    ProductSet, SearchResult,
};
