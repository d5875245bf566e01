//! Remote collaborator seams
//!
//! Operations never construct a client themselves; they receive one of
//! these traits. [`VisionClient`] talks to the real service, tests pass
//! stubs.

mod http;
mod wire;

pub use http::VisionClient;

use crate::error::RemoteError;
use crate::payload::ImagePayload;
use async_trait::async_trait;
use product_search_common::{ImageContext, ProductSearchResults, ProductSet, ResourceName};

/// One step of a paginated listing
///
/// Exhaustion is its own variant so it can never be mistaken for a
/// failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ListStep<T> {
    Item(T),
    Exhausted,
    Failed(RemoteError),
}

/// Forward-only cursor over product sets
///
/// After `Exhausted` or `Failed` every further call returns `Exhausted`.
#[async_trait]
pub trait ProductSetCursor: Send {
    async fn next(&mut self) -> ListStep<ProductSet>;
}

/// Product catalog management calls
#[async_trait]
pub trait ProductSearchService: Send + Sync {
    /// Delete the resource identified by `name`
    async fn delete(&self, name: &ResourceName) -> Result<(), RemoteError>;

    /// Cursor over the product sets under `parent`; no request is made
    /// until the first `next`
    fn list_product_sets(&self, parent: &ResourceName) -> Box<dyn ProductSetCursor>;
}

/// Image annotation calls
#[async_trait]
pub trait ImageAnnotator: Send + Sync {
    async fn product_search(
        &self,
        image: &ImagePayload,
        context: &ImageContext,
    ) -> Result<ProductSearchResults, RemoteError>;
}
