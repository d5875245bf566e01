use crate::client::ImageAnnotator;
use crate::context::CallContext;
use crate::error::Result;
use crate::payload::ImagePayload;
use product_search_common::{
    write_search_results, ImageContext, ProductSearchParams, ResourceName,
};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Identifiers and filter for a similar-products search
#[derive(Debug, Clone, Copy)]
pub struct SimilarProductsQuery<'a> {
    pub project_id: &'a str,
    pub location: &'a str,
    pub product_set_id: &'a str,
    pub product_category: &'a str,
    /// Passed to the service verbatim, e.g. `style=womens AND color=red`
    pub filter: &'a str,
}

impl SimilarProductsQuery<'_> {
    pub fn product_set(&self) -> ResourceName {
        ResourceName::product_set(self.project_id, self.location, self.product_set_id)
    }

    pub fn image_context(&self) -> ImageContext {
        ProductSearchParams::new(&self.product_set(), self.product_category, self.filter).into()
    }
}

/// Search a product set for products similar to the one in `file`
///
/// A missing, unreadable or undecodable file fails before any remote call.
pub async fn search_similar_products<A, W>(
    annotator: &A,
    ctx: &CallContext,
    out: &mut W,
    query: &SimilarProductsQuery<'_>,
    file: &Path,
) -> Result<()>
where
    A: ImageAnnotator + ?Sized,
    W: Write + ?Sized,
{
    let image = ImagePayload::open(file)?;
    search_with_payload(annotator, ctx, out, query, &image).await
}

/// Same as [`search_similar_products`] with the image read from `source`
pub async fn search_similar_products_from_reader<A, W, R>(
    annotator: &A,
    ctx: &CallContext,
    out: &mut W,
    query: &SimilarProductsQuery<'_>,
    source: R,
    origin: &str,
) -> Result<()>
where
    A: ImageAnnotator + ?Sized,
    W: Write + ?Sized,
    R: Read,
{
    let image = ImagePayload::from_reader(source, origin)?;
    search_with_payload(annotator, ctx, out, query, &image).await
}

async fn search_with_payload<A, W>(
    annotator: &A,
    ctx: &CallContext,
    out: &mut W,
    query: &SimilarProductsQuery<'_>,
    image: &ImagePayload,
) -> Result<()>
where
    A: ImageAnnotator + ?Sized,
    W: Write + ?Sized,
{
    let context = query.image_context();
    debug!(
        product_set = %context.product_search_params.product_set,
        category = query.product_category,
        format = ?image.format(),
        dimensions = ?image.dimensions(),
        bytes = image.len(),
        "searching similar products"
    );

    let response = ctx.call(annotator.product_search(image, &context)).await?;
    debug!(matches = response.results.len(), "search complete");

    write_search_results(out, &response)?;
    Ok(())
}
