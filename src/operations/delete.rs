use crate::client::ProductSearchService;
use crate::context::CallContext;
use crate::error::Result;
use product_search_common::ResourceName;
use std::io::Write;
use tracing::{debug, info};

/// Delete a product; exactly one remote call, no retry
pub async fn delete_product<S, W>(
    service: &S,
    ctx: &CallContext,
    out: &mut W,
    project_id: &str,
    location: &str,
    product_id: &str,
) -> Result<()>
where
    S: ProductSearchService + ?Sized,
    W: Write + ?Sized,
{
    let name = ResourceName::product(project_id, location, product_id);
    debug!(%name, "deleting product");

    ctx.call(service.delete(&name)).await?;

    info!(%name, "product deleted");
    writeln!(out, "Product deleted.")?;
    Ok(())
}

/// Delete one reference image of a product; exactly one remote call, no retry
pub async fn delete_reference_image<S, W>(
    service: &S,
    ctx: &CallContext,
    out: &mut W,
    project_id: &str,
    location: &str,
    product_id: &str,
    reference_image_id: &str,
) -> Result<()>
where
    S: ProductSearchService + ?Sized,
    W: Write + ?Sized,
{
    let name =
        ResourceName::reference_image(project_id, location, product_id, reference_image_id);
    debug!(%name, "deleting reference image");

    ctx.call(service.delete(&name)).await?;

    info!(%name, "reference image deleted");
    writeln!(out, "Reference image deleted from product.")?;
    Ok(())
}
