use crate::client::{ListStep, ProductSearchService};
use crate::context::CallContext;
use crate::error::Result;
use product_search_common::{write_product_set, ResourceName};
use std::io::Write;
use tracing::debug;

/// List every product set in a location, rendering each as it arrives
///
/// Output already written stays written when a later step fails.
pub async fn list_product_sets<S, W>(
    service: &S,
    ctx: &CallContext,
    out: &mut W,
    project_id: &str,
    location: &str,
) -> Result<()>
where
    S: ProductSearchService + ?Sized,
    W: Write + ?Sized,
{
    let parent = ResourceName::location(project_id, location);
    debug!(%parent, "listing product sets");

    let mut cursor = service.list_product_sets(&parent);
    let mut count = 0usize;

    loop {
        match ctx.step(cursor.next()).await {
            ListStep::Item(product_set) => {
                write_product_set(out, &product_set)?;
                count += 1;
            }
            ListStep::Exhausted => break,
            ListStep::Failed(e) => {
                debug!(%parent, rendered = count, error = %e, "listing aborted");
                return Err(e.into());
            }
        }
    }

    debug!(%parent, count, "listing complete");
    Ok(())
}
