//! Text rendering of product search responses
//!
//! Every writer takes any `io::Write` sink so the same output can go to
//! stdout, a file, or a buffer under test.

use crate::types::{IndexTime, ProductLabel, ProductSearchResults, ProductSet, SearchResult};
use std::io::{self, Write};

/// Render labels as `key=value` pairs joined by `, `
pub fn format_labels(labels: &[ProductLabel]) -> String {
    labels
        .iter()
        .map(|label| format!("{}={}", label.key, label.value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Index time block, followed by a blank line
pub fn write_index_time<W: Write + ?Sized>(w: &mut W, index_time: &IndexTime) -> io::Result<()> {
    writeln!(w, "Product set index time:")?;
    writeln!(w, "  seconds: {}", index_time.seconds)?;
    writeln!(w, "  nanos: {}", index_time.nanos)?;
    writeln!(w)
}

pub fn write_product_set<W: Write + ?Sized>(w: &mut W, product_set: &ProductSet) -> io::Result<()> {
    writeln!(w, "Product set name: {}", product_set.name)?;
    writeln!(w, "Product set display name: {}", product_set.display_name)?;
    write_index_time(w, &product_set.index_time)
}

pub fn write_search_result<W: Write + ?Sized>(w: &mut W, result: &SearchResult) -> io::Result<()> {
    writeln!(w, "Score(Confidence): {}", result.score)?;
    writeln!(w, "Image name: {}", result.image)?;
    writeln!(w, "Product name: {}", result.product.name)?;
    writeln!(w, "Product display name: {}", result.product.display_name)?;
    writeln!(w, "Product labels: {}", format_labels(&result.product.product_labels))?;
    writeln!(w)
}

/// Index time, then every match in response order
pub fn write_search_results<W: Write + ?Sized>(
    w: &mut W,
    results: &ProductSearchResults,
) -> io::Result<()> {
    write_index_time(w, &results.index_time)?;

    writeln!(w, "Search results:")?;
    for result in &results.results {
        write_search_result(w, result)?;
    }

    Ok(())
}
