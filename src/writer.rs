use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::product::{Product, PRODUCT_FIELDS};

/// Write a header row and one row per product to `out`. Returns the number of rows written.
pub fn write_products<W: io::Write>(products: &[Product], out: W) -> Result<usize> {
    if products.is_empty() {
        return Err(Error::NoProducts);
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(PRODUCT_FIELDS)?;
    for product in products {
        writer.write_record(product.to_csv_record())?;
    }
    writer.flush()?;

    Ok(products.len())
}

/// Create (or truncate) `path` and write `products` to it as CSV.
///
/// Nothing is created when `products` is empty.
pub fn save_to_csv(products: &[Product], path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    if products.is_empty() {
        return Err(Error::NoProducts);
    }

    debug!("Writing CSV file to: {}", path.display());
    let file = std::fs::File::create(path)?;
    let rows = write_products(products, io::BufWriter::new(file))?;
    info!(rows, "Wrote products to {}", path.display());

    Ok(rows)
}
