//! What the command-line tool does between reading a query and exiting.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::product::Product;
use crate::search::{collect_products, PageSource};
use crate::writer::save_to_csv;

/// Console text shown to the user.
pub mod messages {
    pub const SEARCH_QUERY: &str = "Введите поисковый запрос: ";
    pub const NO_PRODUCTS: &str = "Товары не найдены.";
    pub const PRODUCTS_FOUND: &str = "Найдено товаров:";
    pub const DATA_FILE: &str = "Данные сохранены в файл:";
}

/// Print the prompt and read one line, trimmed.
pub fn read_query<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<String> {
    write!(out, "{}", messages::SEARCH_QUERY)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// `<query>_products.csv`, with the query used verbatim.
pub fn output_file_name(query: &str) -> String {
    format!("{query}_products.csv")
}

/// Write `products` into `dir` and print the summary, or print the
/// "no products" line and write nothing. Returns the file written, if any.
pub fn report<W: Write>(
    query: &str,
    products: &[Product],
    dir: &Path,
    mut out: W,
) -> Result<Option<PathBuf>> {
    if products.is_empty() {
        writeln!(out, "{}", messages::NO_PRODUCTS)?;
        return Ok(None);
    }

    let file_name = output_file_name(query);
    let path = dir.join(&file_name);
    let rows = save_to_csv(products, &path)?;
    writeln!(out, "{} {rows}", messages::PRODUCTS_FOUND)?;
    writeln!(out, "{} {file_name}", messages::DATA_FILE)?;

    Ok(Some(path))
}

/// Scrape every page `source` serves for `query`, then [`report`].
pub async fn run<S, W>(
    query: &str,
    source: &mut S,
    config: &ScraperConfig,
    dir: &Path,
    out: W,
) -> Result<Option<PathBuf>>
where
    S: PageSource + Send + ?Sized,
    W: Write,
{
    let products = collect_products(source, config, query).await?;
    report(query, &products, dir, out)
}
