pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod page;
pub mod parser;
pub mod product;
pub mod search;
pub mod writer;

pub use browser::Browser;
pub use config::{ScraperBuilder, ScraperConfig};
pub use error::{Error, Result};
pub use product::{Product, ABSENT, PRODUCT_FIELDS};
pub use search::{collect_products, parse_search, search_url, PageSource, RenderedSearch};
pub use writer::{save_to_csv, write_products};
