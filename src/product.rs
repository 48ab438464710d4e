use serde::Deserialize;

/// Column order of the output file.
pub const PRODUCT_FIELDS: [&str; 7] = [
    "name",
    "link",
    "price",
    "old_price",
    "article",
    "vendor",
    "image",
];

/// Written in place of a field whose element was missing from the card.
///
/// A card whose text really is `N/A` is written the same way, so the two
/// cannot be told apart in the file. In memory they stay distinct.
pub const ABSENT: &str = "N/A";

/// One product card from a search results page.
///
/// `None` means the card had no element for that field, which is distinct
/// from an element with blank text. `Deserialize` reads written rows back,
/// where the marker comes back as `Some(ABSENT)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub name: Option<String>,
    pub link: Option<String>,
    pub price: Option<String>,
    pub old_price: Option<String>,
    pub article: Option<String>,
    pub vendor: Option<String>,
    pub image: Option<String>,
}

impl Product {
    /// Field values in `PRODUCT_FIELDS` order.
    pub fn values(&self) -> [Option<&str>; 7] {
        [
            self.name.as_deref(),
            self.link.as_deref(),
            self.price.as_deref(),
            self.old_price.as_deref(),
            self.article.as_deref(),
            self.vendor.as_deref(),
            self.image.as_deref(),
        ]
    }

    pub fn to_csv_record(&self) -> [&str; 7] {
        self.values().map(|value| value.unwrap_or(ABSENT))
    }
}
