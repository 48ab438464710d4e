//! Product card extraction from a rendered search results page.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::product::Product;

/// Matches one product card. Its presence also signals that results have rendered.
pub const CARD_SELECTOR: &str = ".shop2-product-item.product-item";

const NAME_SELECTOR: &str = ".gr-product-name a";
const PRICE_SELECTOR: &str = ".product-price .price-current strong";
const OLD_PRICE_SELECTOR: &str = ".product-price .price-old strong";
const ARTICLE_SELECTOR: &str = ".product-article";
const VENDOR_SELECTOR: &str = ".gr-vendor-block";
const IMAGE_SELECTOR: &str = ".gr-product-image img";

/// Label the shop prints in front of the article number.
pub const ARTICLE_LABEL: &str = "Артикул:";

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector(format!("{selector}: {e}")))
}

/// Compiled selectors for the shop's card markup.
pub struct CardParser {
    origin: String,
    card: Selector,
    name: Selector,
    price: Selector,
    old_price: Selector,
    article: Selector,
    vendor: Selector,
    image: Selector,
}

impl CardParser {
    /// `origin` is prepended to relative `href`/`src` values.
    pub fn new(origin: impl Into<String>) -> Result<Self> {
        Ok(Self {
            origin: origin.into(),
            card: compile(CARD_SELECTOR)?,
            name: compile(NAME_SELECTOR)?,
            price: compile(PRICE_SELECTOR)?,
            old_price: compile(OLD_PRICE_SELECTOR)?,
            article: compile(ARTICLE_SELECTOR)?,
            vendor: compile(VENDOR_SELECTOR)?,
            image: compile(IMAGE_SELECTOR)?,
        })
    }

    /// Extract every product card in document order. An empty vec means the page had no cards.
    pub fn parse(&self, html: &str) -> Vec<Product> {
        let document = Html::parse_document(html);
        document
            .select(&self.card)
            .map(|card| self.parse_card(card))
            .collect()
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Product {
        let name_tag = card.select(&self.name).next();
        let image_tag = card.select(&self.image).next();

        Product {
            name: name_tag.map(stripped_text),
            link: name_tag.and_then(|a| self.absolute(a, "href")),
            price: self.text_of(card, &self.price),
            old_price: self.text_of(card, &self.old_price),
            article: self
                .text_of(card, &self.article)
                .map(|text| text.replace(ARTICLE_LABEL, "").trim().to_string()),
            vendor: self.text_of(card, &self.vendor),
            image: image_tag.and_then(|img| self.absolute(img, "src")),
        }
    }

    fn text_of(&self, card: ElementRef<'_>, selector: &Selector) -> Option<String> {
        card.select(selector).next().map(stripped_text)
    }

    fn absolute(&self, element: ElementRef<'_>, attr: &str) -> Option<String> {
        element
            .value()
            .attr(attr)
            .map(|path| format!("{}{}", self.origin, path))
    }
}

/// Every descendant text node trimmed, blanks dropped, pieces concatenated.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://obuv-tut2000.ru";

    fn full_card() -> &'static str {
        r#"
        <div class="shop2-product-item product-item">
            <div class="gr-product-image"><img src="/thumb/boot.jpg"></div>
            <div class="gr-product-name"><a href="/magazin/product/boot"> Сапоги  зимние </a></div>
            <div class="product-article">Артикул: <span>A-1024</span></div>
            <div class="gr-vendor-block"> Tesoro </div>
            <div class="product-price">
                <div class="price-old"><strong>5 990</strong> руб.</div>
                <div class="price-current"><strong>4 490</strong> руб.</div>
            </div>
        </div>"#
    }

    #[test]
    fn extracts_every_field_from_a_full_card() {
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        let products = parser.parse(full_card());
        assert_eq!(products.len(), 1);

        let p = &products[0];
        assert_eq!(p.name.as_deref(), Some("Сапоги  зимние"));
        assert_eq!(
            p.link.as_deref(),
            Some("https://obuv-tut2000.ru/magazin/product/boot")
        );
        assert_eq!(p.price.as_deref(), Some("4 490"));
        assert_eq!(p.old_price.as_deref(), Some("5 990"));
        assert_eq!(p.article.as_deref(), Some("A-1024"));
        assert_eq!(p.vendor.as_deref(), Some("Tesoro"));
        assert_eq!(
            p.image.as_deref(),
            Some("https://obuv-tut2000.ru/thumb/boot.jpg")
        );
    }

    #[test]
    fn missing_old_price_is_none() {
        let html = full_card().replace(
            r#"<div class="price-old"><strong>5 990</strong> руб.</div>"#,
            "",
        );
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        let p = &parser.parse(&html)[0];
        assert_eq!(p.old_price, None);
        assert_eq!(p.price.as_deref(), Some("4 490"));
        assert!(p.name.is_some() && p.link.is_some() && p.article.is_some());
        assert!(p.vendor.is_some() && p.image.is_some());
    }

    #[test]
    fn bare_card_yields_all_none() {
        let html = r#"<div class="shop2-product-item product-item"><p>sold out</p></div>"#;
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        assert_eq!(parser.parse(html), vec![Product::default()]);
    }

    #[test]
    fn element_without_attribute_gives_no_link() {
        let html = r#"
            <div class="shop2-product-item product-item">
                <div class="gr-product-name"><a>Туфли</a></div>
                <div class="gr-product-image"><img alt="no src"></div>
            </div>"#;
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        let p = &parser.parse(html)[0];
        assert_eq!(p.name.as_deref(), Some("Туфли"));
        assert_eq!(p.link, None);
        assert_eq!(p.image, None);
    }

    #[test]
    fn blank_element_is_empty_string_not_none() {
        let html = r#"
            <div class="shop2-product-item product-item">
                <div class="gr-vendor-block">   </div>
            </div>"#;
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        assert_eq!(parser.parse(html)[0].vendor.as_deref(), Some(""));
    }

    #[test]
    fn article_label_is_stripped() {
        let html = r#"
            <div class="shop2-product-item product-item">
                <div class="product-article">  Артикул:   77-B  </div>
            </div>"#;
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        let article = parser.parse(html)[0].article.clone().expect("Missing article");
        assert_eq!(article, "77-B");
        assert!(!article.contains(ARTICLE_LABEL));
    }

    #[test]
    fn cards_need_both_classes() {
        let html = r#"
            <div class="shop2-product-item">one</div>
            <div class="product-item">two</div>
            <div class="product-item shop2-product-item">three</div>"#;
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        assert_eq!(parser.parse(html).len(), 1);
    }

    #[test]
    fn page_without_cards_is_empty() {
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        assert!(parser
            .parse("<html><body><p>Ничего не найдено</p></body></html>")
            .is_empty());
    }

    #[test]
    fn cards_keep_document_order() {
        let html = (1..=3)
            .map(|i| {
                format!(
                    r#"<div class="shop2-product-item product-item">
                        <div class="gr-product-name"><a href="/p/{i}">item {i}</a></div>
                    </div>"#
                )
            })
            .collect::<String>();
        let parser = CardParser::new(ORIGIN).expect("Failed to compile selectors");
        let names: Vec<_> = parser
            .parse(&html)
            .into_iter()
            .map(|p| p.name.expect("Missing name"))
            .collect();
        assert_eq!(names, ["item 1", "item 2", "item 3"]);
    }
}
