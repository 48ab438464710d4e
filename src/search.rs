use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::browser::Browser;
use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::page::Page;
use crate::parser::{CardParser, CARD_SELECTOR};
use crate::product::Product;

/// Build the URL of one search results page.
///
/// The query is inserted as-is, without percent-encoding.
pub fn search_url(origin: &str, query: &str, page: u32) -> String {
    format!("{origin}/magazin/search?gr_smart_search=1&search_text={query}&page={page}")
}

/// Something that can turn a search URL into rendered HTML.
#[async_trait]
pub trait PageSource {
    /// Load `url` and return its HTML once results have rendered,
    /// or `None` if the results marker never showed up.
    async fn fetch(&mut self, url: &str) -> Result<Option<String>>;
}

/// Loads search pages in a real browser tab and waits for the card marker.
pub struct RenderedSearch<'a> {
    page: &'a Page,
    marker_timeout: Duration,
}

impl<'a> RenderedSearch<'a> {
    pub fn new(page: &'a Page, marker_timeout: Duration) -> Self {
        Self {
            page,
            marker_timeout,
        }
    }
}

#[async_trait]
impl PageSource for RenderedSearch<'_> {
    async fn fetch(&mut self, url: &str) -> Result<Option<String>> {
        self.page.goto(url).await?;

        match self
            .page
            .wait_for_selector(CARD_SELECTOR, self.marker_timeout)
            .await
        {
            Ok(()) => {}
            Err(Error::Timeout(reason)) => {
                debug!(%reason, "results marker did not appear");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        self.page.html().await.map(Some)
    }
}

/// Walk result pages from 1 upwards, collecting every card, until a page
/// never renders results or renders no cards.
pub async fn collect_products<S>(
    source: &mut S,
    config: &ScraperConfig,
    query: &str,
) -> Result<Vec<Product>>
where
    S: PageSource + Send + ?Sized,
{
    let parser = CardParser::new(config.origin.as_str())?;
    let mut products = Vec::new();
    let mut page_num: u32 = 1;

    loop {
        if config.max_pages.is_some_and(|max| page_num > max) {
            info!(max_pages = page_num - 1, "page limit reached");
            break;
        }

        let url = search_url(&config.origin, query, page_num);
        debug!(page = page_num, %url, "fetching results page");

        let Some(html) = source.fetch(&url).await? else {
            info!(page = page_num, "no results rendered, stopping");
            break;
        };

        let cards = parser.parse(&html);
        if cards.is_empty() {
            info!(page = page_num, "page has no product cards, stopping");
            break;
        }

        info!(page = page_num, cards = cards.len(), "parsed results page");
        products.extend(cards);
        page_num += 1;
    }

    Ok(products)
}

/// Scrape every result page for `query` in a fresh headless browser.
///
/// The browser is closed before returning, whether the scrape succeeded or not.
pub async fn parse_search(query: &str, config: &ScraperConfig) -> Result<Vec<Product>> {
    let browser = Browser::launch(config).await?;

    let scraped = async {
        let page = browser.new_page().await?;
        let mut source = RenderedSearch::new(&page, config.marker_timeout);
        let products = collect_products(&mut source, config, query).await;
        let closed = page.close().await;
        let products = products?;
        closed?;
        Ok::<_, Error>(products)
    }
    .await;

    let closed = browser.close().await;
    let products = scraped?;
    if let Err(e) = closed {
        warn!(error = %e, "browser did not shut down cleanly");
        return Err(e);
    }

    info!(total = products.len(), "search finished");
    Ok(products)
}
