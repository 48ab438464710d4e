use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::page::Page as CrPage;
use futures::StreamExt;

use crate::error::{Error, Result};

/// Wrapper around a chromiumoxide Page exposing only what a search scrape needs.
pub struct Page {
    inner: CrPage,
    navigation_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CrPage, navigation_timeout: Duration) -> Self {
        Self {
            inner,
            navigation_timeout,
        }
    }

    /// Navigate to the given URL and wait for `DOMContentLoaded`.
    ///
    /// Images and other subresources may still be loading when this returns.
    /// Fails with `NavigationError` if the document is not parsed within the
    /// navigation timeout.
    pub async fn goto(&self, url: &str) -> Result<()> {
        // Subscribe before navigating so the event cannot be missed
        let mut dom_ready = self
            .inner
            .event_listener::<EventDomContentEventFired>()
            .await?;

        let navigate = async {
            let response = self
                .inner
                .execute(NavigateParams::new(url))
                .await
                .map_err(|e| Error::NavigationError(e.to_string()))?;
            if let Some(reason) = response.result.error_text.as_deref() {
                return Err(Error::NavigationError(format!("{url}: {reason}")));
            }
            dom_ready.next().await;
            Ok(())
        };

        match tokio::time::timeout(self.navigation_timeout, navigate).await {
            Ok(result) => result,
            Err(_) => Err(Error::NavigationError(format!(
                "{url} was not parsed within {:?}",
                self.navigation_timeout
            ))),
        }
    }

    /// Wait for an element matching the given CSS selector to appear in the DOM.
    /// Polls every 100ms until `timeout` elapses.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            match self.inner.find_element(selector).await {
                Ok(_) => return Ok(()),
                Err(_) if start.elapsed() < timeout => {
                    tokio::time::sleep(interval).await;
                }
                Err(_) => {
                    return Err(Error::Timeout(format!(
                        "Timed out waiting for selector: {}",
                        selector
                    )));
                }
            }
        }
    }

    /// Get the full rendered HTML of the page.
    pub async fn html(&self) -> Result<String> {
        self.inner
            .content()
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))
    }

    /// Close the tab.
    pub async fn close(self) -> Result<()> {
        self.inner.close().await?;
        Ok(())
    }
}
