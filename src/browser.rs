use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::page::Page;

/// Chrome flags that improve performance without affecting functionality.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "no-default-browser-check",
    "no-first-run",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
];

/// A headless Chrome process plus the task draining its CDP event stream.
///
/// Call [`Browser::close`] when done. If the value is dropped instead,
/// chromiumoxide kills the child process on drop.
pub struct Browser {
    inner: CrBrowser,
    navigation_timeout: std::time::Duration,
    handler_task: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a browser instance with the given configuration.
    pub async fn launch(config: &ScraperConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        // chromiumoxide adds the `--` prefix itself
        for arg in PERF_ARGS {
            builder = builder.arg(*arg);
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder
            .request_timeout(config.navigation_timeout)
            .viewport(Viewport {
                width: config.viewport_width,
                height: config.viewport_height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: false,
                has_touch: false,
            });

        let cr_config = builder.build().map_err(Error::LaunchError)?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        info!(headless = config.headless, "browser launched");

        Ok(Self {
            inner: browser,
            navigation_timeout: config.navigation_timeout,
            handler_task,
        })
    }

    /// Open a blank tab.
    pub async fn new_page(&self) -> Result<Page> {
        let cr_page = self
            .inner
            .new_page("about:blank")
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(Page::new(cr_page, self.navigation_timeout))
    }

    /// Shut Chrome down, reap the process and stop the handler task.
    pub async fn close(mut self) -> Result<()> {
        let closed = self.inner.close().await;
        if closed.is_err() {
            // Chrome may still be running; make sure `wait` returns
            let _ = self.inner.kill().await;
        }
        let waited = self.inner.wait().await;
        self.handler_task.abort();
        closed?;
        waited?;
        debug!("browser closed");
        Ok(())
    }
}
