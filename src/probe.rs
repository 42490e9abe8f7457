//! Existence probe for the page behind gated links.

use std::future::Future;

use gloo_net::http::{Method, Request};
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered 2xx.
    Exists,
    /// The server answered, but not with 2xx.
    Missing,
    /// No answer: network error, `file://` page, abort on timeout.
    Failed,
}

impl ProbeOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            ProbeOutcome::Exists
        } else {
            ProbeOutcome::Missing
        }
    }
}

pub trait PageProbe {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome>;
}

/// `HEAD` request through `fetch`, optionally aborted after a deadline.
#[derive(Clone, Copy, Debug)]
pub struct HeadProbe {
    timeout_ms: Option<u32>,
}

impl HeadProbe {
    pub fn new(timeout_ms: Option<u32>) -> Self {
        Self { timeout_ms }
    }

    async fn head(&self, url: &str) -> Result<u16, String> {
        let controller = AbortController::new().map_err(|_| "abort controller unavailable".to_string())?;
        let signal = controller.signal();
        // dropped (and cleared) when this function returns
        let _deadline = self.timeout_ms.map(|ms| Timeout::new(ms, move || controller.abort()));
        let response = Request::get(url)
            .method(Method::HEAD)
            .abort_signal(Some(&signal))
            .send()
            .await
            .map_err(|err| format!("head request failed: {err}"))?;
        Ok(response.status())
    }
}

impl PageProbe for HeadProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.head(url).await {
            Ok(status) => {
                let outcome = ProbeOutcome::from_status(status);
                tracing::debug!(url, status, ?outcome, "page probe answered");
                outcome
            }
            Err(err) => {
                tracing::warn!(url, %err, "page probe failed");
                ProbeOutcome::Failed
            }
        }
    }
}
