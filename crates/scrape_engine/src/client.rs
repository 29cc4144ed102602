use std::collections::HashSet;
use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use emoji_logging::{emoji_debug, emoji_trace};
use scraper::{Html, Selector};
use tokio::task::JoinSet;
use url::Url;

use crate::fetch::Fetcher;
use crate::{decode_html, FetchError, FetchMetadata, ScrapeError};

type RequestHook = Arc<dyn Fn(&Request) + Send + Sync>;
type HtmlHook = Arc<dyn Fn(&HtmlElement) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&Request, Option<&Response>, &FetchError) + Send + Sync>;

/// A request about to be issued by [`HtmlClient::visit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: u64,
    pub url: Url,
}

/// A response received for a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub request: Request,
    pub metadata: FetchMetadata,
    /// Encoding the body was decoded with; `None` when it was never decoded.
    pub encoding_label: Option<String>,
}

/// One element matched by a registered selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub name: String,
    /// Concatenated text of all descendant text nodes.
    pub text: String,
    /// Position among the elements matched by the same selector.
    pub index: usize,
    pub attrs: Vec<(String, String)>,
    pub response: Arc<Response>,
}

impl HtmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Event-driven page client: register hooks, `visit` a URL, then `wait`.
///
/// Element hooks run as tokio tasks and may execute concurrently with each
/// other and with the other hooks.
pub struct HtmlClient {
    fetcher: Arc<dyn Fetcher>,
    allow_revisit: bool,
    request_hooks: Vec<RequestHook>,
    html_hooks: Vec<(Selector, HtmlHook)>,
    error_hooks: Vec<ErrorHook>,
    visited: Mutex<HashSet<String>>,
    pending: Mutex<JoinSet<()>>,
    next_request_id: AtomicU64,
}

impl HtmlClient {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            allow_revisit: false,
            request_hooks: Vec::new(),
            html_hooks: Vec::new(),
            error_hooks: Vec::new(),
            visited: Mutex::new(HashSet::new()),
            pending: Mutex::new(JoinSet::new()),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Allow the same URL to be visited more than once.
    pub fn allow_revisit(mut self, allow: bool) -> Self {
        self.allow_revisit = allow;
        self
    }

    pub fn on_request<F>(&mut self, hook: F)
    where
        F: Fn(&Request) + Send + Sync + 'static,
    {
        self.request_hooks.push(Arc::new(hook));
    }

    pub fn on_html<F>(&mut self, selector: &str, hook: F) -> Result<(), ScrapeError>
    where
        F: Fn(&HtmlElement) + Send + Sync + 'static,
    {
        let parsed = Selector::parse(selector).map_err(|err| ScrapeError::InvalidSelector {
            selector: selector.to_string(),
            message: err.to_string(),
        })?;
        self.html_hooks.push((parsed, Arc::new(hook)));
        Ok(())
    }

    pub fn on_error<F>(&mut self, hook: F)
    where
        F: Fn(&Request, Option<&Response>, &FetchError) + Send + Sync + 'static,
    {
        self.error_hooks.push(Arc::new(hook));
    }

    /// Fetch `url` and schedule element hooks for every match.
    ///
    /// Returns the number of scheduled element callbacks. Fetch failures fire
    /// the error hooks before being returned. A body that is not HTML is
    /// accepted but schedules nothing.
    pub async fn visit(&self, url: &str) -> Result<usize, ScrapeError> {
        let parsed = Url::parse(url).map_err(|err| ScrapeError::InvalidUrl {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        let first_visit = lock(&self.visited).insert(parsed.to_string());
        if !first_visit && !self.allow_revisit {
            return Err(ScrapeError::AlreadyVisited {
                url: parsed.to_string(),
            });
        }

        let request = Request {
            id: self.next_request_id.fetch_add(1, Ordering::Relaxed),
            url: parsed,
        };
        for hook in &self.request_hooks {
            hook(&request);
        }

        let output = match self.fetcher.fetch(request.url.as_str()).await {
            Ok(output) => output,
            Err(err) => return Err(self.fail(&request, err)),
        };
        let content_type = output.metadata.content_type.as_deref();
        if !content_type.is_none_or(is_html) {
            emoji_debug!(
                "Request {} returned {:?}; skipping element hooks",
                request.id,
                content_type
            );
            return Ok(0);
        }
        let decoded = decode_html(&output.bytes, content_type);
        emoji_debug!(
            "Request {} decoded {} bytes as {}",
            request.id,
            output.metadata.byte_len,
            decoded.encoding_label
        );

        let response = Arc::new(Response {
            request,
            metadata: output.metadata,
            encoding_label: Some(decoded.encoding_label),
        });
        let matches = self.select(&decoded.html, &response);
        let scheduled = matches.len();

        let mut pending = lock(&self.pending);
        for (hook, element) in matches {
            pending.spawn(async move { hook(&element) });
        }
        emoji_trace!("Scheduled {} element callbacks", scheduled);
        Ok(scheduled)
    }

    /// Block until every scheduled element callback has finished.
    ///
    /// A panic inside a callback is resumed on the caller.
    pub async fn wait(&self) {
        let mut pending = std::mem::replace(&mut *lock(&self.pending), JoinSet::new());
        while let Some(joined) = pending.join_next().await {
            if let Err(err) = joined {
                if err.is_panic() {
                    panic::resume_unwind(err.into_panic());
                }
            }
        }
    }

    fn fail(&self, request: &Request, err: FetchError) -> ScrapeError {
        let response = err.response.clone().map(|metadata| Response {
            request: request.clone(),
            metadata,
            encoding_label: None,
        });
        for hook in &self.error_hooks {
            hook(request, response.as_ref(), &err);
        }
        ScrapeError::Fetch(err)
    }

    // `Html` is not `Send`, so matching happens synchronously before any task is spawned.
    fn select(&self, html: &str, response: &Arc<Response>) -> Vec<(HtmlHook, HtmlElement)> {
        let document = Html::parse_document(html);
        let mut matches = Vec::new();
        for (selector, hook) in &self.html_hooks {
            for (index, node) in document.select(selector).enumerate() {
                let element = HtmlElement {
                    name: node.value().name().to_string(),
                    text: node.text().collect(),
                    index,
                    attrs: node
                        .value()
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                    response: Arc::clone(response),
                };
                matches.push((Arc::clone(hook), element));
            }
        }
        matches
    }
}

fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
