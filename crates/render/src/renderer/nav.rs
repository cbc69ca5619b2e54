//! In-document navigation interception.

use styledown_core::link;

/// A host callback receiving resolved internal paths.
pub type Navigator = Box<dyn Fn(&str) + Send + Sync>;

/// What happened to an anchor click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Default handling runs: external resource, or no navigator configured.
    Default,
    /// Default handling was suppressed; the navigator received this path.
    Intercepted(String),
}

/// Routes anchor clicks: external hrefs fall through, internal hrefs are
/// resolved against the current document location and handed to the host
/// navigator.
pub struct LinkInterceptor {
    location: String,
    navigator: Option<Navigator>,
}

impl LinkInterceptor {
    /// Creates an interceptor for the given virtual document location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            navigator: None,
        }
    }

    /// Installs the host navigation callback.
    pub fn set_navigator(&mut self, navigator: Navigator) {
        self.navigator = Some(navigator);
    }

    /// The virtual location relative hrefs resolve against.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Handles one anchor click. External hrefs and clicks without a
    /// configured navigator fall through to default handling; everything
    /// else is resolved and forwarded.
    pub fn handle_click(&self, href: &str) -> ClickOutcome {
        if link::is_external(href) {
            return ClickOutcome::Default;
        }
        let Some(navigator) = &self.navigator else {
            return ClickOutcome::Default;
        };
        let resolved = link::resolve_href(&self.location, href);
        navigator(&resolved);
        ClickOutcome::Intercepted(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn interceptor_with_log(location: &str) -> (LinkInterceptor, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut interceptor = LinkInterceptor::new(location);
        interceptor.set_navigator(Box::new(move |path: &str| {
            sink.lock().unwrap().push(path.to_string());
        }));
        (interceptor, log)
    }

    #[test]
    fn test_external_href_falls_through() {
        let (interceptor, log) = interceptor_with_log("/docs/guide/intro");
        assert_eq!(
            interceptor.handle_click("http://example.com"),
            ClickOutcome::Default
        );
        assert!(log.lock().unwrap().is_empty(), "navigator must not run");
    }

    #[test]
    fn test_absolute_path_intercepted_unchanged() {
        let (interceptor, log) = interceptor_with_log("/docs/guide/intro");
        assert_eq!(
            interceptor.handle_click("/api/ref"),
            ClickOutcome::Intercepted("/api/ref".to_string())
        );
        assert_eq!(log.lock().unwrap().as_slice(), ["/api/ref"]);
    }

    #[test]
    fn test_relative_path_resolved_against_location() {
        let (interceptor, log) = interceptor_with_log("/docs/guide/intro");
        assert_eq!(
            interceptor.handle_click("../setup"),
            ClickOutcome::Intercepted("/docs/setup".to_string())
        );
        assert_eq!(log.lock().unwrap().as_slice(), ["/docs/setup"]);
    }

    #[test]
    fn test_scheme_like_internal_name_is_intercepted() {
        let (interceptor, log) = interceptor_with_log("/docs/guide/intro");
        assert_eq!(
            interceptor.handle_click("http-caching"),
            ClickOutcome::Intercepted("http-caching".to_string())
        );
        assert_eq!(log.lock().unwrap().as_slice(), ["http-caching"]);
    }

    #[test]
    fn test_bare_href_forwarded_unresolved() {
        let (interceptor, _) = interceptor_with_log("/docs/guide/intro");
        assert_eq!(
            interceptor.handle_click("changelog"),
            ClickOutcome::Intercepted("changelog".to_string())
        );
    }

    #[test]
    fn test_without_navigator_everything_falls_through() {
        let interceptor = LinkInterceptor::new("/docs/guide/intro");
        assert_eq!(interceptor.handle_click("../setup"), ClickOutcome::Default);
        assert_eq!(interceptor.handle_click("/api/ref"), ClickOutcome::Default);
    }
}
