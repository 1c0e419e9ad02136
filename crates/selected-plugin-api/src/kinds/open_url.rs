//! URL actions.
//!
//! Routing, after `{text}` substitution:
//!
//! ```text
//! not http/https ─────────────────────────► open(url)
//! web, app is not a browser ──────────────► open(url)
//! web, browser, app not resolvable ───────► open(url)
//! web, browser, app resolved ─────────────► open_with(url, app, activate)
//!                                               └─ on failure ► open(url)
//! ```
//!
//! Opening links from a browser keeps them in that browser instead of
//! whichever one is the system default.

use serde::{Deserialize, Serialize};
use url::Url;

use selected_core::ActionMetadata;

use super::{report, ActionKind};
use crate::capabilities::{BrowserList, Capabilities, UrlOpener};
use crate::executable::ExecutableAction;

/// Placeholder replaced with the selected text.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Open a URL built from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlAction {
    /// URL template; `{text}` is replaced with the selection.
    pub url: String,
}

impl UrlAction {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ActionKind for UrlAction {
    fn kind_name(&self) -> &'static str {
        "url"
    }

    fn generate(&self, meta: ActionMetadata, caps: &Capabilities) -> ExecutableAction {
        let template = self.url.clone();
        let identifier = meta.identifier.clone();
        let opener = caps.opener.clone();
        let browsers = caps.browsers.clone();

        ExecutableAction::new(meta, move |ctx| {
            let raw = template.replace(TEXT_PLACEHOLDER, &ctx.text);
            let url = match Url::parse(&raw) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Action '{}': invalid URL '{}': {}", identifier, raw, e);
                    return;
                }
            };
            route(&identifier, opener.as_ref(), &browsers, &url, &ctx.app_id);
        })
    }
}

fn route(
    identifier: &str,
    opener: &dyn UrlOpener,
    browsers: &BrowserList,
    url: &Url,
    app_id: &str,
) {
    tracing::debug!("Action '{}': scheme '{}'", identifier, url.scheme());

    if !matches!(url.scheme(), "http" | "https") || !browsers.is_browser(app_id) {
        report(identifier, "open", opener.open(url));
        return;
    }

    let Some(app) = opener.resolve_application(app_id) else {
        tracing::debug!("Action '{}': could not resolve '{}'", identifier, app_id);
        report(identifier, "open", opener.open(url));
        return;
    };

    if let Err(e) = opener.open_with(url, &app, true) {
        tracing::warn!(
            "Action '{}': opening with {:?} failed: {}, using default opener",
            identifier,
            app.path(),
            e
        );
        report(identifier, "open", opener.open(url));
    }
}
