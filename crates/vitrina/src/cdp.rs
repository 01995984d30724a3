//! Chromium backend over CDP (feature `browser`).
//!
//! Locators are serialized to JSON and resolved in the page by a small
//! injected resolver, so the same [`Locator`] drives both this backend and
//! [`MockDriver`](crate::driver::MockDriver).

use crate::config::BrowserOptions;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{poll_until, LoadState, NETWORK_IDLE_THRESHOLD_MS};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, CaptureScreenshotParams};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const RESOLVER: &str = r#"
const textOf = el => (el.innerText ?? el.textContent ?? '').trim();
const matchText = (m, t) => {
  t = (t || '').trim();
  if (m.mode === 'contains') return t.includes(m.text);
  if (m.mode === 'contains_ignore_case') return t.toLowerCase().includes(m.text.toLowerCase());
  return t === m.text;
};
const roles = {
  button: 'button,[role=button],input[type=submit],input[type=button]',
  alert: '[role=alert]',
  link: 'a[href],[role=link]',
  heading: 'h1,h2,h3,h4,h5,h6,[role=heading]',
  checkbox: 'input[type=checkbox],[role=checkbox]',
  textbox: 'input:not([type]),input[type=text],input[type=email],textarea,[role=textbox]',
};
const accName = el => (el.getAttribute('aria-label') || textOf(el) || el.value || '').trim();
const select = (root, sel) => {
  switch (sel.kind) {
    case 'css': return Array.from(root.querySelectorAll(sel.value));
    case 'text': return Array.from(root.querySelectorAll('*')).filter(el =>
      Array.from(el.childNodes).some(n => n.nodeType === 3 && n.textContent.trim() === sel.value));
    case 'placeholder': return Array.from(root.querySelectorAll('[placeholder]'))
      .filter(el => el.getAttribute('placeholder') === sel.value);
    case 'role': {
      let els = Array.from(root.querySelectorAll(roles[sel.value.role] || `[role=${sel.value.role}]`));
      if (sel.value.name) {
        const n = sel.value.name.toLowerCase();
        els = els.filter(el => accName(el).toLowerCase().includes(n));
      }
      return els;
    }
  }
  return [];
};
const resolve = (loc, roots) => {
  let current = roots;
  for (const step of loc.steps) {
    let next = [];
    for (const r of current) for (const el of select(r, step.selector)) if (!next.includes(el)) next.push(el);
    for (const f of step.filters) {
      if (f.filter === 'has_text') next = next.filter(el => matchText(f.text, textOf(el)));
      else next = next.filter(el => resolve(f.inner, [el]).length > 0);
    }
    if (step.nth != null) {
      const i = step.nth === 'first' ? 0 : step.nth === 'last' ? next.length - 1 : step.nth.index;
      next = i >= 0 && i < next.length ? [next[i]] : [];
    }
    current = next;
  }
  return current;
};
const isVisible = el => {
  const r = el.getBoundingClientRect();
  const s = getComputedStyle(el);
  return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none';
};
"#;

/// Chromium page driven over CDP
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
    poll_interval: Duration,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched
    pub async fn launch(options: &BrowserOptions) -> VitrinaResult<Self> {
        let mut builder =
            CdpConfig::builder().window_size(options.viewport_width, options.viewport_height);

        if !options.headless {
            builder = builder.with_head();
        }

        if !options.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = options.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(VitrinaError::driver)?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| VitrinaError::driver(format!("failed to launch browser: {e}")))?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| VitrinaError::driver(e.to_string()))?;

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            handle,
            poll_interval: Duration::from_millis(50),
        })
    }

    /// Close the browser
    pub async fn close(&self) -> VitrinaResult<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| VitrinaError::driver(e.to_string()))?;
        Ok(())
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> VitrinaResult<T> {
        let page = self.page.lock().await;
        let result = page
            .evaluate(script)
            .await
            .map_err(|e| VitrinaError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| VitrinaError::driver(e.to_string()))
    }

    /// Evaluate `body` with `els` (all matches) and `el` (first match) in scope
    async fn on_matches<T: DeserializeOwned>(
        &self,
        locator: &Locator,
        body: &str,
    ) -> VitrinaResult<T> {
        let script = format!(
            "(() => {{ {RESOLVER} const els = resolve({}, [document]); const el = els[0]; {body} }})()",
            locator.to_json()?
        );
        self.eval(script).await
    }

    /// Run an action on the first match; the body returns `"ok"` when done
    async fn act(&self, action: &str, locator: &Locator, body: &str) -> VitrinaResult<()> {
        let wrapped = format!(
            "if (!el) return 'missing'; if (!isVisible(el)) return 'hidden'; \
             el.scrollIntoView({{block: 'center'}}); {body} return 'ok';"
        );
        match self.on_matches::<String>(locator, &wrapped).await?.as_str() {
            "ok" => Ok(()),
            "missing" => Err(VitrinaError::ElementNotFound {
                target: locator.to_string(),
            }),
            other => Err(VitrinaError::action(
                action,
                locator.to_string(),
                format!("element is {other}"),
            )),
        }
    }

    async fn first_or_missing<T: DeserializeOwned>(
        &self,
        locator: &Locator,
        expr: &str,
    ) -> VitrinaResult<T> {
        let body = format!("return el ? {{ found: true, value: {expr} }} : {{ found: false }};");
        let probe: serde_json::Value = self.on_matches(locator, &body).await?;
        if probe["found"].as_bool() != Some(true) {
            return Err(VitrinaError::ElementNotFound {
                target: locator.to_string(),
            });
        }
        Ok(serde_json::from_value(probe["value"].clone())?)
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> VitrinaResult<()> {
        let ready = match state {
            LoadState::DomContentLoaded => {
                self.poll_expression("document.readyState !== 'loading'", timeout)
                    .await?
            }
            LoadState::Load => {
                self.poll_expression("document.readyState === 'complete'", timeout)
                    .await?
            }
            LoadState::NetworkIdle => self.wait_for_network_idle(timeout).await?,
        };
        if ready {
            Ok(())
        } else {
            Err(VitrinaError::timeout(
                "page load",
                state.to_string(),
                timeout.as_millis() as u64,
            ))
        }
    }

    async fn poll_expression(&self, expr: &'static str, timeout: Duration) -> VitrinaResult<bool> {
        let driver = self;
        poll_until(timeout, self.poll_interval, move || async move {
            driver.eval::<bool>(expr.to_string()).await
        })
        .await
    }

    /// Idle once the resource-entry count stays unchanged for the threshold
    async fn wait_for_network_idle(&self, timeout: Duration) -> VitrinaResult<bool> {
        let threshold = Duration::from_millis(NETWORK_IDLE_THRESHOLD_MS);
        let deadline = tokio::time::Instant::now() + timeout;
        let mut last = usize::MAX;
        let mut stable_since = tokio::time::Instant::now();
        while tokio::time::Instant::now() < deadline {
            let count: usize = self
                .eval(
                    "document.readyState === 'complete' \
                     ? performance.getEntriesByType('resource').length : -1"
                        .to_string(),
                )
                .await
                .map(|n: i64| usize::try_from(n).unwrap_or(usize::MAX))?;
            let now = tokio::time::Instant::now();
            if count != last || count == usize::MAX {
                last = count;
                stable_since = now;
            } else if now.duration_since(stable_since) >= threshold {
                return Ok(true);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        Ok(false)
    }
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn goto(&self, url: &str, until: LoadState, timeout: Duration) -> VitrinaResult<()> {
        let started = tokio::time::Instant::now();
        {
            let page = self.page.lock().await;
            tokio::time::timeout(timeout, page.goto(url))
                .await
                .map_err(|_| VitrinaError::Navigation {
                    url: url.to_string(),
                    message: format!("timed out after {}ms", timeout.as_millis()),
                })?
                .map_err(|e| VitrinaError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }
        let remaining = timeout.saturating_sub(started.elapsed());
        self.wait_for_load_state(until, remaining)
            .await
            .map_err(|e| VitrinaError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn count(&self, locator: &Locator) -> VitrinaResult<usize> {
        self.on_matches(locator, "return els.length;").await
    }

    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.on_matches(locator, "return !!el && isVisible(el);")
            .await
    }

    async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        self.act("click", locator, "el.click();").await
    }

    async fn fill(&self, locator: &Locator, value: &str) -> VitrinaResult<()> {
        let body = format!(
            "el.focus(); \
             const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
             Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {}); \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }}));",
            serde_json::to_string(value)?
        );
        self.act("fill", locator, &body).await
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> VitrinaResult<()> {
        let action = if checked { "check" } else { "uncheck" };
        let body = format!("if (el.checked !== {checked}) el.click();");
        self.act(action, locator, &body).await
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> VitrinaResult<()> {
        let body = format!(
            "el.value = {}; el.dispatchEvent(new Event('change', {{ bubbles: true }}));",
            serde_json::to_string(value)?
        );
        self.act("select", locator, &body).await
    }

    async fn is_checked(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.first_or_missing(locator, "!!el.checked").await
    }

    async fn text_content(&self, locator: &Locator) -> VitrinaResult<String> {
        self.first_or_missing(locator, "el.textContent ?? ''").await
    }

    async fn all_text_contents(&self, locator: &Locator) -> VitrinaResult<Vec<String>> {
        self.on_matches(locator, "return els.map(e => e.textContent ?? '');")
            .await
    }

    async fn input_value(&self, locator: &Locator) -> VitrinaResult<String> {
        self.first_or_missing(locator, "el.value ?? ''").await
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> VitrinaResult<Option<String>> {
        let expr = format!("el.getAttribute({})", serde_json::to_string(name)?);
        self.first_or_missing(locator, &expr).await
    }

    async fn ancestor_has_class(
        &self,
        locator: &Locator,
        ancestor: &str,
        class: &str,
    ) -> VitrinaResult<bool> {
        let expr = format!(
            "(() => {{ const a = el.closest({}); return !!a && a.classList.contains({}); }})()",
            serde_json::to_string(ancestor)?,
            serde_json::to_string(class)?
        );
        self.first_or_missing(locator, &expr).await
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        let page = self.page.lock().await;
        let url = page
            .url()
            .await
            .map_err(|e| VitrinaError::driver(e.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn title(&self) -> VitrinaResult<String> {
        let page = self.page.lock().await;
        let title = page
            .get_title()
            .await
            .map_err(|e| VitrinaError::driver(e.to_string()))?;
        Ok(title.unwrap_or_default())
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        let screenshot = page
            .execute(params)
            .await
            .map_err(|e| VitrinaError::driver(format!("screenshot failed: {e}")))?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| VitrinaError::driver(format!("screenshot failed: {e}")))
    }
}
