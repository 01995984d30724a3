//! BrowserDriver - Abstract Browser Automation Capability
//!
//! Pages and components talk to the browser only through [`BrowserDriver`].
//! Any backend offering these operations is substitutable:
//!
//! - `ChromiumDriver` (feature `browser`) drives Chromium over CDP
//! - [`MockDriver`] resolves locators against an in-memory DOM for unit tests
//!
//! Actions act on the first match of a locator. They do not wait; callers wait
//! for the state they need first (see [`BrowserDriver::wait_for`]).

use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{wait_until, ElementState, LoadState, UrlPattern};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Abstract driver trait for browser automation
#[async_trait]
pub trait BrowserDriver: Send + Sync + fmt::Debug {
    /// Navigate and wait for `until` within `timeout`
    async fn goto(&self, url: &str, until: LoadState, timeout: Duration) -> VitrinaResult<()>;

    /// Number of attached matches
    async fn count(&self, locator: &Locator) -> VitrinaResult<usize>;

    /// Whether the first match is rendered; `false` when nothing matches
    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool>;

    /// Click the first match
    async fn click(&self, locator: &Locator) -> VitrinaResult<()>;

    /// Replace the value of the first matching input
    async fn fill(&self, locator: &Locator, value: &str) -> VitrinaResult<()>;

    /// Check or uncheck the first matching checkbox
    async fn set_checked(&self, locator: &Locator, checked: bool) -> VitrinaResult<()>;

    /// Select an option of the first matching `<select>` by value
    async fn select_option(&self, locator: &Locator, value: &str) -> VitrinaResult<()>;

    /// Checked state of the first match
    async fn is_checked(&self, locator: &Locator) -> VitrinaResult<bool>;

    /// Text content of the first match
    async fn text_content(&self, locator: &Locator) -> VitrinaResult<String>;

    /// Text content of every match, in document order
    async fn all_text_contents(&self, locator: &Locator) -> VitrinaResult<Vec<String>>;

    /// Current value of the first matching form control
    async fn input_value(&self, locator: &Locator) -> VitrinaResult<String>;

    /// Attribute of the first match
    async fn attribute(&self, locator: &Locator, name: &str) -> VitrinaResult<Option<String>>;

    /// Whether the closest `ancestor` of the first match carries `class`
    async fn ancestor_has_class(
        &self,
        locator: &Locator,
        ancestor: &str,
        class: &str,
    ) -> VitrinaResult<bool>;

    /// Current page URL
    async fn current_url(&self) -> VitrinaResult<String>;

    /// Document title
    async fn title(&self) -> VitrinaResult<String>;

    /// PNG screenshot of the viewport
    async fn screenshot(&self) -> VitrinaResult<Vec<u8>>;

    /// Suspend for a fixed period
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Wait until the first match reaches `state`
    async fn wait_for(
        &self,
        locator: &Locator,
        state: ElementState,
        timeout: Duration,
        interval: Duration,
    ) -> VitrinaResult<()> {
        let driver = self;
        let what = locator.to_string();
        wait_until(&what, &state.to_string(), timeout, interval, move || async move {
            let attached = driver.count(locator).await? > 0;
            let visible = attached && driver.is_visible(locator).await?;
            Ok(state.holds(attached, visible))
        })
        .await
    }

    /// Wait until the page URL matches `pattern`
    async fn wait_for_url(
        &self,
        pattern: &UrlPattern,
        timeout: Duration,
        interval: Duration,
    ) -> VitrinaResult<()> {
        let driver = self;
        let what = format!("URL {pattern}");
        wait_until(&what, "reached", timeout, interval, move || async move {
            Ok(pattern.matches(&driver.current_url().await?))
        })
        .await
    }
}

// =============================================================================
// MOCK DRIVER
// =============================================================================

/// One element in the mock DOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockNode {
    pub text: String,
    pub value: String,
    pub visible: bool,
    pub checked: bool,
    pub attributes: HashMap<String, String>,
    /// Ancestors as `tag.class` entries, e.g. `li.disabled`
    pub ancestor_classes: Vec<String>,
}

impl MockNode {
    /// Visible element with text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: String::new(),
            visible: true,
            checked: false,
            attributes: HashMap::new(),
            ancestor_classes: Vec::new(),
        }
    }

    /// Visible form control with a value
    #[must_use]
    pub fn input(value: impl Into<String>) -> Self {
        Self::new("").with_value(value)
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Nest inside an ancestor carrying `class`
    #[must_use]
    pub fn within(mut self, ancestor: &str, class: &str) -> Self {
        self.ancestor_classes.push(format!("{ancestor}.{class}"));
        self
    }
}

/// Hook run after an action on a locator, used to script DOM transitions
pub type ActionHook = Arc<dyn Fn(&mut MockDom) + Send + Sync>;

/// In-memory document state behind [`MockDriver`]
#[derive(Default)]
pub struct MockDom {
    elements: HashMap<String, Vec<MockNode>>,
    hooks: HashMap<String, ActionHook>,
    /// Current URL
    pub url: String,
    /// Document title
    pub title: String,
    /// Remaining navigations that fail before one succeeds
    pub failing_navigations: u32,
    /// Screenshot bytes returned by `screenshot`
    pub screenshot: Vec<u8>,
    /// Call history for verification
    pub call_history: Vec<String>,
}

impl fmt::Debug for MockDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.elements.keys().collect();
        keys.sort();
        f.debug_struct("MockDom")
            .field("url", &self.url)
            .field("elements", &keys)
            .field("hooks", &self.hooks.len())
            .field("call_history", &self.call_history.len())
            .finish()
    }
}

impl MockDom {
    /// Replace all matches of a locator
    pub fn set(&mut self, locator: &Locator, nodes: Vec<MockNode>) {
        self.elements.insert(locator.to_string(), nodes);
    }

    /// Make a locator match nothing
    pub fn remove(&mut self, locator: &Locator) {
        self.elements.remove(&locator.to_string());
    }

    /// Mutable access to the nodes of a locator, creating an empty list
    pub fn nodes_mut(&mut self, locator: &Locator) -> &mut Vec<MockNode> {
        self.elements.entry(locator.to_string()).or_default()
    }

    /// Resolve a locator, honouring a trailing nth pick
    #[must_use]
    pub fn resolve(&self, locator: &Locator) -> Vec<MockNode> {
        if let Some(nodes) = self.elements.get(&locator.to_string()) {
            return nodes.clone();
        }
        let (base, nth) = locator.split_nth();
        match (nth, self.elements.get(&base.to_string())) {
            (Some(nth), Some(nodes)) => nth
                .resolve(nodes.len())
                .map(|i| vec![nodes[i].clone()])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn first_mut(&mut self, locator: &Locator) -> Option<&mut MockNode> {
        let key = locator.to_string();
        if self.elements.contains_key(&key) {
            return self.elements.get_mut(&key).and_then(|n| n.first_mut());
        }
        let (base, nth) = locator.split_nth();
        let nodes = self.elements.get_mut(&base.to_string())?;
        let index = nth?.resolve(nodes.len())?;
        nodes.get_mut(index)
    }

    fn run_hook(&mut self, locator: &Locator) {
        if let Some(hook) = self.hooks.get(&locator.to_string()).cloned() {
            hook(self);
        }
    }
}

/// Mock driver for unit testing
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    dom: Arc<Mutex<MockDom>>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        let driver = Self::default();
        driver.dom().title = "Practice Software Testing - Toolshop".to_string();
        driver.dom().screenshot = b"\x89PNG\r\n\x1a\n".to_vec();
        driver
    }

    fn dom(&self) -> MutexGuard<'_, MockDom> {
        self.dom
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Run a closure against the mock DOM
    pub fn with_dom<R>(&self, f: impl FnOnce(&mut MockDom) -> R) -> R {
        f(&mut self.dom())
    }

    /// Replace all matches of a locator
    pub fn set_elements(&self, locator: &Locator, nodes: Vec<MockNode>) {
        self.dom().set(locator, nodes);
    }

    /// Single match for a locator
    pub fn set_element(&self, locator: &Locator, node: MockNode) {
        self.dom().set(locator, vec![node]);
    }

    /// Visible matches with the given texts
    pub fn set_texts(&self, locator: &Locator, texts: &[&str]) {
        self.dom()
            .set(locator, texts.iter().map(|t| MockNode::new(*t)).collect());
    }

    /// Make a locator match nothing
    pub fn remove_element(&self, locator: &Locator) {
        self.dom().remove(locator);
    }

    /// Script a DOM transition after clicking, filling or checking `locator`
    pub fn on_action(&self, locator: &Locator, hook: impl Fn(&mut MockDom) + Send + Sync + 'static) {
        self.dom().hooks.insert(locator.to_string(), Arc::new(hook));
    }

    /// Set the current URL
    pub fn set_url(&self, url: impl Into<String>) {
        self.dom().url = url.into();
    }

    /// Fail the next `n` navigations
    pub fn fail_next_navigations(&self, n: u32) {
        self.dom().failing_navigations = n;
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.dom().call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.dom().call_history.iter().any(|c| c.starts_with(prefix))
    }

    /// Number of recorded calls starting with `prefix`
    #[must_use]
    pub fn calls(&self, prefix: &str) -> usize {
        self.dom()
            .call_history
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn act(
        &self,
        action: &str,
        locator: &Locator,
        apply: impl FnOnce(&mut MockNode),
    ) -> VitrinaResult<()> {
        let mut dom = self.dom();
        dom.call_history.push(format!("{action}:{locator}"));
        let node = dom.first_mut(locator).ok_or_else(|| VitrinaError::ElementNotFound {
            target: locator.to_string(),
        })?;
        if !node.visible {
            return Err(VitrinaError::action(
                action,
                locator.to_string(),
                "element is not visible",
            ));
        }
        apply(node);
        dom.run_hook(locator);
        Ok(())
    }

    fn first(&self, locator: &Locator) -> VitrinaResult<MockNode> {
        self.dom()
            .resolve(locator)
            .into_iter()
            .next()
            .ok_or_else(|| VitrinaError::ElementNotFound {
                target: locator.to_string(),
            })
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn goto(&self, url: &str, until: LoadState, _timeout: Duration) -> VitrinaResult<()> {
        let mut dom = self.dom();
        dom.call_history.push(format!("goto:{url}:{until}"));
        if dom.failing_navigations > 0 {
            dom.failing_navigations -= 1;
            return Err(VitrinaError::Navigation {
                url: url.to_string(),
                message: format!("net::ERR_CONNECTION_RESET while waiting for {until}"),
            });
        }
        dom.url = url.to_string();
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> VitrinaResult<usize> {
        Ok(self.dom().resolve(locator).len())
    }

    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        Ok(self
            .dom()
            .resolve(locator)
            .first()
            .is_some_and(|n| n.visible))
    }

    async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        self.act("click", locator, |_| {})
    }

    async fn fill(&self, locator: &Locator, value: &str) -> VitrinaResult<()> {
        self.act("fill", locator, |node| node.value = value.to_string())
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> VitrinaResult<()> {
        let action = if checked { "check" } else { "uncheck" };
        self.act(action, locator, |node| node.checked = checked)
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> VitrinaResult<()> {
        self.act("select", locator, |node| node.value = value.to_string())
    }

    async fn is_checked(&self, locator: &Locator) -> VitrinaResult<bool> {
        Ok(self.first(locator)?.checked)
    }

    async fn text_content(&self, locator: &Locator) -> VitrinaResult<String> {
        Ok(self.first(locator)?.text)
    }

    async fn all_text_contents(&self, locator: &Locator) -> VitrinaResult<Vec<String>> {
        Ok(self
            .dom()
            .resolve(locator)
            .into_iter()
            .map(|n| n.text)
            .collect())
    }

    async fn input_value(&self, locator: &Locator) -> VitrinaResult<String> {
        Ok(self.first(locator)?.value)
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> VitrinaResult<Option<String>> {
        Ok(self.first(locator)?.attributes.get(name).cloned())
    }

    async fn ancestor_has_class(
        &self,
        locator: &Locator,
        ancestor: &str,
        class: &str,
    ) -> VitrinaResult<bool> {
        let wanted = format!("{ancestor}.{class}");
        Ok(self
            .first(locator)?
            .ancestor_classes
            .iter()
            .any(|c| *c == wanted))
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        Ok(self.dom().url.clone())
    }

    async fn title(&self) -> VitrinaResult<String> {
        Ok(self.dom().title.clone())
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        let mut dom = self.dom();
        dom.call_history.push("screenshot".to_string());
        Ok(dom.screenshot.clone())
    }

    async fn pause(&self, duration: Duration) {
        self.dom()
            .call_history
            .push(format!("pause:{}", duration.as_millis()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(30);
    const POLL: Duration = Duration::from_millis(2);

    mod mock_dom_tests {
        use super::*;

        #[tokio::test]
        async fn test_nth_resolves_from_base_list() {
            let driver = MockDriver::new();
            let names = Locator::test_id("product-name");
            driver.set_texts(&names, &["Pliers", "Hammer", "Saw"]);
            assert_eq!(driver.text_content(&names.clone().nth(1)).await.unwrap(), "Hammer");
            assert_eq!(driver.text_content(&names.clone().last()).await.unwrap(), "Saw");
            assert_eq!(driver.count(&names.clone().nth(5)).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_click_missing_element() {
            let driver = MockDriver::new();
            let err = driver.click(&Locator::css("a.card")).await.unwrap_err();
            assert!(matches!(err, VitrinaError::ElementNotFound { .. }));
            assert!(driver.was_called("click:a.card"));
        }

        #[tokio::test]
        async fn test_click_hidden_element_fails() {
            let driver = MockDriver::new();
            let next = Locator::css("a[aria-label=\"Next\"]");
            driver.set_element(&next, MockNode::new("»").hidden());
            let err = driver.click(&next).await.unwrap_err();
            assert!(matches!(err, VitrinaError::ActionFailed { .. }));
        }

        #[tokio::test]
        async fn test_action_hook_mutates_dom() {
            let driver = MockDriver::new();
            let button = Locator::test_id("add-to-cart");
            let toast = Locator::css("div.toast-success");
            driver.set_element(&button, MockNode::new("Add to cart"));
            let t = toast.clone();
            driver.on_action(&button, move |dom| dom.set(&t, vec![MockNode::new("added")]));
            driver.click(&button).await.unwrap();
            assert!(driver.is_visible(&toast).await.unwrap());
        }

        #[tokio::test]
        async fn test_fill_and_check_update_node() {
            let driver = MockDriver::new();
            let phone = Locator::test_id("phone");
            let eco = Locator::test_id("eco-friendly-filter");
            driver.set_element(&phone, MockNode::input("1"));
            driver.set_element(&eco, MockNode::new(""));
            driver.fill(&phone, "3384518342").await.unwrap();
            driver.set_checked(&eco, true).await.unwrap();
            assert_eq!(driver.input_value(&phone).await.unwrap(), "3384518342");
            assert!(driver.is_checked(&eco).await.unwrap());
        }
    }

    mod wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_visible_times_out_with_locator() {
            let driver = MockDriver::new();
            let err = driver
                .wait_for(&Locator::css("a.card"), ElementState::Visible, WAIT, POLL)
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(err.to_string().contains("a.card"));
            assert!(err.to_string().contains("visible"));
        }

        #[tokio::test]
        async fn test_wait_for_detached_and_attached() {
            let driver = MockDriver::new();
            let marker = Locator::test_id("filter_completed");
            driver
                .wait_for(&marker, ElementState::Detached, WAIT, POLL)
                .await
                .unwrap();
            driver.set_element(&marker, MockNode::new("").hidden());
            driver
                .wait_for(&marker, ElementState::Attached, WAIT, POLL)
                .await
                .unwrap();
            driver
                .wait_for(&marker, ElementState::Hidden, WAIT, POLL)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_url() {
            let driver = MockDriver::new();
            driver.set_url("https://shop.test/account");
            driver
                .wait_for_url(&UrlPattern::glob("**/account"), WAIT, POLL)
                .await
                .unwrap();
            let err = driver
                .wait_for_url(&UrlPattern::glob("**/checkout"), WAIT, POLL)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("**/checkout"));
        }
    }

    #[tokio::test]
    async fn test_failing_navigations_then_success() {
        let driver = MockDriver::new();
        driver.fail_next_navigations(1);
        let url = "https://shop.test/";
        assert!(driver.goto(url, LoadState::DomContentLoaded, WAIT).await.is_err());
        driver.goto(url, LoadState::NetworkIdle, WAIT).await.unwrap();
        assert_eq!(driver.current_url().await.unwrap(), url);
        assert_eq!(driver.calls("goto:"), 2);
    }
}
