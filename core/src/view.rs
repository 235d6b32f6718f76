//! View-binding capability the controller drives.
//!
//! # Design
//! The controller never queries a document. It talks to a `ViewBinding`
//! that resolves each [`Role`] to whatever the host platform uses for UI
//! elements. [`MemoryView`] is a headless implementation backed by a map,
//! for hosts without a UI and for tests.

use std::collections::BTreeMap;
use std::fmt;

use crate::http::HttpMethod;
use crate::render::{HEADERS_TABLE_CLASS, SHOW_HEADERS_CLASS, SUCCESS_CLASS};

/// A UI element identified by what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Form,
    SubmitButton,
    UrlInput,
    /// Button showing the selected method and opening the menu.
    MethodTrigger,
    MethodOption(HttpMethod),
    /// Container of the advanced headers/body fields.
    MoreOptions,
    MoreOptionsToggle,
    HeadersInput,
    BodyInput,
    BodyNotice,
    Result,
    /// Only exists while a rendered result has unrevealed headers.
    ShowHeadersLink,
    /// Only exists while a rendered result has headers.
    HeadersTable,
}

impl Role {
    /// Roles that must be present for the controller to start.
    pub fn required() -> Vec<Role> {
        let mut roles = vec![
            Role::Form,
            Role::SubmitButton,
            Role::UrlInput,
            Role::MethodTrigger,
        ];
        roles.extend(HttpMethod::ALL.into_iter().map(Role::MethodOption));
        roles.extend([
            Role::MoreOptions,
            Role::MoreOptionsToggle,
            Role::HeadersInput,
            Role::BodyInput,
            Role::BodyNotice,
            Role::Result,
        ]);
        roles
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Form => f.write_str("form"),
            Role::SubmitButton => f.write_str("submit button"),
            Role::UrlInput => f.write_str("url input"),
            Role::MethodTrigger => f.write_str("method trigger"),
            Role::MethodOption(m) => write!(f, "method option {m}"),
            Role::MoreOptions => f.write_str("more options panel"),
            Role::MoreOptionsToggle => f.write_str("more options toggle"),
            Role::HeadersInput => f.write_str("headers input"),
            Role::BodyInput => f.write_str("body input"),
            Role::BodyNotice => f.write_str("body notice"),
            Role::Result => f.write_str("result container"),
            Role::ShowHeadersLink => f.write_str("show headers link"),
            Role::HeadersTable => f.write_str("headers table"),
        }
    }
}

/// Operations the controller needs from the host's UI.
///
/// Calls addressing a role the view does not have are ignored.
pub trait ViewBinding {
    fn has(&self, role: Role) -> bool;

    /// Current value of an input field; empty when the role is absent.
    fn value(&self, role: Role) -> String;
    fn set_value(&mut self, role: Role, value: &str);

    fn set_text(&mut self, role: Role, text: &str);
    fn set_visible(&mut self, role: Role, visible: bool);
    fn set_enabled(&mut self, role: Role, enabled: bool);

    /// Replace the element's content with an HTML fragment.
    fn set_html(&mut self, role: Role, html: &str);

    fn remove(&mut self, role: Role);
}

/// State of one element in a [`MemoryView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub value: String,
    pub text: String,
    pub html: String,
    pub visible: bool,
    pub enabled: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            value: String::new(),
            text: String::new(),
            html: String::new(),
            visible: true,
            enabled: true,
        }
    }
}

/// In-memory view.
///
/// Setting HTML on [`Role::Result`] re-indexes the fragment the way a DOM
/// query would: `ShowHeadersLink` and `HeadersTable` exist afterwards only if
/// a success fragment carries their class attributes.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    elements: BTreeMap<Role, Element>,
}

impl MemoryView {
    /// A view holding every required role.
    pub fn complete() -> Self {
        let mut view = Self::default();
        for role in Role::required() {
            view.insert(role);
        }
        view
    }

    pub fn insert(&mut self, role: Role) {
        self.elements.entry(role).or_default();
    }

    pub fn without(mut self, role: Role) -> Self {
        self.elements.remove(&role);
        self
    }

    pub fn element(&self, role: Role) -> Option<&Element> {
        self.elements.get(&role)
    }

    pub fn is_visible(&self, role: Role) -> bool {
        self.element(role).is_some_and(|e| e.visible)
    }

    pub fn is_enabled(&self, role: Role) -> bool {
        self.element(role).is_some_and(|e| e.enabled)
    }

    pub fn text(&self, role: Role) -> &str {
        self.element(role).map_or("", |e| e.text.as_str())
    }

    pub fn html(&self, role: Role) -> &str {
        self.element(role).map_or("", |e| e.html.as_str())
    }

    fn with<F: FnOnce(&mut Element)>(&mut self, role: Role, f: F) {
        if let Some(element) = self.elements.get_mut(&role) {
            f(element);
        }
    }

    fn index_result_fragment(&mut self, html: &str) {
        self.elements.remove(&Role::ShowHeadersLink);
        self.elements.remove(&Role::HeadersTable);
        // Escaped data cannot contain `"`, so a full class attribute can only
        // come from the markup itself.
        if !html.starts_with(&format!("<div class=\"{SUCCESS_CLASS}\">")) {
            return;
        }
        if html.contains(&format!("class=\"{SHOW_HEADERS_CLASS}\"")) {
            self.insert(Role::ShowHeadersLink);
        }
        if html.contains(&format!("class=\"{HEADERS_TABLE_CLASS}\"")) {
            self.elements.insert(
                Role::HeadersTable,
                Element {
                    visible: false,
                    ..Element::default()
                },
            );
        }
    }
}

impl ViewBinding for MemoryView {
    fn has(&self, role: Role) -> bool {
        self.elements.contains_key(&role)
    }

    fn value(&self, role: Role) -> String {
        self.element(role).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, role: Role, value: &str) {
        self.with(role, |e| e.value = value.to_string());
    }

    fn set_text(&mut self, role: Role, text: &str) {
        self.with(role, |e| e.text = text.to_string());
    }

    fn set_visible(&mut self, role: Role, visible: bool) {
        self.with(role, |e| e.visible = visible);
    }

    fn set_enabled(&mut self, role: Role, enabled: bool) {
        self.with(role, |e| e.enabled = enabled);
    }

    fn set_html(&mut self, role: Role, html: &str) {
        if !self.has(role) {
            return;
        }
        self.with(role, |e| e.html = html.to_string());
        if role == Role::Result {
            self.index_result_fragment(html);
        }
    }

    fn remove(&mut self, role: Role) {
        self.elements.remove(&role);
    }
}
