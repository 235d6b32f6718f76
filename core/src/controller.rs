//! Form controller: UI state, event handlers and the submit round-trip.
//!
//! # Design
//! `FormController` owns its `UiState` and a `ViewBinding`; the host calls
//! one method per UI event. Submitting is split around the single suspend
//! point: `begin_submit` hands the host an `HttpRequest` together with a
//! `SubmissionTicket`, and `complete_submit` takes the ticket back along with
//! whatever the round-trip produced. While a ticket is outstanding the submit
//! control stays disabled, and a ticket that is no longer current (see
//! `abandon`) is dropped without touching the view.

use tracing::{debug, info, warn};

use crate::client::InspectorClient;
use crate::config::ControllerConfig;
use crate::error::{ConfigError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::render;
use crate::types::{ResultPayload, SubmissionRequest};
use crate::view::{Role, ViewBinding};

/// Interaction state of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub selected_method: HttpMethod,
    pub default_headers: String,
    pub more_options_visible: bool,
}

impl UiState {
    pub fn new(default_headers: impl Into<String>) -> Self {
        Self {
            selected_method: HttpMethod::Get,
            default_headers: default_headers.into(),
            more_options_visible: false,
        }
    }

    pub fn body_notice_visible(&self) -> bool {
        self.selected_method.is_bodyless()
    }
}

/// Identifies one submission between `begin_submit` and `complete_submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

/// A submission waiting for the host to execute `request`.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub submission: SubmissionRequest,
    pub request: HttpRequest,
}

/// What `complete_submit` did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Status, cookies and headers were rendered.
    Inspected,
    /// The server reported an application-level error, rendered verbatim.
    Rejected,
    /// Transport or protocol failure, rendered as a generic message.
    Failed,
    /// The ticket was outdated; the view was left alone.
    Stale,
}

pub struct FormController<V: ViewBinding> {
    view: V,
    state: UiState,
    client: InspectorClient,
    fallback_message: String,
    generation: u64,
    in_flight: Option<u64>,
    headers_collapsed: bool,
}

impl<V: ViewBinding> FormController<V> {
    /// Bind to `view` and bring it to the initial state.
    ///
    /// Fails with the first missing required element instead of starting
    /// half-wired.
    pub fn new(view: V, config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(missing) = Role::required().into_iter().find(|r| !view.has(*r)) {
            return Err(ConfigError::MissingElement(missing));
        }

        let mut controller = Self {
            view,
            state: UiState::new(config.default_headers),
            client: InspectorClient::new(&config.action_url),
            fallback_message: config.fallback_message,
            generation: 0,
            in_flight: None,
            headers_collapsed: false,
        };

        let method = controller.state.selected_method;
        controller.show_method(method);
        controller.view.set_visible(Role::MoreOptions, false);
        controller.reset_advanced_fields();
        controller.view.set_enabled(Role::SubmitButton, true);
        controller.apply_body_notice();
        debug!(action_url = controller.client.action_url(), "form controller bound");
        Ok(controller)
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// For hosts that write user input (URL, headers, body) into the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The user picked `method` from the menu.
    pub fn select_method(&mut self, method: HttpMethod) {
        debug!(%method, "method selected");
        self.state.selected_method = method;
        self.show_method(method);
        self.apply_body_notice();
    }

    /// The user clicked the "more options" toggle. Collapsing the panel
    /// discards whatever was typed into it.
    pub fn toggle_more_options(&mut self) {
        self.state.more_options_visible = !self.state.more_options_visible;
        let visible = self.state.more_options_visible;
        debug!(visible, "more options toggled");

        self.view.set_visible(Role::MoreOptions, visible);
        if !visible {
            self.reset_advanced_fields();
        }
        self.apply_body_notice();
    }

    /// The form was submitted.
    ///
    /// Returns `None` while an earlier submission is still in flight. The
    /// headers and body fields are sent even when the panel is collapsed.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.in_flight.is_some() {
            debug!("submit ignored, request in flight");
            return None;
        }

        let submission = SubmissionRequest {
            method: self.state.selected_method,
            url: self.view.value(Role::UrlInput),
            headers_text: self.view.value(Role::HeadersInput),
            body_text: self.view.value(Role::BodyInput),
        };
        let request = self.client.build_submission(&submission);

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.headers_collapsed = false;
        self.view.set_html(Role::Result, "");
        self.view.set_enabled(Role::SubmitButton, false);

        debug!(
            generation = self.generation,
            method = %submission.method,
            url = %submission.url,
            "submission dispatched"
        );
        Some(PendingSubmission {
            ticket: SubmissionTicket {
                generation: self.generation,
            },
            submission,
            request,
        })
    }

    /// Render the outcome of the round-trip started by `begin_submit` and
    /// re-enable the submit control.
    pub fn complete_submit(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Completion {
        if self.in_flight != Some(ticket.generation) {
            warn!(generation = ticket.generation, "discarding stale response");
            return Completion::Stale;
        }
        self.in_flight = None;

        let parsed = outcome.map_err(|e| e.detail).and_then(|response| {
            self.client
                .parse_result(response)
                .map_err(|e| Some(e.to_string()))
        });

        let completion = match parsed {
            Ok(ResultPayload::Failure { error }) => {
                info!(%error, "inspection rejected");
                self.view.set_html(Role::Result, &render::render_failure(&error));
                Completion::Rejected
            }
            Ok(ResultPayload::Success(result)) => {
                info!(
                    status = %result.status,
                    cookies = result.cookies.len(),
                    headers = result.headers.len(),
                    "inspection rendered"
                );
                self.headers_collapsed = !result.headers.is_empty();
                self.view.set_html(Role::Result, &render::render_success(&result));
                Completion::Inspected
            }
            Err(detail) => {
                warn!(detail = detail.as_deref().unwrap_or(""), "inspection request failed");
                let html = render::render_transport_failure(detail.as_deref(), &self.fallback_message);
                self.view.set_html(Role::Result, &html);
                Completion::Failed
            }
        };

        self.view.set_enabled(Role::SubmitButton, true);
        completion
    }

    /// Run a whole submission through a blocking `execute` function.
    pub fn submit_with<F>(&mut self, execute: F) -> Option<Completion>
    where
        F: FnOnce(HttpRequest) -> Result<HttpResponse, TransportError>,
    {
        let pending = self.begin_submit()?;
        let outcome = execute(pending.request);
        Some(self.complete_submit(pending.ticket, outcome))
    }

    /// Forget the in-flight submission, if any. Its response will be
    /// reported as `Completion::Stale` and not rendered.
    pub fn abandon(&mut self) {
        if let Some(generation) = self.in_flight.take() {
            debug!(generation, "submission abandoned");
            self.headers_collapsed = false;
            self.view.set_html(Role::Result, "");
            self.view.set_enabled(Role::SubmitButton, true);
        }
    }

    /// The user clicked "Show headers". Works once per rendered result;
    /// returns whether anything was revealed.
    pub fn show_headers(&mut self) -> bool {
        if !self.headers_collapsed {
            return false;
        }
        self.headers_collapsed = false;
        self.view.set_visible(Role::HeadersTable, true);
        self.view.remove(Role::ShowHeadersLink);
        true
    }

    fn show_method(&mut self, method: HttpMethod) {
        self.view.set_text(Role::MethodTrigger, method.as_str());
        for option in HttpMethod::ALL {
            self.view.set_visible(Role::MethodOption(option), option != method);
        }
    }

    fn reset_advanced_fields(&mut self) {
        self.view.set_value(Role::HeadersInput, &self.state.default_headers);
        self.view.set_value(Role::BodyInput, "");
    }

    fn apply_body_notice(&mut self) {
        let visible = self.state.body_notice_visible();
        self.view.set_visible(Role::BodyNotice, visible);
    }
}
