// Profile view controller
//
// Owns the fetch lifecycle, the deferred view count, the active/inactive gate and the share dialog.
// UI-agnostic: the terminal front end only reads state and forwards user actions.
//
// Async work is split into begin/apply pairs so a UI loop can run the network call on the runtime
// and hand the result back; `load` and `submit` chain both halves for callers that can await.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use uuid::Uuid;

use super::deferred::DeferredTask;
use super::navigation::ProfileViewRequest;
use super::template::{Template, TemplateProps};
use crate::api::service::{ProfileService, ServiceError};
use crate::config::ViewerSettings;
use crate::models::requests::ConnectPayload;
use crate::models::responses::{ApiResponse, ConnectResponse, ProfileRecord};
use crate::notify::Notifier;
use crate::share::{InputProblem, ScrollHost, ShareFormDialog};
use crate::utils::logging::{mask_email, mask_phone};
use crate::utils::validation::{has_required_contact, usable_view_id};

pub const MSG_NOT_FOUND: &str = "Profile not found or is unavailable.";
pub const MSG_UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const MSG_REQUIRED_FIELDS: &str = "Please fill in your Full Name and Phone Number.";
pub const MSG_PROFILE_MISSING: &str = "Profile information is missing. Please refresh the page.";
pub const MSG_CONNECTED: &str = "Connection successful! Your details have been shared.";
pub const MSG_CONNECT_REJECTED: &str = "Connection failed. Please try again.";
pub const MSG_CONNECT_FAILED: &str = "Failed to connect. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// Terminal: no record to show. `message` is the server's reason when it gave one.
    NotFound { message: String },
    Loaded { profile: ProfileRecord, active: bool },
}

/// Identifies one fetch; results for anything but the latest ticket are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    view_id: String,
}

impl FetchTicket {
    pub fn view_id(&self) -> &str {
        &self.view_id
    }
}

/// Why a submit never reached the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("the share dialog is not open")]
    DialogClosed,
    #[error("full name and phone number are required")]
    MissingRequiredFields,
    #[error("no resolved profile view id")]
    MissingProfile,
    #[error("{0}")]
    InvalidInput(InputProblem),
}

/// A validated submission waiting for the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub correlation_id: String,
    pub payload: ConnectPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Shared; dialog closed and form discarded.
    Connected,
    /// Backend answered `success: false`; dialog left open.
    Rejected,
    /// Transport or HTTP failure; dialog left open.
    Failed,
}

pub struct ProfileViewController {
    service: Arc<dyn ProfileService>,
    notifier: Arc<dyn Notifier>,
    runtime: Handle,
    dwell_delay: Duration,
    scroll: ScrollHost,

    generation: u64,
    state: ProfileState,
    view_timer: Option<DeferredTask>,
    dialog: Option<ShareFormDialog>,
    connecting: bool,
}

impl ProfileViewController {
    pub fn new(
        service: Arc<dyn ProfileService>,
        notifier: Arc<dyn Notifier>,
        runtime: Handle,
        settings: &ViewerSettings,
    ) -> Self {
        Self {
            service,
            notifier,
            runtime,
            dwell_delay: settings.dwell_delay(),
            scroll: ScrollHost::new(),
            generation: 0,
            state: ProfileState::Idle,
            view_timer: None,
            dialog: None,
            connecting: false,
        }
    }

    pub fn service(&self) -> Arc<dyn ProfileService> {
        Arc::clone(&self.service)
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    pub fn scroll_host(&self) -> &ScrollHost {
        &self.scroll
    }

    // -------------------------------------------------------------------------
    // Read side
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ProfileState::Loading)
    }

    pub fn profile(&self) -> Option<&ProfileRecord> {
        match &self.state {
            ProfileState::Loaded { profile, .. } => Some(profile),
            _ => None,
        }
    }

    /// Active iff the backend reported success AND the record is flagged active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ProfileState::Loaded { active: true, .. })
    }

    /// The warning banner precedes the template of every loaded, inactive profile.
    pub fn show_inactive_banner(&self) -> bool {
        matches!(self.state, ProfileState::Loaded { active: false, .. })
    }

    pub fn connect_disabled(&self) -> bool {
        !self.is_active()
    }

    pub fn template(&self) -> Option<Template> {
        self.profile()
            .map(|p| Template::for_design(p.design_type.as_deref()))
    }

    pub fn template_props(&self) -> Option<TemplateProps<'_>> {
        let profile = self.profile()?;
        Some(TemplateProps {
            template: Template::for_design(profile.design_type.as_deref()),
            profile,
            connect_disabled: self.connect_disabled(),
        })
    }

    /// Profile id the dwell timer is armed for, if any.
    pub fn armed_view_count(&self) -> Option<&str> {
        self.view_timer.as_ref().map(|t| t.key())
    }

    // -------------------------------------------------------------------------
    // Fetch
    // -------------------------------------------------------------------------

    /// Start a fetch for `request`. Without a usable view id the state goes straight to
    /// `NotFound` and no request is made.
    pub fn begin_fetch(&mut self, request: &ProfileViewRequest) -> Option<FetchTicket> {
        let Some(view_id) = request.view_id() else {
            info!("[PHASE: profile] [STEP: fetch] No view id in link; nothing to fetch");
            self.settle_not_found(None);
            return None;
        };

        self.generation += 1;
        self.state = ProfileState::Loading;
        info!(
            "[PHASE: profile] [STEP: fetch] Requesting profile view_id={} (generation={})",
            view_id, self.generation
        );
        Some(FetchTicket {
            generation: self.generation,
            view_id: view_id.to_string(),
        })
    }

    /// Apply the result of a fetch started by `begin_fetch`. Stale tickets are ignored.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ApiResponse<ProfileRecord>, ServiceError>,
    ) {
        if ticket.generation != self.generation {
            debug!(
                "[PHASE: profile] [STEP: fetch] Dropping stale result for view_id={} (generation {} != {})",
                ticket.view_id, ticket.generation, self.generation
            );
            return;
        }

        match result {
            Ok(resp) if resp.success => {
                let message = resp.message().map(str::to_string);
                match resp.data {
                    Some(profile) => self.settle_loaded(profile),
                    None => self.settle_not_found(message),
                }
            }
            Ok(resp) => {
                info!(
                    "[PHASE: profile] [STEP: fetch] Backend reported failure for view_id={}: {}",
                    ticket.view_id,
                    resp.message().unwrap_or("<no message>")
                );
                let message = resp.message().map(str::to_string);
                self.settle_not_found(message);
            }
            Err(e) => {
                warn!(
                    "[PHASE: profile] [STEP: fetch] Fetch failed for view_id={}: {}",
                    ticket.view_id, e
                );
                let message = e.server_message().map(str::to_string);
                self.settle_not_found(message);
            }
        }
    }

    /// Fetch and apply in one go.
    pub async fn load(&mut self, request: &ProfileViewRequest) {
        let Some(ticket) = self.begin_fetch(request) else {
            return;
        };
        let result = self.service.fetch_profile(ticket.view_id()).await;
        self.apply_fetch(ticket, result);
    }

    fn settle_not_found(&mut self, message: Option<String>) {
        self.view_timer = None;
        self.dialog = None;
        self.state = ProfileState::NotFound {
            message: message.unwrap_or_else(|| MSG_UNKNOWN_ERROR.to_string()),
        };
    }

    fn settle_loaded(&mut self, profile: ProfileRecord) {
        let active = profile.is_active;
        info!(
            "[PHASE: profile] [STEP: resolved] Profile resolved (active={}, template={:?})",
            active,
            Template::for_design(profile.design_type.as_deref())
        );

        match profile.profile_id() {
            Some(id) => self.arm_view_count(id),
            None => self.view_timer = None,
        }
        if !active {
            self.dialog = None;
        }
        self.state = ProfileState::Loaded { profile, active };
    }

    /// One pending view count per profile id: same id keeps the existing timer, a different id
    /// replaces (and so cancels) it.
    fn arm_view_count(&mut self, profile_id: &str) {
        if self.armed_view_count() == Some(profile_id) {
            return;
        }

        let service = Arc::clone(&self.service);
        let id = profile_id.to_string();
        debug!(
            "[PHASE: profile] [STEP: view_count] Counting view for {} in {:?}",
            id, self.dwell_delay
        );
        self.view_timer = Some(DeferredTask::schedule(
            &self.runtime,
            profile_id,
            self.dwell_delay,
            move || async move {
                match service.increment_views(&id).await {
                    Ok(()) => debug!("[PHASE: profile] [STEP: view_count] View counted for {}", id),
                    Err(e) => warn!(
                        "[PHASE: profile] [STEP: view_count] View increment failed for {}: {}",
                        id, e
                    ),
                }
            },
        ));
    }

    // -------------------------------------------------------------------------
    // Share dialog
    // -------------------------------------------------------------------------

    pub fn dialog(&self) -> Option<&ShareFormDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut ShareFormDialog> {
        self.dialog.as_mut()
    }

    pub fn is_share_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    /// Closed → Open. Refused while the connect action is disabled. Re-opening an open dialog
    /// keeps the current session.
    pub fn open_share(&mut self) -> bool {
        if self.connect_disabled() {
            debug!("[PHASE: share] [STEP: open] Share refused: profile is not active");
            return false;
        }
        if self.dialog.is_none() {
            info!("[PHASE: share] [STEP: open] Share dialog opened");
            self.dialog = Some(ShareFormDialog::open(&self.scroll));
        }
        true
    }

    /// Open → Closed. Drops the form and releases the scroll lock.
    pub fn close_share(&mut self) {
        if self.dialog.take().is_some() {
            info!("[PHASE: share] [STEP: close] Share dialog closed");
        }
    }

    /// Validate and build the payload. On success the submit control is disabled until
    /// `finish_submit` runs.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitRejected> {
        if self.connecting {
            debug!("[PHASE: share] [STEP: submit] Ignored: submission already in flight");
            return Err(SubmitRejected::AlreadySubmitting);
        }
        let Some(dialog) = self.dialog.as_ref() else {
            return Err(SubmitRejected::DialogClosed);
        };
        let form = dialog.form();

        if !has_required_contact(&form.full_name, &form.phone) {
            self.notifier.error(MSG_REQUIRED_FIELDS);
            return Err(SubmitRejected::MissingRequiredFields);
        }
        if let Err(problem) = dialog.check_inputs() {
            self.notifier.error(&problem.to_string());
            return Err(SubmitRejected::InvalidInput(problem));
        }

        let view_id = self
            .profile()
            .and_then(|p| usable_view_id(p.view_id.as_deref()));
        let Some(view_id) = view_id else {
            self.notifier.error(MSG_PROFILE_MISSING);
            return Err(SubmitRejected::MissingProfile);
        };

        let payload = ConnectPayload::from_form(view_id, form);
        let correlation_id = Uuid::new_v4().simple().to_string();
        info!(
            "[PHASE: share] [STEP: submit] Submitting connect request (correlation_id={}, phone={}, email={})",
            correlation_id,
            mask_phone(&payload.phone_number),
            mask_email(&payload.email)
        );

        self.connecting = true;
        Ok(PendingSubmit {
            correlation_id,
            payload,
        })
    }

    /// Report the outcome of a submission started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        pending: &PendingSubmit,
        result: Result<ConnectResponse, ServiceError>,
    ) -> SubmitOutcome {
        self.connecting = false;

        match result {
            Ok(resp) if resp.success => {
                info!(
                    "[PHASE: share] [STEP: submit] Connected (correlation_id={})",
                    pending.correlation_id
                );
                self.notifier.success(MSG_CONNECTED);
                self.close_share();
                SubmitOutcome::Connected
            }
            Ok(resp) => {
                warn!(
                    "[PHASE: share] [STEP: submit] Backend rejected connect (correlation_id={}): {}",
                    pending.correlation_id,
                    resp.message().unwrap_or("<no message>")
                );
                self.notifier
                    .error(resp.message().unwrap_or(MSG_CONNECT_REJECTED));
                SubmitOutcome::Rejected
            }
            Err(e) => {
                warn!(
                    "[PHASE: share] [STEP: submit] Connect failed (correlation_id={}): {}",
                    pending.correlation_id, e
                );
                self.notifier
                    .error(e.server_message().unwrap_or(MSG_CONNECT_FAILED));
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate, send and report in one go.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitRejected> {
        let pending = self.begin_submit()?;
        let result = self.service.connect(&pending.payload).await;
        Ok(self.finish_submit(&pending, result))
    }
}
