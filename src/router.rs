//! View-state router.
//!
//! Models the application's screen flow as a small state machine: which
//! view is active, the payment list filters, and which payment, contact,
//! or project is selected. Selections are stored as ids (or the project
//! name), never as copies of the records, so stale data cannot be rendered
//! after an import replaces the collections.

use tracing::debug;

use crate::models::StatusFilter;

/// The application's views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Stats overview plus recent late payments
    Dashboard,
    /// Filterable list of all payments
    Payments,
    /// Late payments only
    Late,
    /// Contact sheet list
    Contacts,
    /// Per-project aggregates
    Projects,
    /// Sync settings
    Sync,
    /// Single payment, from the current selection
    PaymentDetail,
    /// Single contact, from the current selection
    ContactDetail,
    /// Single project, from the current selection
    ProjectDetail,
}

impl View {
    /// Navbar title for this view.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Payment Tracker",
            Self::Payments => "All Payments",
            Self::Late => "Late Payments",
            Self::Contacts => "Contacts",
            Self::Projects => "Projects",
            Self::Sync => "Sync Settings",
            Self::PaymentDetail => "Payment Details",
            Self::ContactDetail => "Contact Details",
            Self::ProjectDetail => "Project Details",
        }
    }

    /// Whether the navbar shows a back control on this view.
    #[must_use]
    pub const fn shows_back(&self) -> bool {
        matches!(
            self,
            Self::PaymentDetail | Self::ContactDetail | Self::ProjectDetail
        )
    }

    /// Where the back control leads from this view. Detail views return to
    /// their list; everything else returns to the dashboard.
    #[must_use]
    pub const fn back_target(&self) -> View {
        match self {
            Self::PaymentDetail => Self::Payments,
            Self::ContactDetail => Self::Contacts,
            Self::ProjectDetail => Self::Projects,
            _ => Self::Dashboard,
        }
    }

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Payments => "payments",
            Self::Late => "late",
            Self::Contacts => "contacts",
            Self::Projects => "projects",
            Self::Sync => "sync",
            Self::PaymentDetail => "payment_detail",
            Self::ContactDetail => "contact_detail",
            Self::ProjectDetail => "project_detail",
        }
    }
}

/// Navigation and selection state.
///
/// Starts on the dashboard with no filters and nothing selected.
/// Selections survive navigation; a detail view opened without a selection
/// simply has nothing to show.
#[derive(Debug, Clone)]
pub struct Router {
    current_view: View,
    status_filter: StatusFilter,
    project_filter: Option<String>,
    selected_payment: Option<i64>,
    selected_contact: Option<i64>,
    selected_project: Option<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router in its initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_view: View::Dashboard,
            status_filter: StatusFilter::All,
            project_filter: None,
            selected_payment: None,
            selected_contact: None,
            selected_project: None,
        }
    }

    /// The active view.
    #[must_use]
    pub const fn current_view(&self) -> View {
        self.current_view
    }

    /// Switch to the given view.
    pub fn navigate_to(&mut self, view: View) {
        debug!(from = self.current_view.name(), to = view.name(), "navigate");
        self.current_view = view;
    }

    /// Step back from the active view and return the view landed on.
    pub fn go_back(&mut self) -> View {
        let target = self.current_view.back_target();
        self.navigate_to(target);
        target
    }

    /// Select a payment by id and open its detail view.
    pub fn open_payment(&mut self, id: i64) {
        self.selected_payment = Some(id);
        self.navigate_to(View::PaymentDetail);
    }

    /// Select a contact by id and open its detail view.
    pub fn open_contact(&mut self, id: i64) {
        self.selected_contact = Some(id);
        self.navigate_to(View::ContactDetail);
    }

    /// Select a project by name and open its detail view.
    pub fn open_project(&mut self, name: impl Into<String>) {
        self.selected_project = Some(name.into());
        self.navigate_to(View::ProjectDetail);
    }

    /// Status filter applied to the payments view.
    #[must_use]
    pub const fn status_filter(&self) -> &StatusFilter {
        &self.status_filter
    }

    /// Replace the payments status filter.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Project filter applied to the payments view, if any.
    #[must_use]
    pub fn project_filter(&self) -> Option<&str> {
        self.project_filter.as_deref()
    }

    /// Replace the payments project filter; `None` clears it.
    pub fn set_project_filter(&mut self, project: Option<String>) {
        // An empty selection means no filtering.
        self.project_filter = project.filter(|p| !p.is_empty());
    }

    /// Currently selected payment id, if any.
    #[must_use]
    pub const fn selected_payment(&self) -> Option<i64> {
        self.selected_payment
    }

    /// Currently selected contact id, if any.
    #[must_use]
    pub const fn selected_contact(&self) -> Option<i64> {
        self.selected_contact
    }

    /// Currently selected project name, if any.
    #[must_use]
    pub fn selected_project(&self) -> Option<&str> {
        self.selected_project.as_deref()
    }
}
