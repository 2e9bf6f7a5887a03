//! View models derived from the router state and the stored collections.
//!
//! Each view is a plain data structure: the frame carries the navbar title
//! and back-control flag, the body carries exactly the records and
//! aggregates that view presents. Rendering (text, JSON, anything else)
//! happens elsewhere; building a frame never touches the store.

use crate::aggregate;
use crate::models::{
    Contact, DashboardStats, Payment, PaymentFilter, ProjectSummary, StatusFilter, SyncSettings,
};
use crate::router::{Router, View};

/// One renderable screen: navbar state plus the view body.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    /// Navbar title
    pub title: &'static str,
    /// Whether the navbar shows a back control
    pub show_back: bool,
    /// The view's data
    pub body: ViewBody,
}

/// Body of a view frame. Detail bodies are `None` when nothing is selected
/// or the selection no longer resolves; such a view renders empty.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Stats overview plus recent late payments
    Dashboard(DashboardView),
    /// Filterable, searchable payment list
    Payments(PaymentListView),
    /// Late payments ordered by due date
    Late(LateListView),
    /// Contact sheets, searchable
    Contacts(ContactListView),
    /// Per-project aggregates
    Projects(ProjectListView),
    /// Sync settings
    Sync(SyncView),
    /// One payment with its resolved contact
    PaymentDetail(Option<PaymentDetailView>),
    /// One contact sheet
    ContactDetail(Option<ContactDetailView>),
    /// One project with its milestones and contact
    ProjectDetail(Option<ProjectDetailView>),
}

/// Dashboard body: the stat grid and the recent-activity list.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Aggregated counts and amounts
    pub stats: DashboardStats,
    /// Late payments by due date, capped at
    /// [`aggregate::RECENT_LATE_LIMIT`]
    pub recent_late: Vec<Payment>,
}

/// Payments list body.
///
/// With a search query the list holds the matches in stored order and the
/// filters are not applied; otherwise it holds the filtered list sorted by
/// due date.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentListView {
    /// Active status filter
    pub status_filter: StatusFilter,
    /// Active project filter
    pub project_filter: Option<String>,
    /// Search query that produced this list, if any
    pub search: Option<String>,
    /// Distinct project names for the filter control
    pub project_options: Vec<String>,
    /// The payments to show
    pub payments: Vec<Payment>,
}

/// Late-payments body: late milestones ordered by due date.
#[derive(Debug, Clone, PartialEq)]
pub struct LateListView {
    /// Late payments, earliest due first
    pub payments: Vec<Payment>,
}

/// Contacts list body.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactListView {
    /// Search query that produced this list, if any
    pub search: Option<String>,
    /// The contact sheets to show
    pub contacts: Vec<Contact>,
}

/// Projects list body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectListView {
    /// One summary per project, in first-appearance order
    pub projects: Vec<ProjectSummary>,
}

/// Sync settings body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncView {
    /// Stored settings, as configured
    pub settings: SyncSettings,
}

/// Payment detail body.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDetailView {
    /// The selected payment
    pub payment: Payment,
    /// Contact sheet resolved from the payment's project, if any
    pub contact: Option<Contact>,
}

/// Contact detail body.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetailView {
    /// The selected contact
    pub contact: Contact,
}

/// Project detail body with per-project aggregates computed on the spot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetailView {
    /// Project name
    pub name: String,
    /// The project's milestones, in stored order
    pub milestones: Vec<Payment>,
    /// Paid milestones
    pub paid_count: usize,
    /// Late milestones
    pub late_count: usize,
    /// Sum of `amountOwed` over the milestones
    pub total_owed: f64,
    /// Sum of `amountPaidUSD` over the milestones
    pub total_paid: f64,
    /// Contact sheet resolved from the project name, if any
    pub contact: Option<Contact>,
}

/// Build the frame for the router's active view.
///
/// # Arguments
///
/// * `router` - Navigation and selection state
/// * `payments` - All payment milestones
/// * `contacts` - All contact sheets
/// * `sync` - Stored sync settings
/// * `search` - Transient search query for the payments or contacts view
///
/// # Returns
///
/// A [`ViewFrame`] ready for rendering.
#[must_use]
pub fn build_frame(
    router: &Router,
    payments: &[Payment],
    contacts: &[Contact],
    sync: &SyncSettings,
    search: Option<&str>,
) -> ViewFrame {
    let view = router.current_view();
    let body = match view {
        View::Dashboard => ViewBody::Dashboard(dashboard_view(payments)),
        View::Payments => ViewBody::Payments(payment_list_view(router, payments, search)),
        View::Late => ViewBody::Late(late_list_view(payments)),
        View::Contacts => ViewBody::Contacts(contact_list_view(contacts, search)),
        View::Projects => ViewBody::Projects(ProjectListView {
            projects: aggregate::group_by_project(payments),
        }),
        View::Sync => ViewBody::Sync(SyncView {
            settings: sync.clone(),
        }),
        View::PaymentDetail => {
            ViewBody::PaymentDetail(payment_detail_view(router, payments, contacts))
        }
        View::ContactDetail => ViewBody::ContactDetail(contact_detail_view(router, contacts)),
        View::ProjectDetail => {
            ViewBody::ProjectDetail(project_detail_view(router, payments, contacts))
        }
    };

    ViewFrame {
        title: view.title(),
        show_back: view.shows_back(),
        body,
    }
}

fn dashboard_view(payments: &[Payment]) -> DashboardView {
    DashboardView {
        stats: aggregate::dashboard_stats(payments),
        recent_late: aggregate::recent_late_payments(payments)
            .into_iter()
            .cloned()
            .collect(),
    }
}

fn payment_list_view(router: &Router, payments: &[Payment], search: Option<&str>) -> PaymentListView {
    let project_options = aggregate::distinct_projects(payments);

    // A search query replaces the filtered list and keeps stored order.
    if let Some(query) = search.filter(|q| !q.is_empty()) {
        let matches = aggregate::search_payments(payments, query)
            .into_iter()
            .cloned()
            .collect();
        return PaymentListView {
            status_filter: router.status_filter().clone(),
            project_filter: router.project_filter().map(str::to_owned),
            search: Some(query.to_owned()),
            project_options,
            payments: matches,
        };
    }

    let filter = PaymentFilter {
        status: router.status_filter().clone(),
        project: router.project_filter().map(str::to_owned),
    };
    let mut listed: Vec<Payment> = aggregate::filter_payments(payments, &filter)
        .into_iter()
        .cloned()
        .collect();
    aggregate::sort_by_due_date(&mut listed);

    PaymentListView {
        status_filter: filter.status,
        project_filter: filter.project,
        search: None,
        project_options,
        payments: listed,
    }
}

fn late_list_view(payments: &[Payment]) -> LateListView {
    let mut late: Vec<Payment> = payments
        .iter()
        .filter(|p| p.status.is_late())
        .cloned()
        .collect();
    aggregate::sort_by_due_date(&mut late);
    LateListView { payments: late }
}

fn contact_list_view(contacts: &[Contact], search: Option<&str>) -> ContactListView {
    match search.filter(|q| !q.is_empty()) {
        Some(query) => ContactListView {
            search: Some(query.to_owned()),
            contacts: aggregate::search_contacts(contacts, query)
                .into_iter()
                .cloned()
                .collect(),
        },
        None => ContactListView {
            search: None,
            contacts: contacts.to_vec(),
        },
    }
}

fn payment_detail_view(
    router: &Router,
    payments: &[Payment],
    contacts: &[Contact],
) -> Option<PaymentDetailView> {
    let id = router.selected_payment()?;
    let payment = payments.iter().find(|p| p.id == id)?.clone();
    let contact = aggregate::find_contact_for_project(contacts, &payment.project_name).cloned();
    Some(PaymentDetailView { payment, contact })
}

fn contact_detail_view(router: &Router, contacts: &[Contact]) -> Option<ContactDetailView> {
    let id = router.selected_contact()?;
    let contact = contacts.iter().find(|c| c.id == id)?.clone();
    Some(ContactDetailView { contact })
}

fn project_detail_view(
    router: &Router,
    payments: &[Payment],
    contacts: &[Contact],
) -> Option<ProjectDetailView> {
    let name = router.selected_project()?.to_owned();

    let milestones: Vec<Payment> = payments
        .iter()
        .filter(|p| p.project_name == name)
        .cloned()
        .collect();

    let mut total_owed = 0.0;
    let mut total_paid = 0.0;
    let mut late_count = 0;
    let mut paid_count = 0;
    for payment in &milestones {
        total_owed += payment.amount_owed;
        total_paid += payment.amount_paid_usd;
        if payment.status.is_late() {
            late_count += 1;
        }
        if payment.status.is_paid() {
            paid_count += 1;
        }
    }

    let contact = aggregate::find_contact_for_project(contacts, &name).cloned();

    Some(ProjectDetailView {
        name,
        milestones,
        paid_count,
        late_count,
        total_owed,
        total_paid,
        contact,
    })
}
