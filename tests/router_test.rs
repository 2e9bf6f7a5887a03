use payment_tracker_rust::models::{PaymentStatus, StatusFilter};
use payment_tracker_rust::router::{Router, View};

#[test]
fn test_initial_state_is_dashboard() {
    let router = Router::new();

    assert_eq!(router.current_view(), View::Dashboard);
    assert_eq!(router.status_filter(), &StatusFilter::All);
    assert!(router.project_filter().is_none());
    assert!(router.selected_payment().is_none());
    assert!(router.selected_contact().is_none());
    assert!(router.selected_project().is_none());
}

#[test]
fn test_default_matches_new() {
    let router = Router::default();
    assert_eq!(router.current_view(), View::Dashboard);
    assert!(router.selected_payment().is_none());
}

#[test]
fn test_view_titles() {
    assert_eq!(View::Dashboard.title(), "Payment Tracker");
    assert_eq!(View::Payments.title(), "All Payments");
    assert_eq!(View::Late.title(), "Late Payments");
    assert_eq!(View::Contacts.title(), "Contacts");
    assert_eq!(View::Projects.title(), "Projects");
    assert_eq!(View::Sync.title(), "Sync Settings");
    assert_eq!(View::PaymentDetail.title(), "Payment Details");
    assert_eq!(View::ContactDetail.title(), "Contact Details");
    assert_eq!(View::ProjectDetail.title(), "Project Details");
}

#[test]
fn test_only_detail_views_show_back() {
    assert!(View::PaymentDetail.shows_back());
    assert!(View::ContactDetail.shows_back());
    assert!(View::ProjectDetail.shows_back());

    assert!(!View::Dashboard.shows_back());
    assert!(!View::Payments.shows_back());
    assert!(!View::Late.shows_back());
    assert!(!View::Contacts.shows_back());
    assert!(!View::Projects.shows_back());
    assert!(!View::Sync.shows_back());
}

#[test]
fn test_back_target_from_detail_views() {
    assert_eq!(View::PaymentDetail.back_target(), View::Payments);
    assert_eq!(View::ContactDetail.back_target(), View::Contacts);
    assert_eq!(View::ProjectDetail.back_target(), View::Projects);
}

#[test]
fn test_back_target_from_top_level_views() {
    assert_eq!(View::Payments.back_target(), View::Dashboard);
    assert_eq!(View::Late.back_target(), View::Dashboard);
    assert_eq!(View::Contacts.back_target(), View::Dashboard);
    assert_eq!(View::Projects.back_target(), View::Dashboard);
    assert_eq!(View::Sync.back_target(), View::Dashboard);
    assert_eq!(View::Dashboard.back_target(), View::Dashboard);
}

#[test]
fn test_view_names_for_logging() {
    assert_eq!(View::Dashboard.name(), "dashboard");
    assert_eq!(View::Payments.name(), "payments");
    assert_eq!(View::PaymentDetail.name(), "payment_detail");
    assert_eq!(View::ProjectDetail.name(), "project_detail");
}

#[test]
fn test_navigate_to_switches_view() {
    let mut router = Router::new();

    router.navigate_to(View::Contacts);
    assert_eq!(router.current_view(), View::Contacts);

    router.navigate_to(View::Sync);
    assert_eq!(router.current_view(), View::Sync);
}

#[test]
fn test_go_back_returns_landed_view() {
    let mut router = Router::new();

    router.open_payment(7);
    assert_eq!(router.current_view(), View::PaymentDetail);

    let landed = router.go_back();
    assert_eq!(landed, View::Payments);
    assert_eq!(router.current_view(), View::Payments);

    let landed = router.go_back();
    assert_eq!(landed, View::Dashboard);

    // Backing out of the dashboard stays on the dashboard
    let landed = router.go_back();
    assert_eq!(landed, View::Dashboard);
}

#[test]
fn test_open_payment_selects_and_navigates() {
    let mut router = Router::new();
    router.open_payment(42);

    assert_eq!(router.current_view(), View::PaymentDetail);
    assert_eq!(router.selected_payment(), Some(42));
}

#[test]
fn test_open_contact_selects_and_navigates() {
    let mut router = Router::new();
    router.open_contact(3);

    assert_eq!(router.current_view(), View::ContactDetail);
    assert_eq!(router.selected_contact(), Some(3));
}

#[test]
fn test_open_project_selects_and_navigates() {
    let mut router = Router::new();
    router.open_project("Harbor Bridge Retrofit");

    assert_eq!(router.current_view(), View::ProjectDetail);
    assert_eq!(router.selected_project(), Some("Harbor Bridge Retrofit"));
}

#[test]
fn test_selections_survive_navigation() {
    let mut router = Router::new();
    router.open_payment(7);
    router.open_contact(2);
    router.open_project("Acme Tower");

    router.navigate_to(View::Dashboard);
    assert_eq!(router.selected_payment(), Some(7));
    assert_eq!(router.selected_contact(), Some(2));
    assert_eq!(router.selected_project(), Some("Acme Tower"));
}

#[test]
fn test_reopening_replaces_selection() {
    let mut router = Router::new();
    router.open_payment(7);
    router.open_payment(8);
    assert_eq!(router.selected_payment(), Some(8));
}

#[test]
fn test_set_status_filter() {
    let mut router = Router::new();
    router.set_status_filter(StatusFilter::Only(PaymentStatus::Late));
    assert_eq!(
        router.status_filter(),
        &StatusFilter::Only(PaymentStatus::Late)
    );

    router.set_status_filter(StatusFilter::All);
    assert_eq!(router.status_filter(), &StatusFilter::All);
}

#[test]
fn test_set_project_filter() {
    let mut router = Router::new();
    router.set_project_filter(Some("Acme Tower".to_string()));
    assert_eq!(router.project_filter(), Some("Acme Tower"));

    router.set_project_filter(None);
    assert!(router.project_filter().is_none());
}

#[test]
fn test_empty_project_filter_clears() {
    let mut router = Router::new();
    router.set_project_filter(Some("Acme Tower".to_string()));
    router.set_project_filter(Some(String::new()));
    assert!(router.project_filter().is_none());
}

#[test]
fn test_filters_survive_navigation() {
    let mut router = Router::new();
    router.set_status_filter(StatusFilter::Only(PaymentStatus::Paid));
    router.set_project_filter(Some("Riverside Apartments".to_string()));

    router.navigate_to(View::Contacts);
    router.navigate_to(View::Payments);

    assert_eq!(
        router.status_filter(),
        &StatusFilter::Only(PaymentStatus::Paid)
    );
    assert_eq!(router.project_filter(), Some("Riverside Apartments"));
}
