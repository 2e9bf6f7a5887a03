use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use payment_tracker_rust::aggregate;
use payment_tracker_rust::config::AppConfig;
use payment_tracker_rust::logging::init_logging;
use payment_tracker_rust::metrics::MetricsCollector;
use payment_tracker_rust::models::{
    Contact, ContactRole, OutputFormat, Payment, PaymentFilter, StatusFilter, SyncSettings,
};
use payment_tracker_rust::router::{Router, View};
use payment_tracker_rust::service::{self, TrackerService};
use payment_tracker_rust::store::SledStore;
use payment_tracker_rust::validation::InputValidator;
use payment_tracker_rust::view::{
    self, ContactDetailView, ContactListView, DashboardView, LateListView, PaymentDetailView,
    PaymentListView, ProjectDetailView, ProjectListView, ViewBody, ViewFrame,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show payment statistics and recent late payments
    Dashboard,
    /// List payments, filtered or searched
    Payments {
        /// Status filter: all, late, pending, or paid
        #[arg(short, long)]
        status: Option<String>,

        /// Keep only payments for this project
        #[arg(short, long)]
        project: Option<String>,

        /// Search descriptions, projects, and invoice numbers
        #[arg(long)]
        search: Option<String>,
    },
    /// List late payments, earliest due first
    Late,
    /// List project contact sheets
    Contacts {
        /// Search project names, companies, and finance manager names
        #[arg(long)]
        search: Option<String>,
    },
    /// List projects with per-project totals
    Projects,
    /// Show one payment with its project contact
    Payment {
        /// Payment id
        id: i64,
    },
    /// Show one contact sheet
    Contact {
        /// Contact id
        id: i64,
    },
    /// Show one project with its milestones
    Project {
        /// Project name
        name: String,
    },
    /// Export all data to a JSON backup file
    Export {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Replace all data from a JSON backup file
    Import {
        /// Backup file to read
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write a payment report file
    Report {
        /// Status filter: all, late, pending, or paid
        #[arg(short, long)]
        status: Option<String>,

        /// Keep only payments for this project
        #[arg(short, long)]
        project: Option<String>,

        /// Output format (txt, csv, or json)
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Show or change spreadsheet sync settings
    Sync {
        #[command(subcommand)]
        action: Option<SyncAction>,
    },
}

#[derive(Subcommand)]
enum SyncAction {
    /// Show the stored sync settings
    Show,
    /// Run a sync now
    Now,
    /// Update the stored sync settings
    Set {
        /// Google Sheets URL to sync with
        #[arg(long)]
        sheets_url: Option<String>,

        /// Sync frequency: manual, hourly, daily, or weekly
        #[arg(long)]
        frequency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging; the guard must stay alive for file output
    let _log_guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(Path::new),
        config.logging.format == "json",
    )?;
    MetricsCollector::init()?;

    info!("Starting payment-tracker application");

    // Parse command line arguments
    let cli = Cli::parse();

    // Open the record store and build the service around it
    let store_path = config.get_store_path();
    let store = SledStore::open(Path::new(&store_path))?;
    let service = TrackerService::new(Box::new(store));
    let seed_dir = PathBuf::from(config.get_seed_directory());

    // Process command; no command opens the dashboard
    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => show_dashboard(&service, &seed_dir).await?,
        Commands::Payments {
            status,
            project,
            search,
        } => {
            list_payments(
                &service,
                &seed_dir,
                status.as_deref(),
                project,
                search.as_deref(),
            )
            .await?;
        }
        Commands::Late => list_late(&service, &seed_dir).await?,
        Commands::Contacts { search } => {
            list_contacts(&service, &seed_dir, search.as_deref()).await?;
        }
        Commands::Projects => list_projects(&service, &seed_dir).await?,
        Commands::Payment { id } => show_payment(&service, &seed_dir, id).await?,
        Commands::Contact { id } => show_contact(&service, &seed_dir, id).await?,
        Commands::Project { name } => show_project(&service, &seed_dir, name).await?,
        Commands::Export { output_dir } => {
            export_data(&service, &seed_dir, &config, output_dir.as_deref()).await?;
        }
        Commands::Import { input } => import_data(&service, &input).await?,
        Commands::Report {
            status,
            project,
            format,
            output_dir,
        } => {
            run_report(
                &service,
                &seed_dir,
                &config,
                status.as_deref(),
                project,
                format.as_deref(),
                output_dir.as_deref(),
            )
            .await?;
        }
        Commands::Sync { action } => match action.unwrap_or(SyncAction::Show) {
            SyncAction::Show => show_sync(&service, &seed_dir).await?,
            SyncAction::Now => run_sync_now(&service).await?,
            SyncAction::Set {
                sheets_url,
                frequency,
            } => set_sync(&service, sheets_url, frequency).await?,
        },
    }

    Ok(())
}

/// Show the dashboard view
async fn show_dashboard(service: &TrackerService, seed_dir: &Path) -> Result<()> {
    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;

    let router = Router::new();
    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// List payments with the given filters, or run a search
async fn list_payments(
    service: &TrackerService,
    seed_dir: &Path,
    status: Option<&str>,
    project: Option<String>,
    search: Option<&str>,
) -> Result<()> {
    if let Some(query) = search {
        InputValidator::validate_search_query(query)?;
    }
    if let Some(project_name) = project.as_deref() {
        InputValidator::validate_project_name(project_name)?;
    }

    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;

    let mut router = Router::new();
    router.set_status_filter(resolve_status_filter(status));
    router.set_project_filter(project);
    router.navigate_to(View::Payments);

    if search.is_some() {
        service.metrics().record_search("payments");
    }

    let frame = view::build_frame(&router, &payments, &contacts, &sync, search);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// List late payments
async fn list_late(service: &TrackerService, seed_dir: &Path) -> Result<()> {
    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;

    let mut router = Router::new();
    router.navigate_to(View::Late);

    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// List contact sheets, optionally searched
async fn list_contacts(
    service: &TrackerService,
    seed_dir: &Path,
    search: Option<&str>,
) -> Result<()> {
    if let Some(query) = search {
        InputValidator::validate_search_query(query)?;
    }

    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;

    let mut router = Router::new();
    router.navigate_to(View::Contacts);

    if search.is_some() {
        service.metrics().record_search("contacts");
    }

    let frame = view::build_frame(&router, &payments, &contacts, &sync, search);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// List per-project summaries
async fn list_projects(service: &TrackerService, seed_dir: &Path) -> Result<()> {
    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;

    let mut router = Router::new();
    router.navigate_to(View::Projects);

    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// Show one payment's detail view
async fn show_payment(service: &TrackerService, seed_dir: &Path, id: i64) -> Result<()> {
    InputValidator::validate_payment_id(id)?;

    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;
    service::require_payment(&payments, id)?;

    let mut router = Router::new();
    router.open_payment(id);

    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// Show one contact's detail view
async fn show_contact(service: &TrackerService, seed_dir: &Path, id: i64) -> Result<()> {
    InputValidator::validate_contact_id(id)?;

    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;
    service::require_contact(&contacts, id)?;

    let mut router = Router::new();
    router.open_contact(id);

    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// Show one project's detail view
async fn show_project(service: &TrackerService, seed_dir: &Path, name: String) -> Result<()> {
    InputValidator::validate_project_name(&name)?;

    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;
    service::require_project(&payments, &name)?;

    let mut router = Router::new();
    router.open_project(name);

    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// Export all data to a backup file
async fn export_data(
    service: &TrackerService,
    seed_dir: &Path,
    config: &AppConfig,
    output_dir: Option<&str>,
) -> Result<()> {
    let effective_output_dir = output_dir.unwrap_or(&config.export.output_directory);
    InputValidator::validate_file_path(Path::new(effective_output_dir))?;

    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let path = service
        .export_backup(payments, contacts, Path::new(effective_output_dir))
        .await?;
    println!("Data exported to {}", path.display());

    Ok(())
}

/// Replace all data from a backup file
async fn import_data(service: &TrackerService, input: &Path) -> Result<()> {
    InputValidator::validate_backup_path(input)?;

    let (payment_count, contact_count) = service.import_backup(input).await?;
    println!("Data imported successfully: {payment_count} payments, {contact_count} contacts");

    Ok(())
}

/// Write a filtered payment report file
async fn run_report(
    service: &TrackerService,
    seed_dir: &Path,
    config: &AppConfig,
    status: Option<&str>,
    project: Option<String>,
    format: Option<&str>,
    output_dir: Option<&str>,
) -> Result<()> {
    if let Some(project_name) = project.as_deref() {
        InputValidator::validate_project_name(project_name)?;
    }

    let (payments, _) = service.load_or_seed(seed_dir).await?;

    let filter = PaymentFilter {
        status: resolve_status_filter(status),
        project: project.filter(|p| !p.is_empty()),
    };
    let mut selected: Vec<Payment> = aggregate::filter_payments(&payments, &filter)
        .into_iter()
        .cloned()
        .collect();
    aggregate::sort_by_due_date(&mut selected);

    let output_format = resolve_format(format, &config.export.default_format);
    let effective_output_dir = output_dir.unwrap_or(&config.export.output_directory);
    InputValidator::validate_file_path(Path::new(effective_output_dir))?;
    let path = service.write_report(&selected, output_format, Path::new(effective_output_dir))?;
    println!(
        "Report written to {} ({} payments)",
        path.display(),
        selected.len()
    );

    Ok(())
}

/// Show the stored sync settings
async fn show_sync(service: &TrackerService, seed_dir: &Path) -> Result<()> {
    let (payments, contacts) = service.load_or_seed(seed_dir).await?;
    let sync = service.sync_settings().await?;

    let mut router = Router::new();
    router.navigate_to(View::Sync);

    let frame = view::build_frame(&router, &payments, &contacts, &sync, None);
    service.metrics().record_view_render(router.current_view().name());
    render_frame(&frame, &router);

    Ok(())
}

/// Trigger a sync run
async fn run_sync_now(service: &TrackerService) -> Result<()> {
    let message = service.sync_now().await?;
    println!("{message}");
    Ok(())
}

/// Update the stored sync settings
async fn set_sync(
    service: &TrackerService,
    sheets_url: Option<String>,
    frequency: Option<String>,
) -> Result<()> {
    if sheets_url.is_none() && frequency.is_none() {
        warn!("Nothing to update: pass --sheets-url and/or --frequency");
        return Ok(());
    }

    if let Some(url) = sheets_url.as_deref() {
        InputValidator::validate_sheets_url(url)?;
    }
    if let Some(freq) = frequency.as_deref() {
        InputValidator::validate_sync_frequency(freq)?;
    }

    let settings = service.update_sync_settings(sheets_url, frequency).await?;
    println!("Sync settings saved");
    render_sync_settings(&settings);

    Ok(())
}

/// Parse a status filter argument, keeping everything on bad input
fn resolve_status_filter(raw: Option<&str>) -> StatusFilter {
    match raw {
        None => StatusFilter::All,
        Some(value) => match StatusFilter::parse_arg(value) {
            Some(filter) => filter,
            None => {
                warn!("Invalid status filter: {}. Showing all statuses.", value);
                StatusFilter::All
            }
        },
    }
}

/// Parse a report format argument, falling back to the configured default
fn resolve_format(raw: Option<&str>, configured: &str) -> OutputFormat {
    let value = raw.unwrap_or(configured);
    match OutputFormat::parse_arg(value) {
        Some(format) => format,
        None => {
            warn!("Invalid format: {}. Using txt as default.", value);
            OutputFormat::Txt
        }
    }
}

/// Print a view frame to stdout
fn render_frame(frame: &ViewFrame, router: &Router) {
    println!("\n=== {} ===", frame.title);
    if frame.show_back {
        println!("(back: {})", router.current_view().back_target().title());
    }
    println!();

    match &frame.body {
        ViewBody::Dashboard(body) => render_dashboard(body),
        ViewBody::Payments(body) => render_payment_list(body),
        ViewBody::Late(body) => render_late_list(body),
        ViewBody::Contacts(body) => render_contact_list(body),
        ViewBody::Projects(body) => render_project_list(body),
        ViewBody::Sync(body) => render_sync_settings(&body.settings),
        ViewBody::PaymentDetail(body) => match body {
            Some(detail) => render_payment_detail(detail),
            None => println!("No payment selected"),
        },
        ViewBody::ContactDetail(body) => match body {
            Some(detail) => render_contact_detail(detail),
            None => println!("No contact selected"),
        },
        ViewBody::ProjectDetail(body) => match body {
            Some(detail) => render_project_detail(detail),
            None => println!("No project selected"),
        },
    }
}

fn render_dashboard(body: &DashboardView) {
    let stats = &body.stats;
    println!(
        "Late: {} ({})",
        aggregate::format_currency(stats.late_amount),
        stats.late_count
    );
    println!(
        "Pending: {} ({})",
        aggregate::format_currency(stats.pending_amount),
        stats.pending_count
    );
    println!(
        "Paid: {} ({})",
        aggregate::format_currency(stats.paid_amount),
        stats.paid_count
    );
    println!(
        "Total outstanding: {}",
        aggregate::format_currency(stats.total_owed)
    );

    if body.recent_late.is_empty() {
        println!("\nNo late payments!");
    } else {
        println!("\nRecent late payments:");
        for payment in &body.recent_late {
            println!("  {}", payment_line(payment));
        }
    }
}

fn render_payment_list(body: &PaymentListView) {
    match &body.search {
        Some(query) => println!("Search: \"{query}\""),
        None => {
            println!("Status filter: {}", body.status_filter);
            if let Some(project) = &body.project_filter {
                println!("Project filter: {project}");
            }
        }
    }
    if !body.project_options.is_empty() {
        println!("Projects: {}", body.project_options.join(", "));
    }
    println!();

    if body.payments.is_empty() {
        println!("No payments found");
    } else {
        for payment in &body.payments {
            println!("  {}", payment_line(payment));
        }
    }
}

fn render_late_list(body: &LateListView) {
    if body.payments.is_empty() {
        println!("No late payments!");
        return;
    }

    let today = Local::now().date_naive();
    for payment in &body.payments {
        println!(
            "  {}, {} days overdue",
            payment_line(payment),
            aggregate::days_overdue(payment, today)
        );
    }
}

fn render_contact_list(body: &ContactListView) {
    if let Some(query) = &body.search {
        println!("Search: \"{query}\"");
        println!();
    }

    if body.contacts.is_empty() {
        println!("No contacts found");
        return;
    }
    for contact in &body.contacts {
        println!("  {}", contact_line(contact));
    }
}

fn render_project_list(body: &ProjectListView) {
    if body.projects.is_empty() {
        println!("No projects found");
        return;
    }
    for project in &body.projects {
        println!(
            "  {}: {} milestones, {} late, owed {}, paid {}",
            InputValidator::sanitize_text(&project.name),
            project.count,
            project.late_count,
            aggregate::format_currency(project.total_owed),
            aggregate::format_currency(project.total_paid),
        );
    }
}

fn render_sync_settings(settings: &SyncSettings) {
    match &settings.sheets_url {
        Some(url) => println!("Sheets URL: {url}"),
        None => println!("Sheets URL: not configured"),
    }
    match &settings.frequency {
        Some(frequency) => println!("Frequency: {frequency}"),
        None => println!("Frequency: not configured"),
    }
}

fn render_payment_detail(detail: &PaymentDetailView) {
    let payment = &detail.payment;
    println!("{}", InputValidator::sanitize_text(&payment.description));
    println!(
        "Project: {}",
        InputValidator::sanitize_text(&payment.project_name)
    );
    if let Some(milestone) = payment.milestone_number {
        println!("Milestone: {milestone}");
    }

    if payment.status.is_late() {
        let today = Local::now().date_naive();
        println!(
            "Status: {} ({} days overdue)",
            payment.status,
            aggregate::days_overdue(payment, today)
        );
    } else {
        println!("Status: {}", payment.status);
    }

    println!(
        "Amount owed: {}",
        aggregate::format_currency(payment.amount_owed)
    );
    println!(
        "Expected payment: {}",
        aggregate::format_currency(payment.expected_payment_usd)
    );
    println!(
        "Amount paid: {}",
        aggregate::format_currency(payment.amount_paid_usd)
    );
    println!("Due date: {}", aggregate::format_date(payment.due_date));
    println!(
        "Invoice date: {}",
        aggregate::format_date(payment.invoice_date)
    );
    println!(
        "Payment date: {}",
        aggregate::format_date(payment.payment_date)
    );
    if let Some(invoice) = &payment.invoice_number {
        println!(
            "Invoice number: {}",
            InputValidator::sanitize_text(invoice)
        );
    }
    if let Some(notes) = &payment.notes {
        println!("Notes: {}", InputValidator::sanitize_text(notes));
    }

    render_project_contact(detail.contact.as_ref());
}

fn render_contact_detail(detail: &ContactDetailView) {
    let contact = &detail.contact;
    println!("{}", InputValidator::sanitize_text(&contact.project_name));
    println!(
        "Company: {}",
        InputValidator::sanitize_text(&contact.company)
    );
    if let Some(division) = &contact.division {
        println!("Division: {}", InputValidator::sanitize_text(division));
    }
    println!();

    render_role("Finance manager", &contact.finance_manager);
    render_role("Project manager", &contact.project_manager);
    render_role("Consultant manager", &contact.consultant_manager);
}

fn render_project_detail(detail: &ProjectDetailView) {
    println!("{}", InputValidator::sanitize_text(&detail.name));
    println!(
        "Milestones: {} ({} paid, {} late)",
        detail.milestones.len(),
        detail.paid_count,
        detail.late_count
    );
    println!(
        "Total owed: {}",
        aggregate::format_currency(detail.total_owed)
    );
    println!(
        "Total paid: {}",
        aggregate::format_currency(detail.total_paid)
    );

    if !detail.milestones.is_empty() {
        println!("\nMilestones:");
        for payment in &detail.milestones {
            println!("  {}", payment_line(payment));
        }
    }

    render_project_contact(detail.contact.as_ref());
}

/// Print the contact block shown on payment and project detail views
fn render_project_contact(contact: Option<&Contact>) {
    match contact {
        Some(contact) => {
            println!(
                "\nProject contact: {}",
                InputValidator::sanitize_text(&contact.company)
            );
            render_role("Finance manager", &contact.finance_manager);
        }
        None => println!("\nNo contact on file for this project"),
    }
}

/// Print one contact role with its reachability links; silent when unnamed
fn render_role(label: &str, role: &ContactRole) {
    let Some(name) = role.name.as_deref().filter(|n| !n.is_empty()) else {
        return;
    };
    println!("{label}: {}", InputValidator::sanitize_text(name));

    let links = aggregate::contact_links(role);
    if let Some(call) = &links.call {
        println!("  Call: {call}");
    }
    if let Some(email) = &links.email {
        println!("  Email: {email}");
    }
    if let Some(whatsapp) = &links.whatsapp {
        println!("  WhatsApp: {whatsapp}");
    }
}

/// One-line payment summary used by every list view
fn payment_line(payment: &Payment) -> String {
    let mut project = InputValidator::sanitize_text(&payment.project_name);
    if let Some(milestone) = payment.milestone_number {
        project = format!("{project} - M{milestone}");
    }
    format!(
        "[{}] {} ({}), {}, due {}, owed {}",
        payment.id,
        InputValidator::sanitize_text(&payment.description),
        project,
        payment.status,
        aggregate::format_date(payment.due_date),
        aggregate::format_currency(payment.amount_owed),
    )
}

/// One-line contact summary used by the contacts list
fn contact_line(contact: &Contact) -> String {
    let mut line = format!(
        "[{}] {}, {}",
        contact.id,
        InputValidator::sanitize_text(&contact.project_name),
        InputValidator::sanitize_text(&contact.company),
    );
    if let Some(division) = contact.division.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!(" ({})", InputValidator::sanitize_text(division)));
    }
    line
}
