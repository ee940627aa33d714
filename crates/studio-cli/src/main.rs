// ============================================================================
// tag-admin - CLI for the TAG / UNDERLA.STUDIO booking store
// ============================================================================
// Usage:
//   tag-admin stats                                  Store statistics
//   tag-admin list bookings [--status S] [--search Q] [--sort newest|oldest|name] [--page N]
//   tag-admin show inquiries <ID>                    One submission in full
//   tag-admin set-status bookings <ID> Paid          Change a submission status
//   tag-admin export --format json                   Dump every collection
//   tag-admin packages [--category C]                Studio catalog
//   tag-admin quote --package 1 --addon 10           Price a selection
//   tag-admin book ... / inquire ...                 Submit like the web forms
//   tag-admin galleries|images|sessions ...          Manage site content
//   tag-admin chat                                   Talk to the studio assistant
// ============================================================================

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

use studio_core::admin::{self, AdminQuery, SortKey, StatusFilter};
use studio_core::assistant::ChatSession;
use studio_core::booking::{BookingAction, BookingField, BookingForm, Quote};
use studio_core::content::{mime_from_path, FeaturedSessions, GalleryService, ImageLibrary, NewSession};
use studio_core::db::{self, keys, CollectionStore, GalleryPage, KeyValueStore, ProjectType, StudioDb};
use studio_core::{Catalog, Collection, InquiryForm, StudioConfig, SubmissionLog, SubmissionRecord};

/// TAG Studio booking store tool
#[derive(Parser)]
#[command(name = "tag-admin", version, about = "Review bookings and manage the TAG studio store")]
struct Cli {
    /// Path to the database file (default: ~/.tag-studio/studio.redb)
    #[arg(long, global = true)]
    db_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show store statistics (submission counts per status, content totals)
    Stats,

    /// List submissions with filter, search, sort and pagination
    List {
        /// bookings or inquiries
        collection: String,
        /// Status label or "All"
        #[arg(long, default_value = "All")]
        status: String,
        /// Case-insensitive match on name, company or email
        #[arg(long, default_value = "")]
        search: String,
        /// newest, oldest or name
        #[arg(long, default_value = "newest")]
        sort: String,
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Show one submission in full
    Show { collection: String, id: i64 },

    /// Change the status of a submission
    SetStatus {
        collection: String,
        id: i64,
        /// Pending/Contacted/Paid for bookings, New/Contacted/Proposal Sent for inquiries
        status: String,
    },

    /// Export every collection as JSON
    Export {
        /// Output format (currently only json is supported)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// List studio packages
    Packages {
        #[arg(long)]
        category: Option<String>,
    },

    /// Price a package selection
    Quote {
        #[arg(long)]
        package: Option<u32>,
        #[arg(long = "addon")]
        addons: Vec<u32>,
    },

    /// Submit a studio booking
    Book {
        #[arg(long)]
        package: Option<u32>,
        #[arg(long = "addon")]
        addons: Vec<u32>,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        details: String,
        /// Agree to the Terms and Cancellation Policy
        #[arg(long)]
        agree: bool,
    },

    /// Submit an AV / broadcasting inquiry
    Inquire {
        #[arg(long)]
        company: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "Broadcast & Production")]
        project_type: String,
        #[arg(long)]
        description: String,
    },

    /// Manage photo galleries
    Galleries {
        #[command(subcommand)]
        action: GalleryAction,
    },

    /// Manage the uploaded image library
    Images {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Manage featured audio sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Chat with the studio assistant (needs GEMINI_API_KEY)
    Chat,
}

#[derive(Subcommand)]
enum GalleryAction {
    List,
    Create {
        name: String,
        /// moes, landing or other
        #[arg(long, default_value = "moes")]
        page: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: String },
    Upload { gallery: String, file: String },
    DeleteImage { gallery: String, image: String },
}

#[derive(Subcommand)]
enum ImageAction {
    List,
    Add { file: String },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum SessionAction {
    List,
    Add {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Image URL (e.g. a data: URL from the image library)
        #[arg(long)]
        image_url: String,
        /// Audio file to embed
        #[arg(long)]
        audio: String,
    },
    Delete { id: i64 },
    /// Move the session at FROM to position TO (zero-based)
    Move { from: usize, to: usize },
}

fn parse_collection(s: &str) -> Result<Collection> {
    Collection::from_str(s)
        .ok_or_else(|| anyhow!("Unknown collection '{}'. Valid values: bookings, inquiries", s))
}

fn read_media(path: &str) -> Result<(String, &'static str, Vec<u8>)> {
    let bytes = std::fs::read(path).map_err(|e| anyhow!("Failed to read {}: {}", path, e))?;
    let name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    Ok((name, mime_from_path(path), bytes))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = StudioConfig::from_env();
    let db_path = cli.db_path.clone().or_else(|| config.db_path.clone());
    let db = Arc::new(StudioDb::open(db_path.as_deref())?);
    let store: Arc<dyn KeyValueStore> = db.clone();

    match cli.command {
        Commands::Stats => cmd_stats(&db),
        Commands::List {
            collection,
            status,
            search,
            sort,
            page,
        } => cmd_list(store, &collection, &status, &search, &sort, page),
        Commands::Show { collection, id } => cmd_show(store, &collection, id),
        Commands::SetStatus {
            collection,
            id,
            status,
        } => cmd_set_status(store, &collection, id, &status),
        Commands::Export { format } => cmd_export(&db, &format),
        Commands::Packages { category } => cmd_packages(category.as_deref()),
        Commands::Quote { package, addons } => cmd_quote(package, &addons),
        Commands::Book {
            package,
            addons,
            date,
            time,
            name,
            email,
            details,
            agree,
        } => {
            let catalog = Catalog::studio();
            let mut form = BookingForm::new();
            if let Some(id) = package {
                form.state.choose(catalog, id);
            }
            for id in addons {
                form.state.choose(catalog, id);
            }
            form.apply(BookingAction::SetField(BookingField::Date, date));
            form.apply(BookingAction::SetField(BookingField::Time, time));
            form.apply(BookingAction::SetField(BookingField::Name, name));
            form.apply(BookingAction::SetField(BookingField::Email, email));
            form.apply(BookingAction::SetField(BookingField::ProjectDetails, details));
            form.set_agreed(agree);
            cmd_book(store, form)
        }
        Commands::Inquire {
            company,
            name,
            email,
            project_type,
            description,
        } => {
            let project_type = ProjectType::from_label(&project_type).ok_or_else(|| {
                let valid: Vec<_> = ProjectType::ALL.iter().map(|p| p.as_str()).collect();
                anyhow!("Unknown project type '{}'. Valid values: {}", project_type, valid.join(", "))
            })?;
            let form = InquiryForm {
                company,
                name,
                email,
                project_type,
                description,
            };
            cmd_inquire(store, form)
        }
        Commands::Galleries { action } => cmd_galleries(store, action),
        Commands::Images { action } => cmd_images(store, action),
        Commands::Sessions { action } => cmd_sessions(store, action),
        Commands::Chat => cmd_chat(store, &config).await,
    }
}

fn cmd_stats(db: &StudioDb) -> Result<()> {
    let stats = db::stats(db)?;

    println!("=== TAG Studio Store Stats ===");
    println!("Database: {}", db.path().display());
    println!();
    println!("Bookings:  {} total", stats.total_bookings);
    for (status, count) in &stats.booking_counts {
        println!("  {:14} {}", status, count);
    }
    println!("Inquiries: {} total", stats.total_inquiries);
    for (status, count) in &stats.inquiry_counts {
        println!("  {:14} {}", status, count);
    }
    println!("Images:    {}", stats.total_images);
    println!("Galleries: {}", stats.total_galleries);
    println!("Featured:  {}", stats.total_featured_sessions);

    Ok(())
}

fn cmd_list(
    store: Arc<dyn KeyValueStore>,
    collection: &str,
    status: &str,
    search: &str,
    sort: &str,
    page: usize,
) -> Result<()> {
    let collection = parse_collection(collection)?;
    let log = SubmissionLog::new(store);
    let records = log.load(collection)?;

    let query = AdminQuery::new()
        .with_status(StatusFilter::parse(status))
        .with_search(search)
        .with_sort(SortKey::parse(sort))
        .with_page(page);
    let page = query.run(&records);

    println!("=== {} ===", collection.title());
    let counts: Vec<String> = admin::status_counts(collection.kind(), &records)
        .into_iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect();
    println!("{}\n", counts.join("  |  "));

    if page.items.is_empty() {
        println!("No submissions match the current filters.");
        return Ok(());
    }

    println!(
        "{:<14}  {:<14}  {:<22}  {:<26}  {}",
        "ID", "STATUS", "SUBMITTED", "NAME", "DETAILS"
    );
    println!("{}", "-".repeat(100));

    for record in &page.items {
        let headline = record.headline().chars().take(30).collect::<String>();
        println!(
            "{:<14}  {:<14}  {:<22}  {:<26}  {}",
            record.id(),
            record.status_label(),
            record.submitted_at().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            record.display_name().chars().take(26).collect::<String>(),
            headline
        );
    }

    println!(
        "\nPage {} of {} ({} matching)",
        page.page,
        page.total_pages.max(1),
        page.total_matches
    );
    Ok(())
}

fn cmd_show(store: Arc<dyn KeyValueStore>, collection: &str, id: i64) -> Result<()> {
    let collection = parse_collection(collection)?;
    let log = SubmissionLog::new(store);
    let record = log
        .find(collection, id)?
        .ok_or_else(|| anyhow!("No {} with id {}", collection.kind(), id))?;

    println!("{} ({})", record.display_name(), record.email());
    if let Some(company) = record.company() {
        println!("Company:   {}", company);
    }
    println!("Status:    {}", record.status_label());
    println!("Submitted: {}", record.submitted_at().to_rfc3339());
    println!("Subject:   {}", record.headline());
    if let Some((date, time)) = record.schedule() {
        println!("Requested: {} at {}", date, time);
    }
    if let SubmissionRecord::Booking(booking) = &record {
        println!("Price:     {}", booking.package_price);
        if !booking.addon_ids.is_empty() {
            let catalog = Catalog::studio();
            let addons: Vec<_> = booking
                .addon_ids
                .iter()
                .filter_map(|id| catalog.get(*id).map(|p| p.title.as_str()))
                .collect();
            println!("Add-ons:   {}", addons.join(", "));
        }
    }
    println!("\n{}", record.details());
    Ok(())
}

fn cmd_set_status(store: Arc<dyn KeyValueStore>, collection: &str, id: i64, status: &str) -> Result<()> {
    let collection = parse_collection(collection)?;
    let log = SubmissionLog::new(store);
    if log.update_status(collection, id, status)? {
        println!("{} {} is now {}", collection.kind(), id, status);
    } else {
        println!("No {} with id {}; nothing changed.", collection.kind(), id);
    }
    Ok(())
}

fn cmd_export(db: &StudioDb, format: &str) -> Result<()> {
    if format != "json" {
        anyhow::bail!("Unsupported format '{}'. Only 'json' is supported.", format);
    }

    let mut collections = serde_json::Map::new();
    for key in keys::ALL {
        let records: Vec<serde_json::Value> = db.load(key)?;
        collections.insert(key.to_string(), serde_json::Value::Array(records));
    }

    let export = serde_json::json!({
        "exported_at": Utc::now().to_rfc3339(),
        "stats": db::stats(db)?,
        "collections": collections,
    });

    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

fn cmd_packages(category: Option<&str>) -> Result<()> {
    let packages = Catalog::studio().by_category(category);
    if packages.is_empty() {
        println!("No packages found.");
        return Ok(());
    }

    println!("{:<4}  {:<26}  {:<36}  {}", "ID", "CATEGORY", "TITLE", "PRICE");
    println!("{}", "-".repeat(90));
    for package in packages {
        println!(
            "{:<4}  {:<26}  {:<36}  {}",
            package.id, package.category, package.title, package.price_display
        );
    }
    Ok(())
}

fn cmd_quote(package: Option<u32>, addons: &[u32]) -> Result<()> {
    let catalog = Catalog::studio();
    let mut form = BookingForm::new();
    if let Some(id) = package {
        form.state.choose(catalog, id);
    }
    for id in addons {
        form.state.choose(catalog, *id);
    }

    let quote = Quote::for_state(catalog, &form.state);
    match quote.selected_package {
        Some(p) => println!("{:<36}  ${}", p.title, p.price),
        None => println!("{:<36}  -", "(no package selected)"),
    }
    for addon in &quote.selected_addons {
        let qty = studio_core::booking::addon_multiplier(&addon.title);
        println!("+ {:<34}  ${} x {}", addon.title, addon.price, qty);
    }
    println!("{}", "-".repeat(48));
    println!("{:<36}  ${}", "Estimated total", quote.total_price);
    Ok(())
}

fn cmd_book(store: Arc<dyn KeyValueStore>, mut form: BookingForm) -> Result<()> {
    let log = SubmissionLog::new(store);
    let record = form.submit(Catalog::studio(), &log, Utc::now())?;

    info!("Booking {} stored", record.id);
    println!("Booking request received! (id {})", record.id);
    println!("Package: {} ({})", record.package_title, record.package_price);
    println!("Date:    {} at {}", record.date, record.time);
    Ok(())
}

fn cmd_inquire(store: Arc<dyn KeyValueStore>, mut form: InquiryForm) -> Result<()> {
    let log = SubmissionLog::new(store);
    let record = form.submit(&log, Utc::now())?;
    println!("Inquiry received! (id {})", record.id);
    Ok(())
}

fn cmd_galleries(store: Arc<dyn KeyValueStore>, action: GalleryAction) -> Result<()> {
    let galleries = GalleryService::new(store);
    let now = Utc::now();

    match action {
        GalleryAction::List => {
            for gallery in galleries.list(now)? {
                println!(
                    "{:<26}  {:<18}  {:<8}  {} images",
                    gallery.id,
                    gallery.name,
                    format!("{:?}", gallery.page).to_lowercase(),
                    gallery.images.len()
                );
                for image in &gallery.images {
                    println!("    - {}  {}", image.id, image.title);
                }
            }
        }
        GalleryAction::Create {
            name,
            page,
            description,
        } => {
            let page = GalleryPage::from_str(&page)
                .ok_or_else(|| anyhow!("Unknown page '{}'. Valid values: moes, landing, other", page))?;
            let gallery = galleries.create(&name, page, description.as_deref(), now)?;
            println!("Created gallery {} ({})", gallery.name, gallery.id);
        }
        GalleryAction::Delete { id } => {
            if galleries.delete(&id, now)? {
                println!("Deleted gallery {}", id);
            } else {
                println!("No gallery with id {}", id);
            }
        }
        GalleryAction::Upload { gallery, file } => {
            let (name, mime, bytes) = read_media(&file)?;
            let image = galleries.upload_image(&gallery, &name, mime, &bytes, now)?;
            println!("Uploaded {} as {}", image.title, image.id);
        }
        GalleryAction::DeleteImage { gallery, image } => {
            if galleries.delete_image(&gallery, &image, now)? {
                println!("Deleted image {}", image);
            } else {
                println!("No image {} in gallery {}", image, gallery);
            }
        }
    }
    Ok(())
}

fn cmd_images(store: Arc<dyn KeyValueStore>, action: ImageAction) -> Result<()> {
    let library = ImageLibrary::new(store);
    match action {
        ImageAction::List => {
            let images = library.list()?;
            if images.is_empty() {
                println!("No images uploaded yet.");
            }
            for image in images {
                println!("{:<14}  {:<30}  {} bytes", image.id, image.name, image.data_url.len());
            }
        }
        ImageAction::Add { file } => {
            let (name, mime, bytes) = read_media(&file)?;
            let image = library.add(&name, mime, &bytes, Utc::now())?;
            println!("Added {} (id {})", image.name, image.id);
        }
        ImageAction::Delete { id } => {
            if library.delete(id)? {
                println!("Deleted image {}", id);
            } else {
                println!("No image with id {}", id);
            }
        }
    }
    Ok(())
}

fn cmd_sessions(store: Arc<dyn KeyValueStore>, action: SessionAction) -> Result<()> {
    let sessions = FeaturedSessions::new(store);
    match action {
        SessionAction::List => {
            for (i, session) in sessions.list()?.iter().enumerate() {
                println!(
                    "{}. [{}] {} - {}{}",
                    i,
                    session.id,
                    session.artist,
                    session.title,
                    if session.audio_url.is_some() { "" } else { " (no audio)" }
                );
            }
        }
        SessionAction::Add {
            artist,
            title,
            description,
            image_url,
            audio,
        } => {
            let (_, mime, bytes) = read_media(&audio)?;
            let new = NewSession {
                artist,
                title,
                description,
                image_url,
                audio_url: Some(studio_core::content::data_url(mime, &bytes)),
            };
            let session = sessions.add(new, Utc::now())?;
            println!("Added session \"{}\" (id {})", session.title, session.id);
        }
        SessionAction::Delete { id } => {
            let removed = sessions.delete(id)?;
            println!("Session \"{}\" deleted.", removed.title);
        }
        SessionAction::Move { from, to } => {
            if sessions.move_session(from, to)? {
                println!("Session order updated.");
            } else {
                println!("Nothing to move.");
            }
        }
    }
    Ok(())
}

async fn cmd_chat(store: Arc<dyn KeyValueStore>, config: &StudioConfig) -> Result<()> {
    let model = config.chat_model()?;
    let log = Arc::new(SubmissionLog::new(store));
    let mut session = ChatSession::new(
        Arc::new(Catalog::studio().clone()),
        log,
        model,
        config.notifier(),
    );

    for message in session.transcript() {
        println!("assistant> {}", message.text);
    }

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = session.send(line).await;
        for message in &reply.messages {
            println!("assistant> {}\n", message.text);
        }
    }
    Ok(())
}
