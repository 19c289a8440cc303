use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

use qevent::app::create_event_use_case::{CreateEventUseCase, EventForm};
use qevent::app::detail_use_case::{
    description_text, price_label, when_and_where, EventDetail, EventDetailUseCase,
};
use qevent::app::listing_use_case::ListingUseCase;
use qevent::app::ports::ListingSource;
use qevent::app::session::SessionStatus;
use qevent::app::view::{user_message, ListView};
use qevent::config::Config;
use qevent::constants::{
    ARTISTS_LOAD_FAILED, EVENTS_LOAD_FAILED, EVENTS_ROUTE, EVENT_CREATE_FAILED, TAGS_LOAD_FAILED,
};
use qevent::infra::QeventClient;
use qevent::logging;
use qevent::pipeline::{tag_link, EventFilter};
use qevent::types::{Artist, Event, Tag};
use qevent::QeventError;

#[derive(Parser)]
#[command(name = "qevent")]
#[command(about = "Browse and create events on the QEvent backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./qevent.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print normalized records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List artists
    Artists,
    /// List events, optionally filtered by tag and/or artist
    Events {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        /// Raw query string, e.g. "tag=Music&artist=Alice%20Johnson"
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one event
    Event {
        id: String,
    },
    /// List tags
    Tags,
    /// Create an event (requires a session token)
    Create(CreateArgs),
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    date: String,
    #[arg(long)]
    time: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value = "")]
    artist: String,
    /// Comma separated, e.g. "Music, Live"
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long, default_value = "")]
    image: String,
    #[arg(long, default_value = "")]
    description: String,
}

impl From<CreateArgs> for EventForm {
    fn from(args: CreateArgs) -> Self {
        EventForm {
            name: args.name,
            date: args.date,
            time: args.time,
            location: args.location,
            price: args.price,
            image: args.image,
            tags: args.tags,
            artist: args.artist,
            description: args.description,
        }
    }
}

/// Run one request for `view`; Ctrl-C abandons it and the late result is never applied
async fn load_into<T, F>(view: &mut ListView<T>, load: F) -> bool
where
    F: Future<Output = qevent::Result<Vec<T>>>,
{
    let ticket = view.begin();
    let guard = view.guard();
    tokio::select! {
        outcome = load => view.apply(ticket, outcome),
        _ = tokio::signal::ctrl_c() => {
            guard.teardown();
            warn!("Interrupted, discarding pending request");
            false
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON mode keeps stdout to the records; failures go to stderr
fn print_view_json<T: Serialize>(view: &ListView<T>) -> anyhow::Result<()> {
    if let Some(message) = view.error() {
        eprintln!("Error: {message}");
    }
    print_json(&view.items())
}

/// Common epilogue for list views: error banner or empty notice
fn report_view<T>(view: &ListView<T>, what: &str) -> bool {
    if let Some(message) = view.error() {
        println!("❌ Error: {message}");
        return false;
    }
    if view.is_empty_state() {
        println!("No {what} found.");
        return false;
    }
    true
}

fn print_artists(artists: &[Artist]) {
    for artist in artists {
        println!("🎤 {}", artist.name);
        if !artist.artist.is_empty() {
            println!("   aka {}", artist.artist);
        }
        if !artist.location.is_empty() {
            println!("   📍 {}", artist.location);
        }
        if !artist.description.is_empty() {
            println!("   {}", artist.description);
        }
    }
}

fn print_events(events: &[Event]) {
    for event in events {
        println!("🎫 {} [{}]", event.name, event.id);
        println!("   {} · {} · {}", event.date, event.time, event.location);
        println!("   by {} · {}", event.artist, price_label(event.price));
        if !event.tags.is_empty() {
            let tags: Vec<String> = event.tags.iter().map(|t| format!("#{t}")).collect();
            println!("   {}", tags.join(" "));
        }
    }
}

fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("# {}  → {}", tag, tag_link(tag));
    }
}

fn print_event_detail(detail: &EventDetail) {
    println!("{}", detail.title());
    match detail {
        EventDetail::Found(page) => {
            let event = &page.event;
            let when_where = when_and_where(page);
            if !when_where.is_empty() {
                println!("{when_where}");
            }
            println!("{}", event.artist);
            if !event.tags.is_empty() {
                let tags: Vec<String> = event.tags.iter().map(|t| format!("# {t}")).collect();
                println!("{}", tags.join("  "));
            }
            println!();
            println!("{}", description_text(event));
            println!();
            println!("Price: {}", price_label(event.price));
            println!("Image: {}", event.image);
        }
        EventDetail::NotFound { id } => {
            println!("Could not load event with id: {id}");
            println!("Back to events: {EVENTS_ROUTE}");
        }
    }
}

fn loaded<T>(view: &ListView<T>) -> bool {
    !view.is_loading() && view.error().is_none()
}

/// Non-zero when the view failed to load, so scripts can tell
fn view_status<T>(view: &ListView<T>) -> ExitCode {
    if loaded(view) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let _log_guard = logging::init_logging(&config.logging);
    let client = QeventClient::from_config(&config.api)?;
    info!("Using backend {}", client.base_url());
    let source: Arc<dyn ListingSource> = Arc::new(client);

    match cli.command {
        Commands::Artists => {
            let use_case = ListingUseCase::new(source);
            let mut view = ListView::new(ARTISTS_LOAD_FAILED);
            if !load_into(&mut view, use_case.artists()).await {
                return Ok(ExitCode::FAILURE);
            }
            if cli.json {
                print_view_json(&view)?;
            } else if report_view(&view, "artists") {
                print_artists(view.items());
            }
            Ok(view_status(&view))
        }
        Commands::Events { tag, artist, query } => {
            let filter = EventFilter::new(tag, artist)
                .or(query.as_deref().map(EventFilter::from_query).unwrap_or_default());
            let use_case = ListingUseCase::new(source);
            let mut view = ListView::new(EVENTS_LOAD_FAILED);
            if !load_into(&mut view, use_case.events(&filter)).await {
                return Ok(ExitCode::FAILURE);
            }
            if cli.json {
                print_view_json(&view)?;
            } else {
                for line in filter.describe() {
                    println!("{line}");
                }
                if report_view(&view, "events") {
                    print_events(view.items());
                }
            }
            Ok(view_status(&view))
        }
        Commands::Event { id } => {
            let detail = EventDetailUseCase::new(source).load(&id).await;
            if cli.json {
                match &detail {
                    EventDetail::Found(page) => print_json(&page.event)?,
                    EventDetail::NotFound { .. } => print_json(&serde_json::Value::Null)?,
                }
            } else {
                print_event_detail(&detail);
            }
            match detail {
                EventDetail::Found(_) => Ok(ExitCode::SUCCESS),
                EventDetail::NotFound { .. } => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Tags => {
            let use_case = ListingUseCase::new(source);
            let mut view = ListView::new(TAGS_LOAD_FAILED);
            if !load_into(&mut view, use_case.tags()).await {
                return Ok(ExitCode::FAILURE);
            }
            if cli.json {
                print_view_json(&view)?;
            } else if report_view(&view, "tags") {
                print_tags(view.items());
            }
            Ok(view_status(&view))
        }
        Commands::Create(args) => {
            let session = SessionStatus::from_token(config.session.token.as_deref());
            let form = EventForm::from(args);
            let use_case = CreateEventUseCase::new(source);

            match use_case.submit(session, &form).await {
                Ok(payload) => {
                    if cli.json {
                        print_json(&payload)?;
                    } else {
                        println!("✅ Event created successfully! ({})", payload.id);
                        println!("→ {EVENTS_ROUTE}");
                    }
                    Ok(ExitCode::SUCCESS)
                }
                // rejected locally, nothing was sent
                Err(e @ (QeventError::Validation { .. } | QeventError::Session(_))) => {
                    anyhow::bail!("{e}");
                }
                Err(e) => {
                    error!("Create event failed: {}", e);
                    anyhow::bail!("{}", user_message(&e, EVENT_CREATE_FAILED));
                }
            }
        }
    }
}
