mod activity;
mod app;
mod models;
mod query;
mod seed;
mod storage;
mod store;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::time::Duration;

use activity::RefreshOutcome;
use app::{App, ListingPatch, NewLead, NewListing};
use models::{
    LeadSource, LeadStatus, ListingStatus, NoteKind, PropertyKind, relative_time, short_date,
};
use query::{LeadFilter, ListingFilter, SortOrder};
use storage::Storage;

#[derive(Parser)]
#[command(name = "estate")]
#[command(about = "Real estate back office - track listings, leads, and activity")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage property listings
    Listing {
        #[command(subcommand)]
        command: ListingCommands,
    },

    /// Manage sales leads
    Lead {
        #[command(subcommand)]
        command: LeadCommands,
    },

    /// Show the activity feed
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Check for new activity before listing (simulated, adds a delay)
        #[arg(long)]
        refresh: bool,
    },

    /// Manage notifications
    Notify {
        #[command(subcommand)]
        command: NotifyCommands,
    },

    /// Portfolio stats, lead volume chart, and recent activity
    Dashboard {
        /// Trailing window for the lead volume chart (days)
        #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=365))]
        days: u32,
    },

    /// Print the data directory
    Path,
}

#[derive(Subcommand)]
enum ListingCommands {
    /// Publish a listing
    Add {
        title: String,
        address: String,
        price: i64,

        #[arg(long, value_enum, default_value = "active")]
        status: ListingStatus,

        #[arg(long, value_enum, default_value = "house")]
        kind: PropertyKind,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        zip: Option<String>,

        #[arg(long)]
        bedrooms: Option<u32>,

        #[arg(long)]
        bathrooms: Option<u32>,

        #[arg(long)]
        sqft: Option<u32>,

        /// Cover image URL
        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// May be given multiple times
        #[arg(long = "amenity")]
        amenities: Vec<String>,
    },

    /// List listings
    List {
        /// Substring match on title, address, or city
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<ListingStatus>,

        #[arg(long, value_enum)]
        kind: Option<PropertyKind>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        min_price: Option<i64>,

        #[arg(long)]
        max_price: Option<i64>,

        #[arg(long, value_enum, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show listing details
    Show { id: String },

    /// Patch fields on a listing
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        price: Option<i64>,

        #[arg(long, value_enum)]
        status: Option<ListingStatus>,

        #[arg(long, value_enum)]
        kind: Option<PropertyKind>,

        #[arg(long)]
        bedrooms: Option<u32>,

        #[arg(long)]
        bathrooms: Option<u32>,

        #[arg(long)]
        sqft: Option<u32>,

        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a listing
    Delete { id: String },
}

#[derive(Subcommand)]
enum LeadCommands {
    /// Record a lead manually
    Add {
        name: String,
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "Unknown")]
        location: String,

        /// Property the lead asked about (free text)
        #[arg(long, default_value = "")]
        interest: String,

        #[arg(long, default_value = "0")]
        price: i64,

        #[arg(long, value_enum, default_value = "website")]
        source: LeadSource,
    },

    /// List leads
    List {
        /// Substring match on name, email, or property interest
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<LeadStatus>,

        #[arg(long, value_enum)]
        source: Option<LeadSource>,
    },

    /// Show lead details and notes
    Show { id: String },

    /// Move a lead through the pipeline
    Status {
        id: String,

        #[arg(value_enum)]
        status: LeadStatus,
    },

    /// Append a note to a lead
    Note { id: String, text: String },

    /// Delete a lead
    Delete { id: String },

    /// Generate one inbound web inquiry
    Simulate,
}

#[derive(Subcommand)]
enum NotifyCommands {
    /// List notifications
    List,

    /// Mark every notification as read
    ReadAll,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let storage = Storage::open()?;
    let mut app = App::open(storage.clone());

    match cli.command {
        Commands::Listing { command } => run_listing(&mut app, command)?,
        Commands::Lead { command } => run_lead(&mut app, command)?,

        Commands::Activity { limit, refresh } => {
            if refresh {
                match app.log.refresh(Duration::from_millis(800)) {
                    RefreshOutcome::NewActivity => println!("New activity came in.\n"),
                    RefreshOutcome::NoNews => println!("Nothing new.\n"),
                    RefreshOutcome::AlreadyRunning => println!("A refresh is already running.\n"),
                }
            }
            let now = Utc::now();
            for activity in app.log.activities().iter().take(limit) {
                println!(
                    "{:<14} {:<22} {}",
                    relative_time(activity.created_at, now),
                    truncate(&activity.title, 20),
                    activity.description
                );
            }
        }

        Commands::Notify { command } => match command {
            NotifyCommands::List => {
                let now = Utc::now();
                for n in app.log.notifications() {
                    let marker = if n.read { " " } else { "*" };
                    println!(
                        "{} {:<8} {:<22} {:<30} {}",
                        marker,
                        n.kind.to_string(),
                        truncate(&n.title, 20),
                        truncate(&n.message, 28),
                        relative_time(n.created_at, now)
                    );
                }
                println!("\n{} unread", app.log.unread_count());
            }
            NotifyCommands::ReadAll => {
                let flipped = app.log.mark_all_read();
                println!("Marked {flipped} notification(s) as read.");
            }
        },

        Commands::Dashboard { days } => {
            let stats = query::listing_stats(app.listings.all());
            println!("Portfolio");
            println!("  Total listings: {}", stats.total);
            println!("  Active:         {}", stats.active);
            println!("  Pending:        {}", stats.pending);
            println!("  Sold:           {}", stats.sold);
            println!("  Revenue:        ${:.2}", stats.revenue);

            println!("\nLead volume (last {days} days)");
            let series = query::lead_volume(app.leads.all(), days, Utc::now());
            let peak = series.iter().map(|b| b.count).max().unwrap_or(0).max(1);
            for bucket in &series {
                let width = bucket.count * 40 / peak;
                println!(
                    "  {} {:>3} {}",
                    bucket.day.format("%b %d"),
                    bucket.count,
                    "#".repeat(width)
                );
            }

            println!("\nRecent activity");
            let now = Utc::now();
            for activity in app.log.activities().iter().take(5) {
                println!(
                    "  {:<14} {}",
                    relative_time(activity.created_at, now),
                    activity.title
                );
            }
        }

        Commands::Path => {
            println!("{}", storage.dir().display());
        }
    }

    Ok(())
}

fn run_listing(app: &mut App, command: ListingCommands) -> Result<()> {
    match command {
        ListingCommands::Add {
            title,
            address,
            price,
            status,
            kind,
            city,
            state,
            zip,
            bedrooms,
            bathrooms,
            sqft,
            image,
            description,
            amenities,
        } => {
            let id = app.add_listing(NewListing {
                title,
                address,
                city,
                state,
                zip,
                price,
                status,
                kind,
                bedrooms,
                bathrooms,
                sqft,
                image,
                images: Vec::new(),
                description,
                amenities,
            });
            println!("Published listing {id}");
        }

        ListingCommands::List {
            search,
            status,
            kind,
            city,
            min_price,
            max_price,
            sort,
        } => {
            let filter = ListingFilter {
                search,
                status,
                kind,
                city,
                min_price,
                max_price,
            };
            let mut listings = query::filter_listings(app.listings.all(), &filter);
            query::sort_listings(&mut listings, sort);

            if listings.is_empty() {
                println!("No listings found.");
            } else {
                println!(
                    "{:<38} {:<10} {:<12} {:<26} {:>14}",
                    "ID", "STATUS", "TYPE", "TITLE", "PRICE"
                );
                println!("{}", "-".repeat(102));
                for listing in listings {
                    println!(
                        "{:<38} {:<10} {:<12} {:<26} {:>14}",
                        truncate(&listing.id, 36),
                        listing.status.to_string(),
                        listing.kind.to_string(),
                        truncate(&listing.title, 24),
                        money(listing.price)
                    );
                }
            }
        }

        ListingCommands::Show { id } => match app.listings.get(&id) {
            Some(listing) => {
                println!("{}", listing.title);
                println!("ID: {}", listing.id);
                println!("Address: {}", listing.address);
                if let Some(city) = listing.city_label() {
                    println!("City: {city}");
                }
                println!("Price: {}", money(listing.price));
                println!("Status: {}", listing.status);
                println!("Type: {}", listing.kind);
                if let (Some(bd), Some(ba)) = (listing.bedrooms, listing.bathrooms) {
                    println!("Layout: {bd} bd / {ba} ba");
                }
                if let Some(sqft) = listing.sqft {
                    println!("Area: {sqft} sqft");
                }
                println!("Added: {}", short_date(listing.created_at));
                if let Some(image) = &listing.image {
                    println!("Cover: {image}");
                }
                if !listing.images.is_empty() {
                    println!("Gallery: {} image(s)", listing.images.len());
                }
                if !listing.amenities.is_empty() {
                    println!("Amenities: {}", listing.amenities.join(", "));
                }
                if let Some(description) = &listing.description {
                    println!("\n{description}");
                }
            }
            None => println!("Listing '{id}' not found."),
        },

        ListingCommands::Update {
            id,
            title,
            address,
            city,
            price,
            status,
            kind,
            bedrooms,
            bathrooms,
            sqft,
            image,
            description,
        } => {
            app.update_listing(
                &id,
                ListingPatch {
                    title,
                    address,
                    city,
                    price,
                    status,
                    kind,
                    bedrooms,
                    bathrooms,
                    sqft,
                    image,
                    description,
                },
            )?;
            println!("Updated listing {id}");
        }

        ListingCommands::Delete { id } => {
            let removed = app.delete_listing(&id)?;
            println!("Deleted \"{}\"", removed.title);
        }
    }
    Ok(())
}

fn run_lead(app: &mut App, command: LeadCommands) -> Result<()> {
    match command {
        LeadCommands::Add {
            name,
            email,
            phone,
            location,
            interest,
            price,
            source,
        } => {
            let id = app.add_lead(NewLead {
                name,
                email,
                phone,
                location,
                property_interest: interest,
                property_price: price,
                source,
            });
            println!("Added lead {id}");
        }

        LeadCommands::List {
            search,
            status,
            source,
        } => {
            let filter = LeadFilter {
                search,
                status,
                source,
            };
            let leads = query::filter_leads(app.leads.all(), &filter);
            if leads.is_empty() {
                println!("No leads found.");
            } else {
                let now = Utc::now();
                println!(
                    "{:<38} {:<20} {:<11} {:<9} {:<26} {:>12}",
                    "ID", "NAME", "STATUS", "SOURCE", "INTEREST", "ADDED"
                );
                println!("{}", "-".repeat(119));
                for lead in leads {
                    println!(
                        "{:<38} {:<20} {:<11} {:<9} {:<26} {:>12}",
                        truncate(&lead.id, 36),
                        truncate(&lead.name, 18),
                        lead.status.to_string(),
                        lead.source.to_string(),
                        truncate(&lead.property_interest, 24),
                        relative_time(lead.created_at, now)
                    );
                }
            }
        }

        LeadCommands::Show { id } => match app.leads.get(&id) {
            Some(lead) => {
                println!("{} [{}]", lead.name, lead.avatar_text);
                println!("ID: {}", lead.id);
                println!("Email: {}", lead.email);
                if !lead.phone.is_empty() {
                    println!("Phone: {}", lead.phone);
                }
                println!("Location: {}", lead.location);
                println!(
                    "Interested in: {} ({})",
                    lead.property_interest,
                    money(lead.property_price)
                );
                println!("Status: {}", lead.status);
                println!("Source: {}", lead.source);
                println!("Added: {}", short_date(lead.created_at));
                if !lead.notes.is_empty() {
                    println!("\nNotes:");
                    for note in &lead.notes {
                        let tag = match note.kind {
                            NoteKind::User => "user",
                            NoteKind::System => "system",
                        };
                        println!("  [{:<6}] {} - {}", tag, short_date(note.created_at), note.text);
                    }
                }
            }
            None => println!("Lead '{id}' not found."),
        },

        LeadCommands::Status { id, status } => {
            app.set_lead_status(&id, status)?;
            println!("Lead {id} is now {status}");
        }

        LeadCommands::Note { id, text } => {
            app.add_lead_note(&id, &text, NoteKind::User)?;
            println!("Note added.");
        }

        LeadCommands::Delete { id } => {
            let removed = app.delete_lead(&id)?;
            println!("Deleted lead \"{}\"", removed.name);
        }

        LeadCommands::Simulate => {
            let id = app.simulate_inquiry();
            if let Some(lead) = app.leads.get(&id) {
                println!(
                    "Inbound inquiry: {} about \"{}\"",
                    lead.name, lead.property_interest
                );
            }
        }
    }
    Ok(())
}

fn money(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0), "$0");
        assert_eq!(money(950), "$950");
        assert_eq!(money(12_000), "$12,000");
        assert_eq!(money(4_250_000), "$4,250,000");
        assert_eq!(money(-1_500), "-$1,500");
    }

    #[test]
    fn money_handles_extreme_values() {
        assert_eq!(money(i64::MIN), "-$9,223,372,036,854,775,808");
        assert_eq!(money(i64::MAX), "$9,223,372,036,854,775,807");
    }

    #[test]
    fn truncate_caps_length() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long listing title", 10), "a very ...");
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        // Multibyte titles must shorten cleanly, not split a code point.
        assert_eq!(truncate("Propriété à Méribel de luxe", 10), "Proprié...");
        assert_eq!(truncate("Åkersberga Sjövilla", 8), "Åkers...");
        assert_eq!(truncate("日本語のタイトル", 5), "日本...");
        assert_eq!(truncate("Café", 10), "Café");
    }

    #[test]
    fn dashboard_window_is_bounded() {
        assert!(Cli::try_parse_from(["estate", "dashboard", "--days", "90"]).is_ok());
        assert!(Cli::try_parse_from(["estate", "dashboard", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["estate", "dashboard", "--days", "4000000000"]).is_err());
    }
}
