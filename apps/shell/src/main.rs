//! `castellan`: drives the catalog, navigation and booking core from a terminal.

use anyhow::{Context, Result, bail};
use castellan::domain::config::SiteConfig;
use castellan::events::EventBus;
use castellan::features::booking::{self, Booking, BookingInner, FormKind, FormSession, delivery};
use castellan::features::catalog::{self, CatalogStore, FilterState, RevealController, Viewport};
use castellan::features::navigation::{self, RouteVariant};
use castellan::kernel::prelude::FilterCategory;
use castellan_logger::{LevelFilter, Logger};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "castellan", version, about = "Castle venue catalog, navigation and reservations")]
struct Cli {
    /// Log core decisions (routing, pre-fill, delivery) to the console
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse the catalog
    List {
        /// Comma separated category ids
        #[arg(short, long, default_value = "")]
        categories: String,
        /// Case-insensitive search text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Viewport width; narrow widths reveal entries in batches
        #[arg(short, long)]
        width: Option<u32>,
        /// Number of "load more" presses on a narrow viewport
        #[arg(short, long, default_value_t = 0)]
        more: usize,
    },
    /// Filter categories in display order
    Categories,
    /// Destination of a catalog title
    Route {
        title: String,
        /// Route the secondary "learn more" action
        #[arg(long)]
        learn_more: bool,
    },
    /// Mount a form, optionally with a navigation `type` parameter
    Form {
        form: FormKind,
        #[arg(short = 't', long = "type")]
        type_param: Option<String>,
    },
    /// Validate and submit a form
    Submit {
        form: FormKind,
        /// Field values as `name=value`
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

#[castellan_runtime::main(memory_efficient)]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).init()?;

    let site = SiteConfig::default();
    match cli.command {
        Command::List { categories, query, width, more } => list(site, &categories, query, width, more),
        Command::Categories => categories(),
        Command::Route { title, learn_more } => route(&title, learn_more),
        Command::Form { form, type_param } => mount(site, form, type_param.as_deref()),
        Command::Submit { form, fields } => submit(site, form, fields).await,
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to encode output")?);
    Ok(())
}

fn list(site: SiteConfig, categories: &str, query: String, width: Option<u32>, more: usize) -> Result<()> {
    let store = CatalogStore::castle();
    let filter = FilterState::new(catalog::parse_categories(categories)?, query);
    let viewport = width.map_or(Viewport::Wide, |width| Viewport::from_width(width, site.narrow_viewport_max));

    let total = filter.apply(store.entries()).len();
    let mut reveal = RevealController::from_config(&site);
    for _ in 0..more {
        if !reveal.advance(total) {
            break;
        }
    }

    let view = store.browse(&filter, &reveal, viewport);
    for entry in &view.entries {
        let tags: Vec<_> = entry.tags().collect();
        println!("{:<24} {:<40} [{}]", entry.title, entry.description, tags.join(", "));
    }
    println!("-- {} of {} shown{}", view.entries.len(), view.total, if view.can_load_more { ", more available" } else { "" });
    Ok(())
}

fn categories() -> Result<()> {
    for category in FilterCategory::ALL {
        println!("{:<14} {:<14} {}", category.id(), category.label(), category.icon().as_str());
    }
    Ok(())
}

fn route(title: &str, learn_more: bool) -> Result<()> {
    let variant = if learn_more { RouteVariant::LearnMore } else { RouteVariant::Primary };
    let destination = navigation::route(title, variant)?;
    println!("{destination}");
    Ok(())
}

fn mount(site: SiteConfig, form: FormKind, type_param: Option<&str>) -> Result<()> {
    let session = FormSession::open(form, type_param, booking::local_time(&site, Utc::now()).date_naive());

    println!("{} ({})", form, form.page());
    for spec in session.schema().fields {
        let marks = match (session.is_dirty(spec.name), session.is_touched(spec.name)) {
            (true, true) => " dirty touched",
            (true, false) => " dirty",
            (false, true) => " touched",
            (false, false) => "",
        };
        let required = if spec.required { "*" } else { " " };
        println!(
            "{required} {:<16} {:<8} {:<24}{marks}",
            spec.name,
            spec.kind.as_str(),
            session.value(spec.name).unwrap_or("-"),
        );
        if let Some(err) = session.error(spec.name) {
            println!("    ! {}", err.message);
        }
    }
    Ok(())
}

async fn submit(site: SiteConfig, form: FormKind, fields: Vec<(String, String)>) -> Result<()> {
    let events = EventBus::new();
    let worker = delivery::spawn_logger(&events)?;
    let booking = Booking::new(BookingInner { events: events.clone(), site });

    let now = Utc::now();
    let today = booking::local_time(&site, now).date_naive();
    let mut session = FormSession::mount(form);
    for (name, value) in fields {
        session.set(&name, value, today)?;
    }

    let result = booking.submit(&mut session, now);
    events.shutdown();
    worker.await.context("Delivery worker panicked")?;

    match result {
        Ok(submission) => print_json(&submission),
        Err(err) => {
            for field in err.field_errors() {
                eprintln!("{}: {}", field.field, field.message);
            }
            bail!(err)
        },
    }
}
