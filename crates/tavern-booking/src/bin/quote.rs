//! # Booking Quote Tool
//!
//! Quotes the discount for a booking and optionally submits it.
//!
//! ## Usage
//! ```bash
//! # Preview the discount for a table tonight
//! cargo run -p tavern-booking --bin quote -- --kind table --date 2025-07-18 --time 19:30
//!
//! # Book a table tennis slot
//! cargo run -p tavern-booking --bin quote -- --kind table-tennis \
//!     --date 2025-07-18 --time 14:00 --name Ana --email ana@example.com --submit
//! ```
//!
//! With `--submit`, the name and email double as the signed-in user.

use anyhow::{bail, Context};
use std::env;
use std::path::PathBuf;
use tavern_booking::{BookingConfig, BookingOutcome, BookingService, HttpTransport, TracingSink};
use tavern_core::validation::{parse_booking_date, parse_booking_time};
use tavern_core::{BookingKind, BookingRequest, Session, SystemClock, UserProfile};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Tavern Booking Quote

Usage: quote --kind <KIND> [OPTIONS]

Options:
  -k, --kind <KIND>      table | table-tennis | 8-ball-pool
  -d, --date <DATE>      Booking date, YYYY-MM-DD
  -t, --time <TIME>      Booking time, HH:MM (24-hour)
  -g, --guests <N>       Party size (tables only)
      --name <NAME>      Contact name
      --email <EMAIL>    Contact email
      --submit           Send the booking to the backend
  -c, --config <PATH>    Config file (default: platform config dir)
  -h, --help             Show this help message";

#[derive(Debug, Default)]
struct Args {
    kind: Option<String>,
    date: Option<String>,
    time: Option<String>,
    guests: Option<u32>,
    name: Option<String>,
    email: Option<String>,
    submit: bool,
    config: Option<PathBuf>,
    help: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .with_context(|| format!("{} requires a value", name))
        };

        match arg.as_str() {
            "--kind" | "-k" => args.kind = Some(value("--kind")?),
            "--date" | "-d" => args.date = Some(value("--date")?),
            "--time" | "-t" => args.time = Some(value("--time")?),
            "--guests" | "-g" => {
                let raw = value("--guests")?;
                args.guests = Some(
                    raw.parse()
                        .with_context(|| format!("invalid party size: {}", raw))?,
                );
            }
            "--name" => args.name = Some(value("--name")?),
            "--email" => args.email = Some(value("--email")?),
            "--config" | "-c" => args.config = Some(PathBuf::from(value("--config")?)),
            "--submit" => args.submit = true,
            "--help" | "-h" => args.help = true,
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(args)
}

fn parse_kind(raw: &str) -> anyhow::Result<BookingKind> {
    if raw.eq_ignore_ascii_case("table") {
        return Ok(BookingKind::Table);
    }
    let variant = raw.parse()?;
    Ok(BookingKind::Game { variant })
}

fn build_request(args: &Args) -> anyhow::Result<BookingRequest> {
    let kind = parse_kind(args.kind.as_deref().context("--kind is required")?)?;
    let mut request = BookingRequest::new(kind);

    if let Some(date) = &args.date {
        request = request.with_date(parse_booking_date(date)?);
    }
    if let Some(time) = &args.time {
        request = request.with_time(parse_booking_time(time)?);
    }
    if let Some(guests) = args.guests {
        request = request.with_party_size(guests);
    }
    request.contact_name = args.name.clone().unwrap_or_default();
    request.contact_email = args.email.clone().unwrap_or_default();

    Ok(request)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tavern_booking=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    let request = build_request(&args)?;
    let config = BookingConfig::load(args.config.clone()).context("loading booking config")?;
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let transport = HttpTransport::new(config.clone())?;
    let service = BookingService::new(config, transport, TracingSink, SystemClock);

    let breakdown = service.preview(&request);
    println!("Booking:    {}", request.kind.label());
    println!("Lead time:  {}", breakdown.lead_time);
    if let Some(band) = breakdown.time_band {
        println!("Time band:  {:?} ({})", band, breakdown.time_of_day);
    }
    println!("Discount:   {}", breakdown.total);
    println!();
    println!("Booking rules:");
    for rule in service.rules(&request) {
        println!("  • {}", rule.description);
    }

    if !args.submit {
        return Ok(());
    }

    let session = match (&args.name, &args.email) {
        (Some(name), Some(email)) => Session::signed_in(UserProfile {
            id: email.clone(),
            name: name.clone(),
            email: email.clone(),
            is_admin: false,
        }),
        _ => Session::anonymous(),
    };

    println!();
    match service.submit(&session, &request, "/quote").await {
        BookingOutcome::Confirmed { confirmation } => println!("✓ {}", confirmation.message()),
        BookingOutcome::LoginRequired { .. } => {
            bail!("--name and --email are required to submit a booking")
        }
        BookingOutcome::MissingFields { fields } => {
            let names: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();
            bail!("missing fields: {}", names.join(", "))
        }
        BookingOutcome::Rejected { message } => bail!("booking rejected: {}", message),
        BookingOutcome::TransportFailed { reason, .. } => bail!("submission failed: {}", reason),
    }

    Ok(())
}
