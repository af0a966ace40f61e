//! Console frontend for the experience client.
//!
//! A thin shim over the library's controllers: each subcommand builds the
//! matching controller, waits for it to settle, and prints the result.
//! Results go to stdout, diagnostics to stderr via tracing.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use excursio::api::{AvailabilityQuery, ExperienceApi, HttpBackend};
use excursio::controllers::{
    DetailController, ListController, ResultsController, SearchSeed,
};
use excursio::domain::{Category, Difficulty, SortBy, Status};
use excursio::observability::init_tracing;
use excursio::search::{FilterCriteria, RequestState};
use excursio::ui::format::{format_duration, format_price};
use excursio::ui::viewmodel::ExperienceRow;
use excursio::Config;

const USAGE: &str = "\
excursio <command> [options]

Commands:
  list          Browse experiences with filters
  search        Search with booking context (location, dates, party size)
  get <id>      Show one experience
  availability <id> --start-date D --end-date D --participants N
  delete <id> [--yes]
  locations     List known locations
  help          Show this message

List / search options:
  --search TEXT          --category NAME        --difficulty NAME
  --location TEXT        --location-id ID       --min-price N
  --max-price N          --start-date YYYY-MM-DD
  --end-date YYYY-MM-DD  --participants N       --sort NAME
  --status active|inactive                       --page N (one-based)
";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("excursio: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        print!("{USAGE}");
        return ExitCode::FAILURE;
    };
    if command == "help" || command == "--help" {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let api: Arc<dyn ExperienceApi> = match HttpBackend::new(&config) {
        Ok(backend) => Arc::new(backend),
        Err(err) => {
            eprintln!("excursio: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (positional, options) = split_args(&args[1..]);
    let outcome = match command {
        "list" => run_list(api, &config, &options).await,
        "search" => run_search(api, &config, &options).await,
        "get" => run_get(api, positional.first()).await,
        "availability" => run_availability(api, positional.first(), &options).await,
        "delete" => run_delete(api, positional.first(), options.contains_key("yes")).await,
        "locations" => run_locations(api).await,
        other => {
            eprintln!("excursio: unknown command {other:?}\n");
            print!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("excursio: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Splits arguments into positional values and `--flag [value]` options.
/// A flag followed by another flag or by nothing is treated as boolean.
fn split_args(args: &[String]) -> (Vec<String>, BTreeMap<String, String>) {
    let mut positional = Vec::new();
    let mut options = BTreeMap::new();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--") {
            let value = match iter.peek() {
                Some(next) if !next.starts_with("--") => iter.next().cloned().unwrap_or_default(),
                _ => String::new(),
            };
            options.insert(name.to_string(), value);
        } else {
            positional.push(arg.clone());
        }
    }
    (positional, options)
}

fn criteria_from_options(options: &BTreeMap<String, String>) -> Result<FilterCriteria, String> {
    let mut criteria = FilterCriteria {
        search: options.get("search").cloned(),
        location: options.get("location").cloned(),
        location_id: options.get("location-id").cloned(),
        ..FilterCriteria::default()
    };
    if let Some(v) = options.get("category") {
        criteria.category = Some(v.parse::<Category>().map_err(|e| e.to_string())?);
    }
    if let Some(v) = options.get("difficulty") {
        criteria.difficulty = Some(v.parse::<Difficulty>().map_err(|e| e.to_string())?);
    }
    if let Some(v) = options.get("min-price") {
        criteria.min_price = Some(v.parse().map_err(|_| format!("invalid price: {v}"))?);
    }
    if let Some(v) = options.get("max-price") {
        criteria.max_price = Some(v.parse().map_err(|_| format!("invalid price: {v}"))?);
    }
    if let Some(v) = options.get("start-date") {
        criteria.start_date = Some(v.parse().map_err(|_| format!("invalid date: {v}"))?);
    }
    if let Some(v) = options.get("end-date") {
        criteria.end_date = Some(v.parse().map_err(|_| format!("invalid date: {v}"))?);
    }
    if let Some(v) = options.get("participants") {
        criteria.participants = Some(v.parse().map_err(|_| format!("invalid count: {v}"))?);
    }
    if let Some(v) = options.get("status") {
        criteria.status = Some(v.parse::<Status>().map_err(|e| e.to_string())?);
    }
    if let Some(v) = options.get("sort") {
        let sort = match v.as_str() {
            "rating" => SortBy::Rating,
            "price_asc" => SortBy::PriceAsc,
            "price_desc" => SortBy::PriceDesc,
            "duration" => SortBy::Duration,
            "newest" | "createdAt_desc" => SortBy::CreatedDesc,
            other => return Err(format!("unknown sort: {other}")),
        };
        criteria.sort_by = Some(sort);
    }
    Ok(criteria)
}

fn page_index(options: &BTreeMap<String, String>) -> Result<usize, String> {
    match options.get("page") {
        None => Ok(0),
        Some(v) => {
            let page: usize = v.parse().map_err(|_| format!("invalid page: {v}"))?;
            if page == 0 {
                return Err("pages are one-based".to_string());
            }
            Ok(page - 1)
        }
    }
}

fn print_rows(rows: &[ExperienceRow], total_count: usize, total_pages: usize) {
    if rows.is_empty() {
        println!("No experiences found");
        return;
    }
    for row in rows {
        let stars: String = row
            .stars
            .iter()
            .map(|&filled| if filled { '\u{2605}' } else { '\u{2606}' })
            .collect();
        println!(
            "{:<24}  {:<20}  {:<14}  {:>10}  {:>10}  {}  [{}]",
            row.id, row.title, row.category, row.price, row.duration, stars, row.status.label
        );
    }
    println!("{total_count} experiences, {total_pages} pages");
}

async fn run_list(
    api: Arc<dyn ExperienceApi>,
    config: &Config,
    options: &BTreeMap<String, String>,
) -> Result<(), String> {
    let criteria = criteria_from_options(options)?;
    let page = page_index(options)?;
    let mut list = ListController::with_criteria(api, config, criteria);
    if page > 0 {
        list.change_page(page);
    } else {
        list.load();
    }
    list.settle().await;
    match list.state() {
        RequestState::Success(result) => {
            print_rows(&list.rows(), result.total_count, result.total_pages);
            Ok(())
        }
        RequestState::Failed(info) => Err(info.message),
        RequestState::Idle | RequestState::Loading => Err("no response".to_string()),
    }
}

async fn run_search(
    api: Arc<dyn ExperienceApi>,
    config: &Config,
    options: &BTreeMap<String, String>,
) -> Result<(), String> {
    // Command-line flags map onto the same names a route query would use.
    let mut wire = BTreeMap::new();
    for (flag, param) in [
        ("location-id", "locationId"),
        ("start-date", "startDate"),
        ("end-date", "endDate"),
        ("participants", "participants"),
        ("page", "page"),
    ] {
        if let Some(v) = options.get(flag) {
            wire.insert(param.to_string(), v.clone());
        }
    }
    let seed = SearchSeed::from_query_params(&wire);

    let mut results = ResultsController::new(api, config, seed);
    results.load();
    results.settle().await;
    println!("{}", results.summary());
    match results.state() {
        RequestState::Success(outcome) => {
            print_rows(&results.rows(), outcome.page.total_count, outcome.page.total_pages);
            let range = results.price_range();
            println!("Price range: {:.0} - {:.0}", range.min, range.max);
            Ok(())
        }
        RequestState::Failed(info) => Err(info.message),
        RequestState::Idle | RequestState::Loading => Err("no response".to_string()),
    }
}

async fn run_get(api: Arc<dyn ExperienceApi>, id: Option<&String>) -> Result<(), String> {
    let id = id.ok_or("usage: excursio get <id>")?;
    let mut detail = DetailController::new(api);
    detail.load(id).await;
    let Some(exp) = detail.experience() else {
        return Err(detail
            .state()
            .error()
            .map(|info| info.message.clone())
            .unwrap_or_else(|| "no response".to_string()));
    };
    println!("{}", exp.title);
    println!("  {}", exp.short_description);
    println!(
        "  {} · {} · {} · {}",
        exp.category.label(),
        exp.difficulty.label(),
        format_price(exp.price, &exp.currency),
        format_duration(exp.duration)
    );
    println!(
        "  {} ({} reviews) · up to {} participants",
        exp.rating, exp.review_count, exp.max_participants
    );
    println!("  Meeting point: {}", exp.meeting_point);
    if !exp.availability.is_empty() {
        println!("  Next dates:");
        for slot in exp.availability.iter().take(5) {
            println!("    {} ({} slots)", slot.date, slot.available_slots);
        }
    }
    Ok(())
}

async fn run_availability(
    api: Arc<dyn ExperienceApi>,
    id: Option<&String>,
    options: &BTreeMap<String, String>,
) -> Result<(), String> {
    let id = id.ok_or("usage: excursio availability <id> --start-date D --end-date D --participants N")?;
    let start_date = options
        .get("start-date")
        .and_then(|v| v.parse().ok())
        .ok_or("--start-date YYYY-MM-DD is required")?;
    let end_date = options
        .get("end-date")
        .and_then(|v| v.parse().ok())
        .ok_or("--end-date YYYY-MM-DD is required")?;
    let participants = options
        .get("participants")
        .and_then(|v| v.parse().ok())
        .ok_or("--participants N is required")?;

    let mut detail = DetailController::new(api);
    detail.load(id).await;
    if detail.experience().is_none() {
        return Err(detail
            .state()
            .error()
            .map(|info| info.message.clone())
            .unwrap_or_else(|| "no response".to_string()));
    }
    let query = AvailabilityQuery {
        start_date,
        end_date,
        participants,
    };
    let check = detail
        .check_availability(&query)
        .await
        .map_err(|e| e.to_string())?;
    if check.available {
        println!("Available");
    } else {
        println!("Not available for those dates");
    }
    Ok(())
}

async fn run_delete(
    api: Arc<dyn ExperienceApi>,
    id: Option<&String>,
    assume_yes: bool,
) -> Result<(), String> {
    let id = id.ok_or("usage: excursio delete <id> [--yes]")?;
    let mut detail = DetailController::new(api);
    detail.load(id).await;
    let Some(pending) = detail.request_delete() else {
        return Err(detail
            .state()
            .error()
            .map(|info| info.message.clone())
            .unwrap_or_else(|| "no response".to_string()));
    };

    if !assume_yes {
        print!("{} [y/N] ", pending.prompt);
        std::io::stdout().flush().map_err(|e| e.to_string())?;
        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .map_err(|e| e.to_string())?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Cancelled");
            return Ok(());
        }
    }

    let (_, notice) = detail.confirm_delete(&pending).await;
    match notice.level {
        excursio::NoticeLevel::Success => {
            println!("{}", notice.message);
            Ok(())
        }
        excursio::NoticeLevel::Error => Err(notice.message),
    }
}

async fn run_locations(api: Arc<dyn ExperienceApi>) -> Result<(), String> {
    let locations = api.locations().await.map_err(|e| e.to_string())?;
    if locations.is_empty() {
        println!("No locations known");
    }
    for location in locations {
        match location.id {
            Some(id) => println!("{}  {}, {}  [{id}]", location.name, location.city, location.country),
            None => println!("{}  {}, {}", location.name, location.city, location.country),
        }
    }
    Ok(())
}
