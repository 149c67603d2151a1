//! Chore Rota CLI - drives the rotation service against a JSON state file.

use std::env;
use std::error::Error;
use std::fs;
use std::process;

use tracing_subscriber::EnvFilter;

use chore_rota::adapters::JsonFileStore;
use chore_rota::application::RotationService;
use chore_rota::config::AppConfig;
use chore_rota::domain::foundation::{ChoreId, PersonId, Timestamp, ViolationId};
use chore_rota::domain::snapshot::StateSnapshot;
use chore_rota::ports::SnapshotStore;

const USAGE: &str = "\
Usage: chore-rota <command> [args]

Commands:
  status                          Show the current cycle and active violations
  rotate                          Archive the current cycle and start the next one
  done <person> <chore#>          Toggle completion for an assignment
  violation <person> <chore#> [--carry-over]
                                  Record a violation against the current cycle
  resolve <violation-id>          Resolve an active violation
  stats                           Show per-person completion rates and ranking
  export <path>                   Write the state snapshot to a file
  import <path>                   Replace the state with a snapshot file

Configuration via CHORE_ROTA_* environment variables (state_path,
roster_path, cycle_length_days, min/max_chores_per_person,
rotation_weekday, log_level).";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = JsonFileStore::new(config.state_path.clone());
    let mut service = match store.load()? {
        Some(snapshot) => RotationService::from_snapshot(snapshot)?,
        None => RotationService::new(config.roster()?, config.rotation_settings()),
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");

    match command {
        "status" => print_status(&service),
        "rotate" => {
            let cycle = service.start_new_cycle()?;
            store.save(service.state())?;
            println!(
                "Started cycle #{} ({} through {})",
                cycle.number(),
                cycle.starts_at().date(),
                cycle.deadline().date()
            );
            print_status(&service);
        }
        "done" => {
            let (person, chore) = parse_pairing(&service, &args)?;
            let cycle_id = service
                .current_cycle()
                .map(|c| c.id())
                .ok_or("No active cycle")?;
            let completed = service.toggle_completion(cycle_id, person, chore)?;
            store.save(service.state())?;
            println!(
                "{} -> {}",
                describe_pairing(&service, person, chore),
                if completed { "done" } else { "not done" }
            );
        }
        "violation" => {
            let (person, chore) = parse_pairing(&service, &args)?;
            let carry_over = args.iter().any(|a| a == "--carry-over");
            let violation =
                service.record_violation(person, chore, Timestamp::now(), carry_over)?;
            store.save(service.state())?;
            println!(
                "Recorded violation {} for {}{}",
                violation.id(),
                describe_pairing(&service, person, chore),
                if carry_over { " (carries over)" } else { "" }
            );
        }
        "resolve" => {
            let id: ViolationId = args
                .get(1)
                .ok_or("resolve needs a violation id")?
                .parse()?;
            service.resolve_violation(id)?;
            store.save(service.state())?;
            println!("Resolved violation {}", id);
        }
        "stats" => print_stats(&service),
        "export" => {
            let path = args.get(1).ok_or("export needs a target path")?;
            let json = serde_json::to_string_pretty(&service.export_snapshot())?;
            fs::write(path, json)?;
            println!("Exported state to {}", path);
        }
        "import" => {
            let path = args.get(1).ok_or("import needs a source path")?;
            let contents = fs::read_to_string(path)?;
            let snapshot: StateSnapshot = serde_json::from_str(&contents)?;
            service.import_snapshot(snapshot)?;
            store.save(service.state())?;
            println!("Imported state from {}", path);
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => {
            eprintln!("Unknown command '{}'\n\n{}", other, USAGE);
            process::exit(2);
        }
    }

    Ok(())
}

/// Resolves `<person> <chore#>` CLI arguments against the roster.
fn parse_pairing(
    service: &RotationService,
    args: &[String],
) -> Result<(PersonId, ChoreId), Box<dyn Error>> {
    let name = args.get(1).ok_or("missing <person> argument")?;
    let person = service
        .roster()
        .find_person(name)
        .ok_or_else(|| format!("No '{}' in the roster", name))?;

    let number: usize = args
        .get(2)
        .ok_or("missing <chore#> argument")?
        .parse()
        .map_err(|_| "chore# must be a number")?;
    let chore = ChoreId::new(number.checked_sub(1).ok_or("chore# starts at 1")?);
    if !service.roster().contains_chore(chore) {
        return Err(format!("No chore #{} in the roster", number).into());
    }
    Ok((person, chore))
}

fn describe_pairing(service: &RotationService, person: PersonId, chore: ChoreId) -> String {
    format!(
        "{}: {}",
        service.roster().person_name(person).unwrap_or("?"),
        service.roster().chore_text(chore).unwrap_or("?")
    )
}

fn print_status(service: &RotationService) {
    let roster = service.roster();
    match service.current_cycle() {
        None => println!("No active cycle yet. Run 'chore-rota rotate' to start one."),
        Some(cycle) => {
            println!(
                "Cycle #{} - {} through {}",
                cycle.number(),
                cycle.starts_at().date(),
                cycle.deadline().date()
            );
            for person in roster.person_ids() {
                let name = roster.person_name(person).unwrap_or("?");
                println!("  {}", name);
                for chore in cycle.chores_for(person) {
                    let mark = match cycle.ledger().get(person, chore) {
                        Some(true) => "x",
                        _ => " ",
                    };
                    println!(
                        "    [{}] #{} {}",
                        mark,
                        chore.index() + 1,
                        roster.chore_text(chore).unwrap_or("?")
                    );
                }
            }
        }
    }

    let active = service.state().violations.active();
    if active.is_empty() {
        println!("No active violations.");
    } else {
        println!("Active violations:");
        for v in active {
            println!(
                "  {} - {}{}",
                v.id(),
                describe_pairing(service, v.person(), v.chore()),
                if v.carry_over() { " (carries over)" } else { "" }
            );
        }
    }
}

fn print_stats(service: &RotationService) {
    let roster = service.roster();
    let report = service.statistics();

    println!("{:<12} {:>10} {:>10} {:>8} {:>11}", "Person", "Assigned", "Completed", "Rate", "Violations");
    for person in &report.ranking {
        let stats = &report.per_person[person.index()];
        println!(
            "{:<12} {:>10} {:>10} {:>7.0}% {:>11}",
            roster.person_name(*person).unwrap_or("?"),
            stats.assigned,
            stats.completed,
            stats.completion_rate * 100.0,
            stats.violation_count
        );
    }
}
