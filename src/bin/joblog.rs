use anyhow::Result;
use chrono::Utc;
use joblog::cli;
use joblog::config::Config;
use joblog::context::{SharedContext, StandardContext};
use joblog::model::PlannerTask;
use joblog::model::adapter;
use joblog::model::display::RecordDisplay;
use joblog::schedule::{Bucket, dates, resolve_bucket};
use joblog::storage::LocalStorage;
use joblog::store::JobStore;
use joblog::summary::DashboardSummary;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        cli::print_help("joblog");
        return Ok(());
    }

    let override_root = take_value_flag(&mut args, &["--root", "-r"]).map(PathBuf::from);
    let ctx: SharedContext = Arc::new(StandardContext::new(override_root));
    init_logging(&ctx);

    let config = match Config::load(ctx.as_ref()) {
        Ok(config) => config,
        Err(err) if Config::is_missing_config_error(&err) => Config::default(),
        Err(err) => return Err(err),
    };

    let storage = LocalStorage::new(ctx.clone());
    let mut store = JobStore::open(storage, &config.user)?;
    let today = dates::local_today();

    match args.first().map(String::as_str) {
        Some("list") => {
            let scope = args.get(1).map(String::as_str).unwrap_or("all");
            let buckets: Vec<Bucket> = match scope {
                "today" => vec![Bucket::Today],
                "upcoming" => vec![Bucket::Upcoming],
                _ => vec![Bucket::Today, Bucket::Upcoming],
            };
            for bucket in buckets {
                let tasks = store.tasks_in_bucket(bucket, today, !config.hide_completed);
                println!("{} ({}):", bucket, tasks.len());
                for task in tasks {
                    println!(
                        "  {} {:<6} {}  ({})",
                        task.status_symbol(),
                        task.countdown_text(today),
                        task.title,
                        short_id(&task.id)
                    );
                }
            }
        }
        Some("add") => {
            let mut rest: Vec<String> = args[1..].to_vec();
            let due_raw = take_value_flag(&mut rest, &["--due"]);
            let bucket_raw = take_value_flag(&mut rest, &["--bucket"]);
            if rest.is_empty() {
                anyhow::bail!("Usage: joblog add <title> [--due YYYY-MM-DD] [--bucket today|upcoming]");
            }

            let mut task = PlannerTask::new(&rest.join(" "), Utc::now().timestamp_millis());
            task.due = due_raw.as_deref().and_then(dates::parse_ymd);
            if let Some(raw) = &due_raw
                && task.due.is_none()
            {
                eprintln!("Ignoring unparseable due date '{}'.", raw);
            }
            task.bucket = match bucket_raw {
                Some(raw) => Bucket::from_legacy(&raw),
                None => Some(config.default_bucket),
            };

            let resolved = resolve_bucket(&task, today);
            log::info!("Adding task '{}' to {}", task.title, resolved);
            store.add_task(task)?;
            println!("Added to {}.", resolved);
        }
        Some("done") => {
            let Some(prefix) = args.get(1) else {
                anyhow::bail!("Usage: joblog done <task-id>");
            };
            let matches: Vec<String> = store
                .tasks
                .iter()
                .filter(|t| t.id.starts_with(prefix.as_str()))
                .map(|t| t.id.clone())
                .collect();
            match matches.len() {
                0 => println!("No task matches '{}'.", prefix),
                1 => {
                    if let Some(task) = store.toggle_task(&matches[0])? {
                        println!("{} {}", task.status_symbol(), task.title);
                    }
                }
                n => println!("'{}' is ambiguous ({} tasks match).", prefix, n),
            }
        }
        Some("apps") => {
            for application in store.sorted_applications() {
                println!(
                    "{} {:<13} {:<6} {} — {}",
                    application.status_symbol(),
                    application.status.to_string(),
                    application.countdown_text(today),
                    application.company,
                    application.role
                );
            }
        }
        Some("import") => {
            let Some(path) = args.get(1) else {
                anyhow::bail!("Usage: joblog import <file.json>");
            };
            let json = fs::read_to_string(path)?;
            let root: serde_json::Value = serde_json::from_str(&json)?;
            let imported = adapter::workspace_from_export(&root);
            let count = store.merge_import(imported)?;
            log::info!("Imported {} records from {}", count, path);
            println!("Imported {} records.", count);
        }
        None | Some("summary") => {
            let summary = DashboardSummary::compute(&store, today, config.summary_window_days);
            println!(
                "Applications: {} open / {} closed",
                summary.open_applications, summary.closed_applications
            );
            println!(
                "Tasks: {} today ({} overdue), {} upcoming",
                summary.tasks_today, summary.tasks_overdue, summary.tasks_upcoming
            );
            println!(
                "Interviews in the next {} days: {}",
                config.summary_window_days, summary.pending_interviews
            );
            if !summary.next_deadlines.is_empty() {
                println!();
                println!("Approaching deadlines:");
                for row in &summary.next_deadlines {
                    println!("  {:<6} {}", row.label, row.title);
                }
            }
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            println!();
            cli::print_help("joblog");
        }
    }

    Ok(())
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

/// Removes `--flag value` from the argument list and returns the value.
fn take_value_flag(args: &mut Vec<String>, names: &[&str]) -> Option<String> {
    let idx = args.iter().position(|a| names.contains(&a.as_str()))?;
    if idx + 1 >= args.len() {
        args.remove(idx);
        return None;
    }
    let value = args.remove(idx + 1);
    args.remove(idx);
    Some(value)
}

fn init_logging(ctx: &SharedContext) {
    if let Some(path) = ctx.get_log_file_path()
        && let Ok(file) = fs::File::create(&path)
    {
        let _ = simplelog::WriteLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            file,
        );
    }
}
