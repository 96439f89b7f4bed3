// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

use crate::model::ApplicationStatus;
use strum::IntoEnumIterator;

pub fn print_help(binary_name: &str) {
    let statuses: Vec<String> = ApplicationStatus::iter().map(|s| s.to_string()).collect();

    println!(
        "joblog v{} - Personal job-application tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] <command> [args]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    list [today|upcoming|all]      Planner tasks, bucketed and sorted");
    println!("    add <title> [--due <date>] [--bucket today|upcoming]");
    println!("                                   Add a planner task (date is YYYY-MM-DD)");
    println!("    done <task-id>                 Toggle a task (unique id prefix is enough)");
    println!("    apps                           Applications with status and deadline countdown");
    println!("    summary                        Dashboard: counts and approaching deadlines");
    println!("    import <file.json>             Import a legacy workspace export");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("APPLICATION STATUSES:");
    println!("    {}", statuses.join(", "));
    println!();
    println!("EXAMPLES:");
    println!("    {} add \"Send portfolio to Acme\" --due 2026-08-20", binary_name);
    println!("    {} list today", binary_name);
    println!("    {} import backup.json", binary_name);
}
