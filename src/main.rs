//! share-ledger CLI
//!
//! Compute balances and settlements for a group described in JSON.
//!
//! # Usage
//!
//! ```bash
//! # Who paid, who owes
//! share-ledger balances --input group.json
//!
//! # Who should pay whom
//! share-ledger settle --input group.json --format json
//!
//! # Spending statistics for one category in a date range
//! share-ledger stats --input group.json --category Rent --from 2024-01-01 --to 2024-01-31
//!
//! # Generate a random group for testing
//! share-ledger generate --participants 6 --expenses 40
//! ```

use chrono::NaiveDate;
use share_ledger::analysis::filter::{DateRange, ExpenseFilter};
use share_ledger::core::category::Category;
use share_ledger::group::expense_group::ExpenseGroup;
use share_ledger::settlement::optimizer::SettlementItem;
use share_ledger::simulation::random_group::{generate_random_group, GroupConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"share-ledger: shared expense balances and settlement planning

USAGE:
    share-ledger <COMMAND> [OPTIONS]

COMMANDS:
    balances    Show paid / owes / balance for every participant
    settle      Show the recommended settlement payments
    stats       Show spending statistics
    generate    Generate a random group (for testing)
    help        Show this message

OPTIONS (balances, settle, stats):
    --input <FILE>      Path to a group JSON file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (stats):
    --category <NAME>   Only count expenses in this category
    --from <DATE>       Only count expenses on or after DATE (YYYY-MM-DD)
    --to <DATE>         Only count expenses on or before DATE (YYYY-MM-DD)

OPTIONS (generate):
    --participants <N>  Number of participants (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --output <FILE>     Write to file instead of stdout

ENVIRONMENT:
    RUST_LOG            Log filter, e.g. RUST_LOG=debug

EXAMPLES:
    share-ledger balances --input group.json
    share-ledger settle --input group.json --format json
    share-ledger stats --input group.json --category Groceries
    share-ledger generate --participants 4 --expenses 12 --output group.json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Options shared by the commands that read a group file.
struct ReadOptions {
    input_path: String,
    json: bool,
    category: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

fn next_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    args.get(*i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, what)))
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|e| fail(format!("invalid date '{}': {}", value, e)))
}

fn parse_read_options(args: &[String], allow_filters: bool) -> ReadOptions {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut category = None;
    let mut from = None;
    let mut to = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => input_path = Some(next_value(args, &mut i, "--input", "a file path")),
            "--format" => format = next_value(args, &mut i, "--format", "'text' or 'json'"),
            "--category" if allow_filters => {
                category = Some(next_value(args, &mut i, "--category", "a category name"))
            }
            "--from" if allow_filters => {
                from = Some(parse_date(&next_value(args, &mut i, "--from", "a date")))
            }
            "--to" if allow_filters => {
                to = Some(parse_date(&next_value(args, &mut i, "--to", "a date")))
            }
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let json = match format.as_str() {
        "text" => false,
        "json" => true,
        other => fail(format!("unknown format '{}', expected text or json", other)),
    };

    ReadOptions {
        input_path: input_path.unwrap_or_else(|| fail("--input <FILE> is required")),
        json,
        category,
        from,
        to,
    }
}

fn load_group(path: &str) -> ExpenseGroup {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("cannot read file '{}': {}", path, e)));

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "participants": ["Alice", "Bob", "Carol"],
  "expenses": [
    {{ "description": "Groceries", "amount": 90.0, "paid_by": "Alice", "split_with": [] }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(format!("cannot serialize output: {}", e)));
    println!("{}", json);
}

fn cmd_balances(args: &[String]) {
    let options = parse_read_options(args, false);
    let group = load_group(&options.input_path);
    let balances = group.balances();

    if options.json {
        print_json(&balances);
    } else {
        print!("{}", balances);
    }
}

fn cmd_settle(args: &[String]) {
    let options = parse_read_options(args, false);
    let group = load_group(&options.input_path);
    let summary = group.summary();

    if options.json {
        #[derive(serde::Serialize)]
        struct KeyedItem {
            key: String,
            #[serde(flatten)]
            item: SettlementItem,
        }

        let items: Vec<KeyedItem> = summary
            .settlements
            .items()
            .into_iter()
            .map(|item| KeyedItem {
                key: item.key(),
                item,
            })
            .collect();
        print_json(&items);
    } else {
        print!("{}", summary.balances);
        println!();
        print!("{}", summary.settlements);
    }
}

fn cmd_stats(args: &[String]) {
    let options = parse_read_options(args, true);
    let group = load_group(&options.input_path);

    let mut filter = ExpenseFilter::new();
    if let Some(category) = options.category {
        filter = filter.with_category(Category::new(category));
    }
    if options.from.is_some() || options.to.is_some() {
        let start = options.from.unwrap_or(NaiveDate::MIN);
        let end = options.to.unwrap_or(NaiveDate::MAX);
        filter = filter.with_date_range(DateRange::new(start, end));
    }

    let stats = group.filtered_stats(&filter);
    if options.json {
        print_json(&stats);
    } else {
        print!("{}", stats);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GroupConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                config.participant_count = next_value(args, &mut i, "--participants", "a number")
                    .parse()
                    .unwrap_or_else(|_| fail("--participants requires a number"));
            }
            "--expenses" => {
                config.expense_count = next_value(args, &mut i, "--expenses", "a number")
                    .parse()
                    .unwrap_or_else(|_| fail("--expenses requires a number"));
            }
            "--output" => output_path = Some(next_value(args, &mut i, "--output", "a file path")),
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let group = generate_random_group(&config);
    let json = serde_json::to_string_pretty(&group)
        .unwrap_or_else(|e| fail(format!("cannot serialize group: {}", e)));

    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("cannot write to '{}': {}", path, e)));
        eprintln!(
            "Generated {} expenses across {} participants → {}",
            group.expenses().len(),
            group.participants().len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "settle" => cmd_settle(rest),
        "stats" => cmd_stats(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
