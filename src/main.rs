use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};

mod config;
mod engine;
mod error;
mod model;
mod report;
mod store;

use config::Config;
use engine::AttendanceBoard;
use model::attendance::MarkStatus;
use model::employee::{Employee, NewEmployee};
use store::http::HttpStore;
use tracing::info;
use tracing_appender::rolling;

const USAGE: &str = "\
usage: hrm-dashboard <command> [--date YYYY-MM-DD]

commands:
  board [TERM]                     show the attendance board, optionally filtered
  mark CODE present|absent         mark one employee
  mark-all present|absent [--yes]  mark everyone; --yes confirms the bulk action
  finalize                         validate and print the daily summary
  export CODE                      write CODE's attendance history as CSV
  add CODE NAME EMAIL DEPT ROLE    create an employee
  remove CODE                      delete an employee";

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let date = take_date(&mut args)?.unwrap_or_else(|| Local::now().date_naive());
    let confirmed = take_flag(&mut args, "--yes");

    let Some(command) = args.first().cloned() else {
        println!("{USAGE}");
        return Ok(());
    };

    info!(store = %config.store_base_url, %date, command, "dashboard starting");

    let store = HttpStore::new(&config.store_base_url, config.store_timeout_secs);
    let mut board = AttendanceBoard::new(store, date);
    board
        .refresh()
        .await
        .context("failed to connect to the attendance store; is the backend running?")?;

    match command.as_str() {
        "board" => {
            let rows = match args.get(1) {
                Some(term) => board.search(term),
                None => board.employees().iter().collect(),
            };
            print_board(&board, &rows);
        }
        "mark" => {
            let (code, status) = (required(&args, 1)?, required(&args, 2)?);
            let status: MarkStatus = status
                .parse()
                .map_err(|_| anyhow::anyhow!("status must be 'present' or 'absent'"))?;
            let id = resolve_code(&board, code)?;
            let outcome = board.mark(id, status).await?;
            println!("marked {code} {status}: {outcome:?}");
        }
        "mark-all" => {
            let status: MarkStatus = required(&args, 1)?
                .parse()
                .map_err(|_| anyhow::anyhow!("status must be 'present' or 'absent'"))?;
            let confirmation = board.request_bulk(status);
            if confirmation.override_warning {
                println!(
                    "warning: this will override individual attendance selections already made"
                );
            }
            if !confirmed {
                println!(
                    "about to mark ALL {} employees as {status} on {date}; re-run with --yes to confirm",
                    confirmation.headcount
                );
                return Ok(());
            }
            let outcome = board.confirm_bulk(confirmation).await?;
            println!("bulk mark {status}: {outcome:?}");
        }
        "finalize" => match board.finalize() {
            Ok(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
            Err(err) => bail!("cannot finalize: {err}"),
        },
        "export" => {
            let code = required(&args, 1)?;
            let id = resolve_code(&board, code)?;
            let emp = board.employees().iter().find(|e| e.id == id).unwrap();
            let path = report::report_file_name(emp);
            std::fs::write(&path, report::employee_csv(emp, board.records()))?;
            println!("wrote {path}");
        }
        "add" => {
            if args.len() < 6 {
                bail!("usage: add CODE NAME EMAIL DEPT ROLE");
            }
            let created = board
                .add_employee(NewEmployee {
                    employee_id: args[1].clone(),
                    full_name: args[2].clone(),
                    email: args[3].clone(),
                    department: args[4].clone(),
                    role: args[5].clone(),
                    profile_image: None,
                })
                .await?;
            println!("created {} (id {})", created.employee_id, created.id);
        }
        "remove" => {
            let code = required(&args, 1)?;
            let id = resolve_code(&board, code)?;
            board.remove_employee(id).await?;
            println!("removed {code}");
        }
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }

    Ok(())
}

fn print_board(board: &AttendanceBoard<HttpStore>, rows: &[&Employee]) {
    println!("attendance for {}", board.selected_date());
    for emp in rows {
        let state = board.status_of(emp.id);
        let bulk = if state.bulk { " (bulk)" } else { "" };
        println!(
            "  {:<10} {:<24} {:<14} {}{}",
            emp.employee_id, emp.full_name, emp.department, state.status, bulk
        );
    }
    let marked = board.statuses().values().filter(|s| s.is_marked()).count();
    println!("marked {marked}/{} employees", board.employees().len());
}

fn resolve_code(board: &AttendanceBoard<HttpStore>, code: &str) -> anyhow::Result<u64> {
    board
        .employees()
        .iter()
        .find(|e| e.employee_id.eq_ignore_ascii_case(code))
        .map(|e| e.id)
        .with_context(|| format!("no employee with code '{code}'"))
}

fn required(args: &[String], idx: usize) -> anyhow::Result<&String> {
    args.get(idx).with_context(|| format!("missing argument\n{USAGE}"))
}

fn take_date(args: &mut Vec<String>) -> anyhow::Result<Option<NaiveDate>> {
    let Some(pos) = args.iter().position(|a| a == "--date") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("--date requires a value (YYYY-MM-DD)");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    let date = value
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid date '{value}'"))?;
    Ok(Some(date))
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    match args.iter().position(|a| a == flag) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}
