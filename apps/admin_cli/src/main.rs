use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client_core::{config::normalize_api_url, load_settings, ApiClient};
use serde::Serialize;
use shared::{
    domain::{AttendanceStatus, EmployeeId},
    form::{AddEmployeeForm, FormField},
    protocol::{AttendanceQuery, EmployeeListQuery, MarkAttendance, NewEmployee},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "admin_cli", about = "Command-line access to the HR backend")]
struct Args {
    /// Backend base URL; overrides admin.toml and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Default tracing filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[command(subcommand)]
    Employees(EmployeesCommand),
    /// Aggregated dashboard summary.
    Dashboard,
    #[command(subcommand)]
    Attendance(AttendanceCommand),
}

#[derive(Subcommand, Debug, PartialEq)]
enum EmployeesCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value = "")]
        search: String,
    },
    Get {
        id: i64,
    },
    /// Validates like the desktop form before anything is sent.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        position: String,
    },
    Delete {
        id: i64,
    },
    Departments,
    Stats,
}

#[derive(Subcommand, Debug, PartialEq)]
enum AttendanceCommand {
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        employee: Option<i64>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Today,
    Summary,
    Employee {
        id: i64,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Mark {
        employee: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = normalize_api_url(&api_url);
    }
    let client = ApiClient::from_settings(&settings)?;
    tracing::debug!(api_url = client.base_url(), command = ?args.command, "running command");

    match args.command {
        Command::Employees(cmd) => match cmd {
            EmployeesCommand::List {
                page,
                limit,
                search,
            } => {
                let query =
                    EmployeeListQuery::new(page, limit.unwrap_or(settings.page_size), &search);
                print_json(&client.list_employees(&query).await?)
            }
            EmployeesCommand::Get { id } => print_json(&client.get_employee(EmployeeId(id)).await?),
            EmployeesCommand::Create {
                name,
                email,
                department,
                position,
            } => {
                let employee = new_employee_from_args(name, email, department, position)?;
                print_json(&client.create_employee(&employee).await?)
            }
            EmployeesCommand::Delete { id } => {
                client.delete_employee(EmployeeId(id)).await?;
                print_json(&serde_json::json!({ "deleted": id }))
            }
            EmployeesCommand::Departments => print_json(&client.list_departments().await?),
            EmployeesCommand::Stats => print_json(&client.employee_stats().await?),
        },
        Command::Dashboard => print_json(&client.dashboard().await?),
        Command::Attendance(cmd) => match cmd {
            AttendanceCommand::List {
                date,
                employee,
                page,
                limit,
            } => {
                let query = AttendanceQuery {
                    date,
                    employee: employee.map(EmployeeId),
                    page,
                    limit,
                };
                print_json(&client.list_attendance(&query).await?)
            }
            AttendanceCommand::Today => print_json(&client.today_attendance().await?),
            AttendanceCommand::Summary => print_json(&client.attendance_summary().await?),
            AttendanceCommand::Employee { id, page, limit } => {
                let query = AttendanceQuery {
                    page,
                    limit,
                    ..AttendanceQuery::default()
                };
                print_json(&client.employee_attendance(EmployeeId(id), &query).await?)
            }
            AttendanceCommand::Mark {
                employee,
                date,
                status,
            } => {
                let mark = MarkAttendance {
                    employee_id: EmployeeId(employee),
                    date,
                    status,
                };
                print_json(&client.mark_attendance(&mark).await?)
            }
        },
    }
}

fn new_employee_from_args(
    name: String,
    email: String,
    department: String,
    position: String,
) -> Result<NewEmployee> {
    let mut form = AddEmployeeForm::default();
    form.set(FormField::FullName, name);
    form.set(FormField::Email, email);
    form.set(FormField::Department, department);
    form.set(FormField::Position, position);
    if let Some(employee) = form.validate() {
        return Ok(employee);
    }
    let problems: Vec<&str> = FormField::ALL
        .iter()
        .filter_map(|field| form.error(*field))
        .collect();
    bail!("{}", problems.join("; "))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
