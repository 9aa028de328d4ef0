use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use secretary_client::api::types::{Method, Payload, RequestDescriptor};
use secretary_client::api::{approvals, dashboard, notifications, ApiError};
use secretary_client::{App, ClientConfig};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Usage(String),
}

#[derive(Parser, Debug)]
#[command(name = "secretary", version, about = "Executive Secretary AI command-line client")]
struct Cli {
    /// Answer every call from canned demo data; nothing goes over the network
    #[arg(long)]
    demo: bool,

    /// API base URL (overrides SECRETARY_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login { email: String },
    /// Sign out and clear local state
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Dashboard counters
    Stats,
    /// Recent assistant activity
    Activity {
        #[arg(long, default_value_t = dashboard::DEFAULT_ACTIVITY_LIMIT)]
        limit: u32,
    },
    /// Approvals waiting on you
    Approvals,
    /// Latest notifications
    Notifications {
        #[arg(long, default_value_t = notifications::DEFAULT_NOTIFICATION_LIMIT)]
        limit: u32,
    },
    /// Send an arbitrary request, e.g. `call GET /tasks status=open`
    Call {
        method: String,
        path: String,
        /// key=value query parameters (GET only)
        params: Vec<String>,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
    /// Compare the backend version with this client
    CheckUpdate,
}

fn parse_method(method: &str) -> Result<Method, CliError> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::Get),
        "POST" => Ok(Method::Post),
        "PUT" => Ok(Method::Put),
        "PATCH" => Ok(Method::Patch),
        "DELETE" => Ok(Method::Delete),
        other => Err(CliError::Usage(format!("unsupported method '{}'", other))),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

fn print_payload(payload: Payload) {
    match payload {
        Payload::Json(value) => print_json(&value),
        Payload::Raw(raw) => println!("{}", raw.text()),
    }
}

fn build_request(
    method: &str,
    path: String,
    params: Vec<String>,
    body: Option<String>,
) -> Result<RequestDescriptor, CliError> {
    let mut request = RequestDescriptor::new(parse_method(method)?, path);
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| CliError::Usage(format!("expected key=value, got '{}'", param)))?;
        request = request.query(key, value);
    }
    if let Some(body) = body {
        let body: Value = serde_json::from_str(&body)
            .map_err(|e| CliError::Usage(format!("invalid --body JSON: {}", e)))?;
        request = request.json(body);
    }
    Ok(request)
}

async fn run(app: &App, command: Command) -> Result<(), CliError> {
    let auth = app.auth();
    match command {
        Command::Login { email } => {
            let resp = auth.login(&email).await?;
            println!("Logged in as {} <{}>", resp.user.full_name, resp.user.email);
        }
        Command::Logout => auth.logout().await,
        Command::Whoami => {
            let user = auth.load_current_user().await?;
            println!("{} <{}>", user.full_name, user.email);
        }
        Command::Stats => print_json(&auth.guard(dashboard::get_stats(app.api()).await)?),
        Command::Activity { limit } => {
            print_json(&auth.guard(dashboard::get_recent_activity(app.api(), limit).await)?)
        }
        Command::Approvals => {
            print_json(&auth.guard(approvals::get_pending_approvals(app.api()).await)?)
        }
        Command::Notifications { limit } => print_json(
            &auth.guard(notifications::get_notifications(app.api(), limit).await)?,
        ),
        Command::Call {
            method,
            path,
            params,
            body,
        } => {
            let request = build_request(&method, path, params, body)?;
            print_payload(auth.guard(app.api().call(request).await)?);
        }
        Command::CheckUpdate => match app.check_for_updates().await {
            Some(version) => println!("New version {} available", version),
            None => println!("Up to date"),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.demo {
        config.demo_mode = true;
    }
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    let app = App::from_config(config);
    match run(&app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::Api(ref api_error) = e {
                app.report_unhandled(api_error);
            }
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
