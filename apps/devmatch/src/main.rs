//! # DevMatch CLI
//!
//! Find side-project teammates from the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use devmatch::cli::{self, CreateArgs, Output};
use devmatch::config::Config;
use devmatch_sdk::Error;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "devmatch", version, about = "DevMatch team-matching client")]
struct Cli {
    /// Base URL of the DevMatch API.
    #[arg(long, global = true, env = "DEVMATCH_API_URL")]
    api_url: Option<String>,

    /// Where the signed-in identity is cached.
    #[arg(long, global = true, env = "DEVMATCH_IDENTITY_FILE")]
    identity_file: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "DEVMATCH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, env = "DEVMATCH_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ListFilter {
    /// Case-insensitive match on title, description and tech stacks.
    #[arg(long)]
    search: Option<String>,
    /// RECRUITING, IN_PROGRESS or COMPLETED.
    #[arg(long)]
    status: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse all projects.
    Projects(ListFilter),
    /// Show one project.
    Show { id: u64 },
    /// Create a project.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Tech stack tag; repeat for more.
        #[arg(long = "tech")]
        techs: Vec<String>,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        team_size: i64,
        #[arg(
            long,
            default_value_t = 4,
            allow_negative_numbers = true,
            help = cli::duration_help()
        )]
        duration_weeks: i64,
    },
    /// Apply to a project with a self-assessed score per tech stack.
    Apply {
        id: u64,
        /// TECH=SCORE, score 1-10; repeat per tech stack.
        #[arg(long = "score")]
        scores: Vec<String>,
    },
    /// Projects you created.
    MyProjects(ListFilter),
    /// Change a project's status.
    SetStatus { id: u64, status: String },
    /// Replace a project's content.
    SetContent { id: u64, text: String },
    /// Delete a project.
    Delete { id: u64 },
    /// Applications submitted to a project.
    Applications { id: u64 },
    /// Inspect or manage one application.
    #[command(subcommand)]
    Application(ApplicationCommand),
    /// Compatibility analysis of an application.
    #[command(subcommand)]
    Analysis(AnalysisCommand),
    /// Split roles across a project's team.
    AssignRoles { project_id: u64 },
    /// Your totals.
    Dashboard,
    /// Sign in with credentials, or record a known identity with --user-id.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "DEVMATCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Use this user id without contacting the server.
        #[arg(long)]
        user_id: Option<u64>,
    },
    /// Sign out and forget the cached identity.
    Logout,
    /// Show the signed-in user.
    Whoami,
}

#[derive(Debug, Subcommand)]
enum ApplicationCommand {
    Show { id: u64 },
    /// PENDING, APPROVED or REJECTED.
    Status { id: u64, status: String },
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
enum AnalysisCommand {
    Show { application_id: u64 },
    Create { application_id: u64 },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.log_json);

    let config = Config::resolve(args.api_url, args.identity_file, args.timeout_secs);
    debug!(?config, "configuration resolved");

    match run(args.command, &config, Output::from_flag(args.json)).await {
        Ok(text) => {
            if !text.is_empty() {
                println!("{}", text);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "command failed");
            eprintln!("{}", cli::describe_error(&err));
            ExitCode::from(cli::exit_code(&err))
        }
    }
}

async fn run(command: Command, config: &Config, output: Output) -> Result<String, Error> {
    let session = config.session();
    let client = session.client();

    match command {
        Command::Projects(filter) => {
            cli::cmd_projects(client, filter.search.as_deref(), filter.status.as_deref(), output)
                .await
        }
        Command::Show { id } => cli::cmd_show(client, id, output).await,
        Command::Create {
            title,
            description,
            techs,
            team_size,
            duration_weeks,
        } => {
            let args = CreateArgs {
                title,
                description,
                techs,
                team_size,
                duration_weeks,
            };
            cli::cmd_create(&session, args, output).await
        }
        Command::Apply { id, scores } => cli::cmd_apply(&session, id, &scores, output).await,
        Command::MyProjects(filter) => {
            cli::cmd_my_projects(
                &session,
                filter.search.as_deref(),
                filter.status.as_deref(),
                output,
            )
            .await
        }
        Command::SetStatus { id, status } => cli::cmd_set_status(client, id, &status, output).await,
        Command::SetContent { id, text } => cli::cmd_set_content(client, id, &text).await,
        Command::Delete { id } => cli::cmd_delete(client, id).await,
        Command::Applications { id } => cli::cmd_applications(client, id, output).await,
        Command::Application(sub) => match sub {
            ApplicationCommand::Show { id } => cli::cmd_application_show(client, id, output).await,
            ApplicationCommand::Status { id, status } => {
                cli::cmd_application_status(client, id, &status).await
            }
            ApplicationCommand::Delete { id } => cli::cmd_application_delete(client, id).await,
        },
        Command::Analysis(sub) => match sub {
            AnalysisCommand::Show { application_id } => {
                cli::cmd_analysis_show(client, application_id, output).await
            }
            AnalysisCommand::Create { application_id } => {
                cli::cmd_analysis_create(client, application_id, output).await
            }
        },
        Command::AssignRoles { project_id } => {
            cli::cmd_assign_roles(client, project_id, output).await
        }
        Command::Dashboard => cli::cmd_dashboard(&session, output).await,
        Command::Login {
            username,
            password,
            user_id,
        } => match (user_id, password) {
            (Some(id), _) => cli::cmd_login_as(&session, id, &username, output),
            (None, Some(password)) => cli::cmd_login(&session, &username, &password, output).await,
            (None, None) => Err(Error::InvalidInput(
                "--password or --user-id is required".to_string(),
            )),
        },
        Command::Logout => cli::cmd_logout(&session).await,
        Command::Whoami => cli::cmd_whoami(&session, output).await,
    }
}
