//! # CLI Module
//!
//! One `cmd_*` function per subcommand. Each returns the text to print on
//! stdout; `main.rs` owns argument parsing, printing and exit codes.

use devmatch_core::form::DURATION_OPTIONS;
use devmatch_core::{
    AnalysisResult, Application, ApplicationId, ApplicationStatus, Project, ProjectDraft,
    ProjectFilter, ProjectId, ProjectStats, ProjectStatus, SkillLevel, TechScoreSheet,
    TechStackTags, User, UserId, validate_content,
};
use devmatch_sdk::{
    CachedSession, DevMatchClient, Error, ErrorKind, LoginRequest, SessionProvider, load_dashboard,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Text,
    Json,
}

impl Output {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Arguments of `devmatch create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub techs: Vec<String>,
    pub team_size: i64,
    pub duration_weeks: i64,
}

// =============================================================================
// ARGUMENT PARSING HELPERS
// =============================================================================

/// Parse one `--score TECH=N` argument.
pub fn parse_score_arg(raw: &str) -> Result<(String, i64), Error> {
    let Some((tech, score)) = raw.rsplit_once('=') else {
        return Err(Error::InvalidInput(format!(
            "expected TECH=SCORE, got '{}'",
            raw
        )));
    };
    let tech = tech.trim();
    if tech.is_empty() {
        return Err(Error::InvalidInput(format!("missing tech name in '{}'", raw)));
    }
    let score = score
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::InvalidInput(format!("score for '{}': {}", tech, e)))?;
    Ok((tech.to_string(), score))
}

/// Help text for `--duration-weeks`. The offered lengths are suggestions.
pub fn duration_help() -> String {
    let offered: Vec<String> = DURATION_OPTIONS.iter().map(u32::to_string).collect();
    format!(
        "Project length in weeks, at least 1. Suggested: {}",
        offered.join(", ")
    )
}

fn parse_project_status(raw: &str) -> Result<ProjectStatus, Error> {
    raw.parse::<ProjectStatus>()
        .map_err(|e| Error::InvalidInput(e.to_string()))
}

fn parse_application_status(raw: &str) -> Result<ApplicationStatus, Error> {
    raw.parse::<ApplicationStatus>()
        .map_err(|e| Error::InvalidInput(e.to_string()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// RENDERING
// =============================================================================

fn project_line(project: &Project) -> String {
    format!(
        "#{:<5} {:<32} {:<12} {}/{} members  [{}]",
        project.id,
        project.title,
        project.status.label(),
        project.current_team_size,
        project.team_size,
        project.tech_stacks.join(", ")
    )
}

fn project_details(project: &Project) -> String {
    let mut lines = vec![
        format!("#{} {}", project.id, project.title),
        format!("status:      {}", project.status.label()),
        format!(
            "team:        {}/{} ({} open)",
            project.current_team_size,
            project.team_size,
            project.open_seats()
        ),
        format!("duration:    {} weeks", project.duration_weeks),
        format!("tech stacks: {}", project.tech_stacks.join(", ")),
        format!("created by:  {}", project.creator.display_name()),
    ];
    if !project.created_at.is_empty() {
        lines.push(format!("created at:  {}", project.created_at));
    }
    lines.push(String::new());
    lines.push(project.description.clone());
    if let Some(content) = project.content.as_deref().filter(|c| !c.is_empty()) {
        lines.push(String::new());
        lines.push(content.to_string());
    }
    lines.join("\n")
}

fn application_line(application: &Application) -> String {
    format!(
        "#{:<5} {:<20} {:<9} {}",
        application.id,
        application.user.display_name(),
        application.status.as_str(),
        application.applied_at
    )
}

fn analysis_details(analysis: &AnalysisResult) -> String {
    format!(
        "application #{}\ncompatibility: {:.1}/100\n\n{}",
        analysis.application_id, analysis.compatibility_score, analysis.compatibility_reason
    )
}

fn user_line(user: &User) -> String {
    format!("{} (#{}, {})", user.display_name(), user.id, user.username)
}

fn project_list(projects: &[&Project], stats: Option<ProjectStats>) -> String {
    let mut lines: Vec<String> = projects.iter().map(|p| project_line(p)).collect();
    if lines.is_empty() {
        lines.push("No projects found.".to_string());
    }
    if let Some(stats) = stats {
        lines.push(String::new());
        lines.push(format!(
            "total {}  recruiting {}  in progress {}  completed {}",
            stats.total, stats.recruiting, stats.in_progress, stats.completed
        ));
    }
    lines.join("\n")
}

// =============================================================================
// PROJECT COMMANDS
// =============================================================================

/// `devmatch projects`: browse and search all projects.
pub async fn cmd_projects(
    client: &DevMatchClient,
    search: Option<&str>,
    status: Option<&str>,
    output: Output,
) -> Result<String, Error> {
    let status = status.map(parse_project_status).transpose()?;
    let filter = ProjectFilter::new(search.unwrap_or_default(), status);
    let projects = client.list_projects().await?;
    let hits = filter.apply(&projects);
    match output {
        Output::Json => to_json(&hits),
        Output::Text => Ok(project_list(&hits, None)),
    }
}

/// `devmatch show <id>`
pub async fn cmd_show(client: &DevMatchClient, id: u64, output: Output) -> Result<String, Error> {
    let project = client.get_project(ProjectId(id)).await?;
    match output {
        Output::Json => to_json(&project),
        Output::Text => Ok(project_details(&project)),
    }
}

/// `devmatch create`: validate the whole form, then submit.
///
/// Tags are loaded as given, so a bad `--tech` is listed with every other
/// form problem. A failed identity lookup validates as signed out.
pub async fn cmd_create(
    session: &CachedSession,
    args: CreateArgs,
    output: Output,
) -> Result<String, Error> {
    let draft = ProjectDraft {
        title: args.title,
        description: args.description,
        tech_stacks: TechStackTags::from_vec(
            args.techs.iter().map(|t| t.trim().to_string()).collect(),
        ),
        team_size: args.team_size,
        duration_weeks: args.duration_weeks,
    };

    let creator = match session.current_identity().await {
        Ok(user) => user.map(|u| u.id),
        Err(e) => {
            warn!(error = %e, "identity lookup failed; validating as signed out");
            None
        }
    };
    let request = draft.into_request(creator)?;
    let project = session.client().create_project(&request).await?;
    info!(project = %project.id, "project created");
    match output {
        Output::Json => to_json(&project),
        Output::Text => Ok(format!("Created project #{}: {}", project.id, project.title)),
    }
}

/// `devmatch my-projects`: projects created by the signed-in user.
pub async fn cmd_my_projects(
    session: &CachedSession,
    search: Option<&str>,
    status: Option<&str>,
    output: Output,
) -> Result<String, Error> {
    let status = status.map(parse_project_status).transpose()?;
    let user = session.require_identity().await?;
    let projects = session.client().user_projects(user.id).await?;
    let stats = ProjectStats::from_projects(&projects);
    let hits = ProjectFilter::new(search.unwrap_or_default(), status).apply(&projects);
    match output {
        Output::Json => to_json(&json!({ "projects": hits, "stats": stats })),
        Output::Text => Ok(project_list(&hits, Some(stats))),
    }
}

/// `devmatch set-status <id> <status>`
pub async fn cmd_set_status(
    client: &DevMatchClient,
    id: u64,
    status: &str,
    output: Output,
) -> Result<String, Error> {
    let status = parse_project_status(status)?;
    let project = client.update_project_status(ProjectId(id), status).await?;
    match output {
        Output::Json => to_json(&project),
        Output::Text => Ok(format!(
            "Project #{} is now {}",
            project.id,
            project.status.label()
        )),
    }
}

/// `devmatch set-content <id> <text>`
pub async fn cmd_set_content(client: &DevMatchClient, id: u64, text: &str) -> Result<String, Error> {
    let content = validate_content(text).map_err(devmatch_core::ValidationErrors::from)?;
    client.update_project_content(ProjectId(id), &content).await?;
    Ok(format!("Updated content of project #{}", id))
}

/// `devmatch delete <id>`
pub async fn cmd_delete(client: &DevMatchClient, id: u64) -> Result<String, Error> {
    client.delete_project(ProjectId(id)).await?;
    info!(project = id, "project deleted");
    Ok(format!("Deleted project #{}", id))
}

/// `devmatch apply <id> --score TECH=N ...`
///
/// Every tech stack of the project is scored; unscored ones keep the default.
pub async fn cmd_apply(
    session: &CachedSession,
    id: u64,
    scores: &[String],
    output: Output,
) -> Result<String, Error> {
    let user = session.require_identity().await?;
    let client = session.client();
    let project = client.get_project(ProjectId(id)).await?;

    let mut sheet = TechScoreSheet::new(&project.tech_stacks);
    for raw in scores {
        let (tech, score) = parse_score_arg(raw)?;
        sheet
            .set(&tech, score)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
    }

    let application = client
        .apply_to_project(project.id, &sheet.to_apply_request(user.id))
        .await?;
    info!(project = %project.id, application = %application.id, "application submitted");

    match output {
        Output::Json => to_json(&application),
        Output::Text => {
            let mut lines = vec![format!(
                "Applied to #{} {} (application #{})",
                project.id, project.title, application.id
            )];
            for (tech, score) in sheet.iter() {
                lines.push(format!(
                    "  {:<20} {:>2}  {}",
                    tech,
                    score,
                    SkillLevel::from_score(score).description()
                ));
            }
            lines.push(format!("  average {}", sheet.average_display()));
            Ok(lines.join("\n"))
        }
    }
}

/// `devmatch applications <project-id>`
pub async fn cmd_applications(
    client: &DevMatchClient,
    project: u64,
    output: Output,
) -> Result<String, Error> {
    let applications = client.project_applications(ProjectId(project)).await?;
    match output {
        Output::Json => to_json(&applications),
        Output::Text if applications.is_empty() => Ok("No applications yet.".to_string()),
        Output::Text => Ok(applications
            .iter()
            .map(application_line)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

// =============================================================================
// APPLICATION COMMANDS
// =============================================================================

/// `devmatch application show <id>`
pub async fn cmd_application_show(
    client: &DevMatchClient,
    id: u64,
    output: Output,
) -> Result<String, Error> {
    let application = client.get_application(ApplicationId(id)).await?;
    match output {
        Output::Json => to_json(&application),
        Output::Text => Ok(application_line(&application)),
    }
}

/// `devmatch application status <id> <status>`
pub async fn cmd_application_status(
    client: &DevMatchClient,
    id: u64,
    status: &str,
) -> Result<String, Error> {
    let status = parse_application_status(status)?;
    client
        .update_application_status(ApplicationId(id), status)
        .await?;
    Ok(format!("Application #{} is now {}", id, status))
}

/// `devmatch application delete <id>`
pub async fn cmd_application_delete(client: &DevMatchClient, id: u64) -> Result<String, Error> {
    client.delete_application(ApplicationId(id)).await?;
    Ok(format!("Deleted application #{}", id))
}

// =============================================================================
// ANALYSIS COMMANDS
// =============================================================================

/// `devmatch analysis show <application-id>`
pub async fn cmd_analysis_show(
    client: &DevMatchClient,
    id: u64,
    output: Output,
) -> Result<String, Error> {
    let analysis = client.get_analysis(ApplicationId(id)).await?;
    match output {
        Output::Json => to_json(&analysis),
        Output::Text => Ok(analysis_details(&analysis)),
    }
}

/// `devmatch analysis create <application-id>`
pub async fn cmd_analysis_create(
    client: &DevMatchClient,
    id: u64,
    output: Output,
) -> Result<String, Error> {
    let analysis = client.create_analysis(ApplicationId(id)).await?;
    match output {
        Output::Json => to_json(&analysis),
        Output::Text => Ok(analysis_details(&analysis)),
    }
}

/// `devmatch assign-roles <project-id>`
pub async fn cmd_assign_roles(
    client: &DevMatchClient,
    project: u64,
    output: Output,
) -> Result<String, Error> {
    let roles = client.assign_roles(ProjectId(project)).await?;
    match output {
        Output::Json => to_json(&json!({ "projectId": project, "roles": roles })),
        Output::Text => Ok(roles),
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// `devmatch dashboard`
///
/// A failed fetch still prints (zero) totals, followed by a retry hint.
pub async fn cmd_dashboard(session: &CachedSession, output: Output) -> Result<String, Error> {
    let user = session.require_identity().await?;
    let view = load_dashboard(session.client(), user.id).await;
    let summary = view.summary;
    match output {
        Output::Json => to_json(&json!({
            "user": user,
            "summary": summary,
            "error": view.failure.as_ref().map(ToString::to_string),
        })),
        Output::Text => {
            let mut lines = vec![
                format!("Dashboard for {}", user.display_name()),
                format!("  projects created       {}", summary.total_projects),
                format!("  applications sent      {}", summary.total_applications),
                format!("  approved               {}", summary.approved_applications),
                format!("  pending                {}", summary.pending_applications),
            ];
            if let Some(err) = &view.failure {
                lines.push(String::new());
                lines.push(format!(
                    "Could not load your data ({}). Run `devmatch dashboard` again to retry.",
                    describe_error(err)
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// `devmatch login --username U --password P`
pub async fn cmd_login(
    session: &CachedSession,
    username: &str,
    password: &str,
    output: Output,
) -> Result<String, Error> {
    let user = session
        .login(&LoginRequest::new(username, password))
        .await?;
    match output {
        Output::Json => to_json(&user),
        Output::Text => Ok(format!("Logged in as {}", user_line(&user))),
    }
}

/// `devmatch login --user-id N --username U`: remember an identity locally.
pub fn cmd_login_as(
    session: &CachedSession,
    id: u64,
    username: &str,
    output: Output,
) -> Result<String, Error> {
    let user = User {
        id: UserId(id),
        username: username.to_string(),
        nickname: String::new(),
        profile_img_url: String::new(),
    };
    session.remember(&user)?;
    match output {
        Output::Json => to_json(&user),
        Output::Text => Ok(format!("Using identity {}", user_line(&user))),
    }
}

/// `devmatch logout`
pub async fn cmd_logout(session: &CachedSession) -> Result<String, Error> {
    session.logout().await?;
    Ok("Logged out.".to_string())
}

/// `devmatch whoami`
pub async fn cmd_whoami(session: &CachedSession, output: Output) -> Result<String, Error> {
    let user = session.current_identity().await?;
    match (output, user) {
        (Output::Json, user) => to_json(&user),
        (Output::Text, Some(user)) => Ok(user_line(&user)),
        (Output::Text, None) => Ok("Not logged in.".to_string()),
    }
}

// =============================================================================
// ERROR PRESENTATION
// =============================================================================

/// What the user is told when a command fails.
pub fn describe_error(err: &Error) -> String {
    match err {
        Error::NotImplemented { endpoint } => {
            format!("Coming soon: {} is not available on the server yet.", endpoint)
        }
        Error::Validation(errors) => {
            let mut lines = vec!["Please fix the following:".to_string()];
            lines.extend(errors.as_slice().iter().map(|e| format!("  - {}", e)));
            lines.join("\n")
        }
        Error::InvalidInput(msg) => msg.clone(),
        Error::Unauthenticated => "Please log in first (devmatch login).".to_string(),
        Error::Server { status, message } => {
            format!("The server could not complete the request ({}): {}", status, message)
        }
        Error::Http(_) => "Could not reach the DevMatch server. Please try again.".to_string(),
        Error::Json(_) => "The server sent a response this client cannot read.".to_string(),
        Error::Io(e) => format!("Could not access the identity file: {}", e),
    }
}

/// Process exit code for a failed command.
pub fn exit_code(err: &Error) -> u8 {
    match err.kind() {
        ErrorKind::NetworkError => 1,
        ErrorKind::ValidationFailed => 2,
        ErrorKind::NotImplemented => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devmatch_core::ValidationError;

    #[test]
    fn score_arg_parsing() {
        assert!(matches!(parse_score_arg("Rust=7"), Ok((ref t, 7)) if t == "Rust"));
        assert!(matches!(parse_score_arg(" C++ = 12 "), Ok((ref t, 12)) if t == "C++"));
        assert!(matches!(parse_score_arg("Rust"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_score_arg("=3"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_score_arg("Rust=high"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn duration_help_lists_suggestions() {
        let help = duration_help();
        assert!(help.contains("at least 1"));
        assert!(help.ends_with("1, 2, 4, 8, 12, 24, 52"));
    }

    #[test]
    fn validation_errors_are_listed_together() {
        let mut errors = devmatch_core::ValidationErrors::new();
        errors.push(ValidationError::TitleEmpty);
        errors.push(ValidationError::TechStacksEmpty);
        let text = describe_error(&Error::Validation(errors));
        assert!(text.starts_with("Please fix the following:"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(exit_code(&Error::InvalidInput("x".into())), 2);
        assert_eq!(exit_code(&Error::NotImplemented { endpoint: "x".into() }), 3);
        assert_eq!(
            exit_code(&Error::Server {
                status: 500,
                message: "x".into()
            }),
            1
        );
    }

    #[test]
    fn output_flag() {
        assert_eq!(Output::from_flag(true), Output::Json);
        assert_eq!(Output::from_flag(false), Output::Text);
    }
}
