// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use jules_api_contract::{
    AutomationMode, CreateSessionRequest, Session, SessionOutput, SourceContext,
};
use jules_rest_client::RestClient;
use serde_json::json;

use crate::render::{
    OutputFormat, display_state, format_time, truncate, write_json, write_plain, write_plain_list,
    write_row,
};

#[derive(Debug, Clone, Subcommand)]
pub enum SessionsCommands {
    /// List all sessions
    List,
    /// Show details for a session
    Show { id: String },
    /// Create a new session
    Create(CreateArgs),
    /// Approve the generated plan for a session
    Approve { id: String },
    /// Send a message to a session
    Message {
        id: String,
        /// Message to send
        #[arg(long)]
        prompt: String,
    },
    /// Delete a session
    Delete { id: String },
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Source name, e.g. sources/github/owner/repo
    #[arg(long)]
    pub source: String,

    /// Starting branch
    #[arg(long, default_value = "main")]
    pub branch: String,

    /// Task prompt
    #[arg(long)]
    pub prompt: Option<String>,

    /// File containing the task prompt; wins over --prompt
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Session title
    #[arg(long)]
    pub title: Option<String>,

    /// Open a pull request automatically when done
    #[arg(long)]
    pub auto_pr: bool,

    /// Wait for plan approval before working
    #[arg(long)]
    pub require_plan_approval: bool,
}

impl CreateArgs {
    pub fn resolve_prompt(&self) -> Result<String> {
        let prompt = match &self.prompt_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Prompt file not found: {}", path.display()))?,
            None => self.prompt.clone().unwrap_or_default(),
        };
        if prompt.trim().is_empty() {
            bail!("You must provide --prompt or --prompt-file");
        }
        Ok(prompt)
    }

    pub fn to_request(&self) -> Result<CreateSessionRequest> {
        let mut request = CreateSessionRequest::new(
            self.resolve_prompt()?,
            SourceContext::build(&self.source, &self.branch),
        );
        if let Some(title) = &self.title {
            request = request.with_title(title);
        }
        if self.auto_pr {
            request = request.with_automation_mode(AutomationMode::AutoCreatePr);
        }
        if self.require_plan_approval {
            request = request.with_require_plan_approval(true);
        }
        Ok(request)
    }
}

impl SessionsCommands {
    pub fn run(self, client: &RestClient, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        let sessions = client.sessions();
        match self {
            SessionsCommands::List => {
                let all = sessions.all()?;
                match format {
                    OutputFormat::Json => write_plain_list(out, &all),
                    OutputFormat::Table => write_sessions_table(out, &all),
                }
            }
            SessionsCommands::Show { id } => {
                let session = sessions.find(&id)?;
                match format {
                    OutputFormat::Json => write_plain(out, &session),
                    OutputFormat::Table => write_session_details(out, &session),
                }
            }
            SessionsCommands::Create(args) => {
                let request = args.to_request()?;
                let session = sessions.create(&request)?;
                tracing::info!(session = %session.name, "Created session");
                match format {
                    OutputFormat::Json => write_plain(out, &session),
                    OutputFormat::Table => {
                        writeln!(out, "Session created: {}", session.name)?;
                        writeln!(out, "URL: {}", session.url.as_deref().unwrap_or("N/A"))?;
                        writeln!(out, "State: {}", display_state(session.state.as_ref()))?;
                        Ok(())
                    }
                }
            }
            SessionsCommands::Approve { id } => {
                let session = sessions.approve_plan(&id)?;
                write_mutation(out, format, "Plan approved for session", &session)
            }
            SessionsCommands::Message { id, prompt } => {
                let session = sessions.send_message(&id, &prompt)?;
                write_mutation(out, format, "Message sent to session", &session)
            }
            SessionsCommands::Delete { id } => {
                sessions.destroy(&id)?;
                match format {
                    OutputFormat::Json => write_json(out, &json!({ "deleted": id })),
                    OutputFormat::Table => {
                        writeln!(out, "Session deleted: {id}")?;
                        Ok(())
                    }
                }
            }
        }
    }
}

fn write_mutation(
    out: &mut impl Write,
    format: OutputFormat,
    headline: &str,
    session: &Session,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_plain(out, session),
        OutputFormat::Table => {
            writeln!(out, "{headline}: {}", session.name)?;
            writeln!(out, "State: {}", display_state(session.state.as_ref()))?;
            Ok(())
        }
    }
}

pub fn write_sessions_table(out: &mut impl Write, sessions: &[Session]) -> Result<()> {
    if sessions.is_empty() {
        writeln!(out, "No sessions found.")?;
        return Ok(());
    }

    write_row(
        out,
        format!("{:<20} {:<30} {:<24} {:<16}", "ID", "TITLE", "STATE", "UPDATED"),
    )?;
    writeln!(out, "{}", "-".repeat(93))?;
    for session in sessions {
        let title = truncate(session.title.as_deref().unwrap_or(&session.prompt), 28);
        write_row(
            out,
            format!(
                "{:<20} {:<30} {:<24} {:<16}",
                session.id,
                title,
                display_state(session.state.as_ref()),
                format_time(session.update_time_parsed()),
            ),
        )?;
    }
    Ok(())
}

pub fn write_session_details(out: &mut impl Write, session: &Session) -> Result<()> {
    writeln!(out, "Name:    {}", session.name)?;
    writeln!(out, "ID:      {}", session.id)?;
    if let Some(title) = &session.title {
        writeln!(out, "Title:   {title}")?;
    }
    writeln!(out, "Prompt:  {}", session.prompt)?;
    writeln!(out, "State:   {}", display_state(session.state.as_ref()))?;
    if let Some(context) = &session.source_context {
        match context.starting_branch() {
            Some(branch) => writeln!(out, "Source:  {} ({branch})", context.source)?,
            None => writeln!(out, "Source:  {}", context.source)?,
        }
    }
    if let Some(url) = &session.url {
        writeln!(out, "URL:     {url}")?;
    }
    writeln!(out, "Created: {}", format_time(session.create_time_parsed()))?;
    writeln!(out, "Updated: {}", format_time(session.update_time_parsed()))?;

    if !session.outputs.is_empty() {
        writeln!(out)?;
        writeln!(out, "Outputs:")?;
        for output in &session.outputs {
            match output {
                SessionOutput::PullRequest(pr) => writeln!(out, "  - PR: {}", pr.url)?,
                SessionOutput::Other(value) => writeln!(out, "  - {value}")?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn create_args(prompt: Option<&str>) -> CreateArgs {
        CreateArgs {
            source: "sources/github/o/r".to_string(),
            branch: "main".to_string(),
            prompt: prompt.map(str::to_string),
            prompt_file: None,
            title: None,
            auto_pr: false,
            require_plan_approval: false,
        }
    }

    #[test]
    fn test_minimal_request() {
        let request = create_args(Some("Fix the bug")).to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "prompt": "Fix the bug",
                "sourceContext": {
                    "source": "sources/github/o/r",
                    "githubRepoContext": { "startingBranch": "main" }
                }
            })
        );
    }

    #[test]
    fn test_request_flags() {
        let args = CreateArgs {
            title: Some("Bug".to_string()),
            auto_pr: true,
            require_plan_approval: true,
            ..create_args(Some("Fix"))
        };
        let request = args.to_request().unwrap();
        assert_eq!(request.title.as_deref(), Some("Bug"));
        assert_eq!(request.automation_mode, Some(AutomationMode::AutoCreatePr));
        assert_eq!(request.require_plan_approval, Some(true));
    }

    #[test]
    fn test_prompt_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.md");
        std::fs::write(&path, "Prompt from file").unwrap();

        let args = CreateArgs {
            prompt_file: Some(path),
            ..create_args(Some("inline"))
        };
        assert_eq!(args.resolve_prompt().unwrap(), "Prompt from file");
    }

    #[test]
    fn test_missing_prompt_is_rejected() {
        let err = create_args(None).resolve_prompt().unwrap_err();
        assert_eq!(err.to_string(), "You must provide --prompt or --prompt-file");

        let err = create_args(Some("   ")).resolve_prompt().unwrap_err();
        assert_eq!(err.to_string(), "You must provide --prompt or --prompt-file");

        let args = CreateArgs {
            prompt_file: Some(PathBuf::from("/definitely/not/here.md")),
            ..create_args(None)
        };
        let err = args.resolve_prompt().unwrap_err();
        assert!(err.to_string().starts_with("Prompt file not found"));
    }

    #[test]
    fn test_sessions_table() {
        let sessions: Vec<Session> = serde_json::from_value(json!([
            {
                "name": "sessions/1",
                "id": "1",
                "prompt": "A prompt that is long enough to need truncation",
                "state": "IN_PROGRESS",
                "updateTime": "2025-06-01T12:30:00Z"
            },
            { "name": "sessions/2", "id": "2", "prompt": "p", "title": "Short" }
        ]))
        .unwrap();

        let output = render(|out| write_sessions_table(out, &sessions));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[2],
            format!(
                "{:<20} {:<30} {:<24} {}",
                "1", "A prompt that is long eno...", "IN_PROGRESS", "2025-06-01 12:30"
            )
        );
        assert_eq!(lines[3], format!("{:<20} {:<30} {:<24} {}", "2", "Short", "COMPLETED", "N/A"));
    }

    #[test]
    fn test_empty_sessions_table() {
        assert_eq!(render(|out| write_sessions_table(out, &[])), "No sessions found.\n");
    }

    #[test]
    fn test_session_details_with_outputs() {
        let session: Session = serde_json::from_value(json!({
            "name": "sessions/9",
            "id": "9",
            "prompt": "Fix it",
            "state": "COMPLETED",
            "sourceContext": {
                "source": "sources/github/o/r",
                "githubRepoContext": { "startingBranch": "dev" }
            },
            "url": "https://jules.google.com/session/9",
            "createTime": "2025-06-01T10:00:00Z",
            "outputs": [
                { "pullRequest": { "url": "https://github.com/o/r/pull/1", "title": "Fix" } },
                { "note": "opaque" }
            ]
        }))
        .unwrap();

        let output = render(|out| write_session_details(out, &session));
        assert_eq!(
            output,
            "Name:    sessions/9\n\
             ID:      9\n\
             Prompt:  Fix it\n\
             State:   COMPLETED\n\
             Source:  sources/github/o/r (dev)\n\
             URL:     https://jules.google.com/session/9\n\
             Created: 2025-06-01 10:00\n\
             Updated: N/A\n\
             \n\
             Outputs:\n  - PR: https://github.com/o/r/pull/1\n  - {\"note\":\"opaque\"}\n"
        );
    }

    #[test]
    fn test_mutation_output() {
        let session: Session =
            serde_json::from_value(json!({ "name": "sessions/3", "state": "IN_PROGRESS" })).unwrap();
        let output =
            render(|out| write_mutation(out, OutputFormat::Table, "Plan approved for session", &session));
        assert_eq!(output, "Plan approved for session: sessions/3\nState: IN_PROGRESS\n");

        let output = render(|out| write_mutation(out, OutputFormat::Json, "ignored", &session));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["state"], "IN_PROGRESS");
        assert_eq!(value["name"], "sessions/3");
    }
}
