// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use jules_api_contract::{Activity, ActivityPayload, Artifact};
use jules_rest_client::RestClient;

use crate::render::{OutputFormat, truncate, write_plain, write_plain_list, write_row};

#[derive(Debug, Clone, Subcommand)]
pub enum ActivitiesCommands {
    /// List activities for a session
    List {
        /// Session id or name
        session_id: String,
    },
    /// Show details for an activity
    Show {
        /// Full activity name, e.g. sessions/ID/activities/ACTIVITY_ID
        name: String,
    },
}

impl ActivitiesCommands {
    pub fn run(self, client: &RestClient, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        match self {
            ActivitiesCommands::List { session_id } => {
                let activities = client.activities().all(&session_id)?;
                match format {
                    OutputFormat::Json => write_plain_list(out, &activities),
                    OutputFormat::Table => write_activities_table(out, &activities),
                }
            }
            ActivitiesCommands::Show { name } => {
                let activity = client.activities().find(&name)?;
                match format {
                    OutputFormat::Json => write_plain(out, &activity),
                    OutputFormat::Table => write_activity_details(out, &activity),
                }
            }
        }
    }
}

/// One-line description used in the activity table
pub fn summary(activity: &Activity) -> String {
    match &activity.payload {
        ActivityPayload::AgentMessaged(_) | ActivityPayload::UserMessaged(_) => {
            activity.message().unwrap_or_default().to_string()
        }
        ActivityPayload::PlanGenerated(_) => {
            let steps = activity.plan().map_or(0, |plan| plan.steps.len());
            format!("Plan with {steps} steps")
        }
        ActivityPayload::ProgressUpdated(_) => activity.progress_title().unwrap_or_default().to_string(),
        ActivityPayload::SessionCompleted(_) => "Session completed".to_string(),
        ActivityPayload::SessionFailed(_) => {
            activity.failure_reason().unwrap_or("Session failed").to_string()
        }
        ActivityPayload::PlanApproved(_) | ActivityPayload::Unknown => {
            activity.description.clone().unwrap_or_default()
        }
    }
}

pub fn write_activities_table(out: &mut impl Write, activities: &[Activity]) -> Result<()> {
    if activities.is_empty() {
        writeln!(out, "No activities found.")?;
        return Ok(());
    }

    write_row(
        out,
        format!("{:<20} {:<20} {:<10} {:<40}", "ID", "TYPE", "FROM", "DESCRIPTION"),
    )?;
    writeln!(out, "{}", "-".repeat(93))?;
    for activity in activities {
        let from = activity.originator.as_ref().map_or("N/A", |o| o.as_str());
        write_row(
            out,
            format!(
                "{:<20} {:<20} {:<10} {:<40}",
                activity.id,
                activity.activity_type().as_str(),
                from,
                truncate(&summary(activity), 38),
            ),
        )?;
    }
    Ok(())
}

pub fn write_activity_details(out: &mut impl Write, activity: &Activity) -> Result<()> {
    writeln!(out, "Name:        {}", activity.name)?;
    writeln!(out, "ID:          {}", activity.id)?;
    writeln!(out, "Type:        {}", activity.activity_type())?;
    if let Some(originator) = &activity.originator {
        writeln!(out, "Originator:  {originator}")?;
    }
    if let Some(created) = &activity.create_time {
        writeln!(out, "Created:     {created}")?;
    }
    if let Some(description) = &activity.description {
        writeln!(out, "Description: {description}")?;
    }

    match &activity.payload {
        ActivityPayload::AgentMessaged(_) | ActivityPayload::UserMessaged(_) => {
            writeln!(out, "\nMessage:")?;
            writeln!(out, "  {}", activity.message().unwrap_or_default())?;
        }
        ActivityPayload::PlanGenerated(_) => {
            if let Some(plan) = activity.plan() {
                writeln!(out, "\nPlan:")?;
                for (i, step) in plan.steps.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, step.title)?;
                }
            }
        }
        ActivityPayload::PlanApproved(_) => {
            writeln!(out, "\nApproved plan: {}", activity.approved_plan_id().unwrap_or("N/A"))?;
        }
        ActivityPayload::ProgressUpdated(_) => {
            writeln!(out, "\nProgress: {}", activity.progress_title().unwrap_or_default())?;
            if let Some(details) = activity.progress_description() {
                writeln!(out, "Details:  {details}")?;
            }
        }
        ActivityPayload::SessionFailed(_) => {
            writeln!(out, "\nFailure Reason: {}", activity.failure_reason().unwrap_or("N/A"))?;
        }
        ActivityPayload::SessionCompleted(_) | ActivityPayload::Unknown => {}
    }

    if !activity.artifacts.is_empty() {
        writeln!(out, "\nArtifacts:")?;
        for artifact in &activity.artifacts {
            write_artifact(out, artifact)?;
        }
    }
    Ok(())
}

fn write_artifact(out: &mut impl Write, artifact: &Artifact) -> Result<()> {
    match artifact {
        Artifact::ChangeSet(_) => {
            let message = artifact.suggested_commit_message().unwrap_or("no commit message");
            writeln!(out, "  - Type: change_set ({message})")?;
        }
        Artifact::Media(_) => {
            let mime = artifact.media_mime_type().unwrap_or("unknown");
            writeln!(out, "  - Type: media ({mime})")?;
        }
        Artifact::BashOutput(_) => {
            let command = artifact.bash_command().unwrap_or_default();
            match artifact.bash_exit_code() {
                Some(code) => writeln!(out, "  - Type: bash_output ({command}, exit {code})")?,
                None => writeln!(out, "  - Type: bash_output ({command})")?,
            }
        }
        Artifact::Unknown => writeln!(out, "  - Type: unknown")?,
    }
    Ok(())
}
