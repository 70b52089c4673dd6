// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use jules_api_contract::Source;
use jules_rest_client::RestClient;

use crate::render::{OutputFormat, write_plain, write_plain_list, write_row};

#[derive(Debug, Clone, Subcommand)]
pub enum SourcesCommands {
    /// List all connected repositories
    List,
    /// Show details for a source
    Show {
        /// Source name, e.g. sources/github/owner/repo
        name: String,
    },
}

impl SourcesCommands {
    pub fn run(self, client: &RestClient, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        match self {
            SourcesCommands::List => {
                let sources = client.sources().all()?;
                match format {
                    OutputFormat::Json => write_plain_list(out, &sources),
                    OutputFormat::Table => write_sources_table(out, &sources),
                }
            }
            SourcesCommands::Show { name } => {
                let source = client.sources().find(&name)?;
                match format {
                    OutputFormat::Json => write_plain(out, &source),
                    OutputFormat::Table => write_source_details(out, &source),
                }
            }
        }
    }
}

pub fn write_sources_table(out: &mut impl Write, sources: &[Source]) -> Result<()> {
    if sources.is_empty() {
        writeln!(out, "No sources found.")?;
        return Ok(());
    }

    write_row(out, format!("{:<50} {:<20}", "NAME", "REPOSITORY"))?;
    writeln!(out, "{}", "-".repeat(72))?;
    for source in sources {
        let repo = source
            .github_repo
            .as_ref()
            .map_or_else(|| "N/A".to_string(), |repo| repo.full_name());
        write_row(out, format!("{:<50} {:<20}", source.name, repo))?;
    }
    Ok(())
}

pub fn write_source_details(out: &mut impl Write, source: &Source) -> Result<()> {
    writeln!(out, "Name:       {}", source.name)?;
    writeln!(out, "ID:         {}", source.id)?;

    let Some(repo) = &source.github_repo else {
        return Ok(());
    };
    writeln!(out, "Repository: {}", repo.full_name())?;
    if let Some(private) = repo.is_private {
        writeln!(out, "Private:    {}", if private { "yes" } else { "no" })?;
    }
    if let Some(branch) = &repo.default_branch {
        writeln!(out, "Default:    {}", branch.display_name)?;
    }
    if !repo.branches.is_empty() {
        let names: Vec<_> = repo.branches.iter().map(|b| b.display_name.as_str()).collect();
        writeln!(out, "Branches:   {}", names.join(", "))?;
    }
    Ok(())
}
