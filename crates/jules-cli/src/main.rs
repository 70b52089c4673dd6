// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io;

use jules_cli::{Cli, Parser, report_error, run};

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = cli.logging.init("jules-cli") {
        eprintln!("Warning: logging disabled: {err}");
    }

    let format = cli.format;
    if let Err(err) = run(cli) {
        tracing::debug!(error = ?err, "Command failed");
        report_error(&err, format, &mut io::stdout(), &mut io::stderr()).ok();
        std::process::exit(1);
    }
}
