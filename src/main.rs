use anyhow::Result;
use clap::Parser;

use release_branch::cli::orchestration::{run_build, run_prune};
use release_branch::cli::{Cli, Command};
use release_branch::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build(args) => run_build(args, cli.config.as_deref())
            .map(|outcome| ui::display_release_summary(&outcome)),
        Command::Prune(args) => run_prune(args).map(|removed| {
            ui::display_success(&format!("Pruned {} paths", removed.len()));
        }),
    };

    if let Err(e) = result {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
