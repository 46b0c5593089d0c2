use clap::CommandFactory;
use clap_complete::Shell;

use crate::Cli;

pub fn run(shell: Shell) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "flames", &mut std::io::stdout());
    Ok(())
}
