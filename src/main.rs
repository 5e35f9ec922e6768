use clap::Parser;
use phylobusco::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{concat, select},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Concat(_) => "concat",
        Command::Select(_) => "select",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Concat(args) => concat::concat(args)?,
        Command::Select(args) => select::select(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
