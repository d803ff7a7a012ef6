use clap::Parser;
use jmxforge::{
    cli::{Cli, Commands},
    commands::{self, CompileCommandArgs},
    telemetry::{self, LoggingConfig},
};

fn main() -> anyhow::Result<()> {
    telemetry::init_logging(&LoggingConfig::from_env());

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            spec,
            output,
            config,
            threads,
            ramp_up,
            loops,
            base_url,
            name,
        } => {
            commands::execute_compile(CompileCommandArgs {
                spec_path: &spec,
                output_path: output.as_deref(),
                config_path: config.as_deref(),
                threads,
                ramp_up,
                loops,
                base_url: base_url.as_deref(),
                name: name.as_deref(),
            })?;
        }
        Commands::List { spec } => {
            commands::execute_list(&spec)?;
        }
    }

    Ok(())
}
