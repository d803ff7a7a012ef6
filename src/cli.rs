use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jmxforge")]
#[command(version)]
#[command(about = "Generate JMeter test plans from OpenAPI/Swagger documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a spec into a JMeter test plan (.jmx)
    Compile {
        /// Path to the OpenAPI/Swagger file (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,

        /// YAML or JSON file holding test plan parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of threads (virtual users)
        #[arg(long)]
        threads: Option<u32>,

        /// Ramp-up period in seconds
        #[arg(long)]
        ramp_up: Option<u32>,

        /// Loop count per thread
        #[arg(long)]
        loops: Option<u32>,

        /// Base URL for requests (defaults to the server declared in the spec)
        #[arg(long)]
        base_url: Option<String>,

        /// Test plan name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List the operations a plan would contain
    List {
        /// Path to the OpenAPI/Swagger file (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,
    },
}
