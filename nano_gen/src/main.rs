use clap::{Parser, Subcommand};
use nano_gen::cmds;
use nano_gen::cmds::analyze::ReportFormat;
use nano_gen::params::GeneratorParams;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "nano-gen")]
#[command(about = "Enum field code generator for compact protobuf messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate Rust code from schema definitions */
    Codegen {
        /* Input YAML files containing enum and message definitions */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output directory for generated code */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /* Generator parameters, key=value[,key=value] */
        #[arg(long = "param", value_name = "PARAMS", default_value = "")]
        params: GeneratorParams,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Show how enums partition into canonical values and aliases, and how fields encode */
    Analyze {
        /* Input YAML files containing enum and message definitions */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Report format */
        #[arg(long = "format", value_enum, default_value = "text")]
        format: ReportFormat,

        /* Generator parameters, key=value[,key=value] */
        #[arg(long = "param", value_name = "PARAMS", default_value = "")]
        params: GeneratorParams,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Codegen {
            files,
            output_dir,
            params,
            verbose,
        } => {
            init_tracing(verbose);
            cmds::codegen::run(files, output_dir, params, verbose)?;
        }

        Commands::Analyze {
            files,
            format,
            params,
        } => {
            init_tracing(false);
            cmds::analyze::run(files, format, &params)?;
        }
    }

    Ok(())
}
