pub mod seed_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use self::args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use crate::core::check::DocumentKind;
    use crate::core::export::ExportFormat;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "shipment-contract")]
    #[command(about = "Check, generate and page shipment documents")]
    pub struct CliConfig {
        /// Directory that relative file paths are resolved against
        #[arg(long, default_value = ".", global = true)]
        pub base_dir: String,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Validate a JSON document against one of the shipment shapes
        Check {
            #[arg(long, value_enum, default_value = "shipment")]
            kind: DocumentKind,

            /// JSON file to check
            file: String,
        },

        /// Generate sample shipments
        Seed {
            /// TOML file with generator settings
            #[arg(short, long)]
            config: Option<String>,

            /// Overrides `count` from the config file
            #[arg(long)]
            count: Option<usize>,

            #[arg(long, value_enum, default_value = "json")]
            format: ExportFormat,

            /// Fixed RNG seed for reproducible output
            #[arg(long)]
            rng_seed: Option<u64>,

            /// Output file name, defaults to `shipments.<format>`
            #[arg(short, long)]
            output: Option<String>,
        },

        /// Print one page of a shipment file, newest first
        Page {
            /// JSON array of shipments or a shipment list
            #[arg(short, long)]
            input: String,

            #[arg(long, default_value = "10", allow_negative_numbers = true)]
            limit: i64,

            #[arg(long, default_value = "0", allow_negative_numbers = true)]
            offset: i64,
        },
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("base_dir", &self.base_dir)?;
            match &self.command {
                Command::Check { file, .. } => validate_path("file", file),
                Command::Seed { config, output, .. } => {
                    if let Some(config) = config {
                        validate_path("config", config)?;
                    }
                    if let Some(output) = output {
                        validate_path("output", output)?;
                    }
                    Ok(())
                }
                Command::Page { input, .. } => validate_path("input", input),
            }
        }
    }

}
