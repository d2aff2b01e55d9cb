//! rfcmark CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rfcmark")]
#[command(version)]
#[command(about = "Bibliography and front matter tools for RFC documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve citations in a JSON document tree into reference sections
    Bibliography {
        /// Input document tree (JSON)
        input: String,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Print diagnostics as JSON, one object per line
        #[arg(long)]
        json: bool,
    },

    /// Write the RFC 7991 title block for a TOML title file
    Title {
        /// Title block (TOML)
        input: String,

        /// Depth of the table of contents
        #[arg(long, default_value_t = 0)]
        toc_depth: usize,
    },

    /// Reformat a raw <reference> block
    Reference {
        /// File starting with a <reference> or <referencegroup> block
        input: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rfcmark=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bibliography {
            input,
            output,
            json,
        } => commands::bibliography::execute(commands::bibliography::BibliographyArgs {
            input,
            output,
            json,
        }),
        Commands::Title { input, toc_depth } => {
            commands::title::execute(commands::title::TitleArgs { input, toc_depth })
        }
        Commands::Reference { input } => {
            commands::reference::execute(commands::reference::ReferenceArgs { input })
        }
    }
}
