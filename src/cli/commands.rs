use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "standards-watcher")]
#[command(about = "Publishes RSS feeds for accounting-standard announcement listings")]
#[command(version)]
pub struct Cli {
    /// JSON file with the source list (built-in list if omitted)
    #[arg(long, global = true, env = "WATCHER_SOURCES")]
    pub sources: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every source and rewrite its feed file
    Run {
        /// Directory for the generated <name>.xml files
        #[arg(short, long, env = "WATCHER_OUT_DIR")]
        out_dir: Option<PathBuf>,

        /// Only process the named source (repeatable)
        #[arg(long = "only", value_name = "NAME")]
        only: Vec<String>,
    },

    /// List configured sources
    List,

    /// Fetch one source and print the items it would publish, writing nothing
    Preview {
        /// Source name as shown by `list`
        name: String,
    },
}
