//! CLI argument definitions using clap

use crate::scaffold::Priority;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postforge", version, about, long_about = None)]
pub struct Args {
    /// Directory holding per-API collection subdirectories
    #[arg(
        long = "collections-dir",
        value_name = "DIR",
        global = true,
        default_value = "collections"
    )]
    pub collections_dir: PathBuf,

    /// Directory generated bundles are written to
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        global = true,
        default_value = "dist"
    )]
    pub output_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate Postman collections from .curl files
    ///
    /// Scans each API directory for cURL command files, parses them into
    /// request items, and writes a workspace bundle plus a single merged
    /// collection.
    FromCurl,

    /// Combine existing Postman collections into a workspace bundle
    ///
    /// Picks up one collection file per API directory, copies environment
    /// files, and writes import instructions alongside the bundle.
    Combine,

    /// Create starter directories for APIs that have no collection yet
    Scaffold {
        /// Only scaffold APIs at this priority tier
        #[arg(long, value_enum, default_value_t = Priority::High)]
        priority: Priority,
    },

    /// Rewrite collections with example bodies and parameter documentation
    Enhance,
}
