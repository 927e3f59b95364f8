//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use public_suffix::PUBLIC_SUFFIX_LIST_URL;

#[derive(Parser, Debug)]
#[command(name = "public-suffix")]
#[command(about = "Obtain properties about a domain name using the Public Suffix List")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// URL the list is downloaded from when no list file is given
    #[arg(long, env = "PUBLIC_SUFFIX_LIST_URL", default_value = PUBLIC_SUFFIX_LIST_URL, global = true)]
    pub list_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print eTLD, registered domain and subdomain of domain names.
    ///
    /// If no domain name or file is provided, names are read from stdin.
    Lookup {
        /// A domain name about which to retrieve information
        domain_name: Option<String>,

        /// A file storing domain names, one per line
        #[arg(long)]
        domain_names_file: Option<PathBuf>,

        /// A file storing the Public Suffix List (downloaded if omitted)
        #[arg(long, env = "PUBLIC_SUFFIX_LIST_FILE")]
        list_file_path: Option<PathBuf>,

        /// Output the domain properties as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the trie representation of the list as JSON
    DumpTrie {
        /// A file storing the Public Suffix List (downloaded if omitted)
        list_file_path: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Download the list and print it
    Download,
}
