//! Public Suffix CLI
//!
//! Classifies domain names, dumps the list trie and downloads the list.

mod args;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use public_suffix::{
    domain_to_ascii, download_public_suffix_list, normalize_domain_name, parse_domain_names,
    validate_domain_name, DomainProperties, PublicSuffixTrie,
};

use crate::args::{Args, Command};

fn main() {
    let args = Args::parse();
    logging::init(&args);

    let result = match args.command {
        Command::Lookup {
            ref domain_name,
            ref domain_names_file,
            ref list_file_path,
            json,
        } => cmd_lookup(
            domain_name.as_deref(),
            domain_names_file.as_deref(),
            list_file_path.as_deref(),
            &args.list_url,
            json,
        ),
        Command::DumpTrie {
            ref list_file_path,
            pretty,
        } => cmd_dump_trie(list_file_path.as_deref(), &args.list_url, pretty),
        Command::Download => cmd_download(&args.list_url),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_trie(list_file_path: Option<&Path>, list_url: &str) -> Result<PublicSuffixTrie> {
    match list_file_path {
        Some(path) => PublicSuffixTrie::from_file(path)
            .with_context(|| format!("Failed to load list file: {}", path.display())),
        None => {
            let text = download_public_suffix_list(list_url)?;
            Ok(PublicSuffixTrie::from_list_text(&text))
        }
    }
}

fn collect_domain_names(
    domain_name: Option<&str>,
    domain_names_file: Option<&Path>,
) -> Result<Vec<String>> {
    let mut names = Vec::new();

    if let Some(name) = domain_name {
        let ascii = domain_to_ascii(name)?;
        validate_domain_name(&ascii)?;
        names.push(normalize_domain_name(&ascii));
    }

    if let Some(path) = domain_names_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read domain names file: {}", path.display()))?;
        let from_file = parse_domain_names(&text)
            .with_context(|| format!("Invalid domain name in {}", path.display()))?;
        names.extend(from_file);
    }

    if domain_name.is_none() && domain_names_file.is_none() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read domain names from stdin")?;
        names = parse_domain_names(&text).context("Invalid domain name on stdin")?;
    }

    // Keep first occurrence only
    let mut seen = std::collections::HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
    Ok(names)
}

fn cmd_lookup(
    domain_name: Option<&str>,
    domain_names_file: Option<&Path>,
    list_file_path: Option<&Path>,
    list_url: &str,
    json: bool,
) -> Result<()> {
    let names = collect_domain_names(domain_name, domain_names_file)?;
    let trie = load_trie(list_file_path, list_url)?;

    let results: Vec<(&str, Option<DomainProperties>)> = names
        .iter()
        .map(|name| (name.as_str(), trie.get_domain_properties(name)))
        .collect();

    for (name, props) in &results {
        if props.is_none() {
            warn!(domain = %name, "no public suffix rule applies");
        }
    }

    if json {
        let values: Vec<&Option<DomainProperties>> = results.iter().map(|(_, p)| p).collect();
        println!("{}", serde_json::to_string(&values)?);
    } else {
        let blocks: Vec<String> = results
            .iter()
            .map(|(name, props)| match props {
                Some(props) => props.to_aligned_string(),
                None => format!("{}: no public suffix rule applies", name),
            })
            .collect();
        println!("{}", blocks.join("\n\n"));
    }

    Ok(())
}

fn cmd_dump_trie(list_file_path: Option<&Path>, list_url: &str, pretty: bool) -> Result<()> {
    let trie = load_trie(list_file_path, list_url)?;
    let dump = if pretty {
        trie.to_json_pretty()?
    } else {
        trie.to_json()?
    };
    println!("{}", dump);
    Ok(())
}

fn cmd_download(list_url: &str) -> Result<()> {
    print!("{}", download_public_suffix_list(list_url)?);
    Ok(())
}
