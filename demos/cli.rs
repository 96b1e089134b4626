use std::error;
use std::process;

use bibdoc::{Config, Document, Entry, Filter, RedefinitionPolicy};

use clap::Parser as CLIParser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only entries by all of these authors (comma-separated last names)
    #[clap(short, long)]
    authors: Option<String>,

    /// Return only entries of any of these types (comma-separated)
    #[clap(short, long)]
    types: Option<String>,

    /// Keep the first of several @string definitions of one name
    #[clap(long)]
    keep_first_string: bool,

    /// Print the entries as JSON
    #[cfg(feature = "json")]
    #[clap(long)]
    json: bool,
}

fn split_list(list: &Option<String>) -> Vec<String> {
    match list {
        Some(list) => list
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

fn print_human_readable(entries: &[&Entry]) {
    println!("Found {} entries", entries.len());
    for entry in entries {
        println!("{}\n", entry);
    }
}

#[cfg(feature = "json")]
fn print_json(entries: &[&Entry]) -> Result<(), Box<dyn error::Error>> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

fn run(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    let policy = if s.keep_first_string {
        RedefinitionPolicy::KeepFirst
    } else {
        RedefinitionPolicy::Overwrite
    };
    let doc = Document::from_file(&s.input, Config::new().with_redefinition(policy))?;

    let filter = Filter::new()
        .with_entry_types(split_list(&s.types))
        .with_last_names(split_list(&s.authors));
    let entries = filter.apply(doc.entries());

    #[cfg(feature = "json")]
    {
        if s.json {
            return print_json(&entries);
        }
    }
    print_human_readable(&entries);

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibdoc=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::parse();
    if let Err(err) = run(&settings) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
