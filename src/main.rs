use std::io::{self, BufRead};

use clap::Parser;
use serde::Serialize;

use sqldigest::{query_digest_and_first_comment, DigestConfig};

#[derive(Parser, Debug)]
#[command(name = "sqldigest", about = "Rewrite SQL statements into literal-free digests")]
struct Cli {
    /// Statements to digest; reads stdin line by line when omitted
    queries: Vec<String>,

    /// Collapse placeholder runs past this many values
    #[arg(short = 'g', long = "grouping-limit", default_value = "3")]
    grouping_limit: u32,

    /// Scan at most this many bytes of each statement
    #[arg(long = "max-query-length", default_value = "65000")]
    max_query_length: usize,

    /// Fold unquoted text to lowercase
    #[arg(long)]
    lowercase: bool,

    /// Digest NUL bytes as literals
    #[arg(long = "replace-null")]
    replace_null: bool,

    /// Fold digits inside identifiers
    #[arg(long = "no-digits")]
    no_digits: bool,

    /// Print the first comment after each digest
    #[arg(short = 'c', long = "first-comment")]
    first_comment: bool,

    /// Emit one JSON object per statement
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct DigestRecord<'a> {
    query: &'a str,
    digest: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_comment: Option<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sqldigest=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cfg = DigestConfig {
        max_query_length: cli.max_query_length,
        lowercase: cli.lowercase,
        replace_null: cli.replace_null,
        no_digits: cli.no_digits,
        grouping_limit: cli.grouping_limit.max(1),
    };

    if cli.queries.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            print_digest(&line, &cfg, &cli)?;
        }
    } else {
        for query in &cli.queries {
            print_digest(query, &cfg, &cli)?;
        }
    }

    Ok(())
}

fn print_digest(query: &str, cfg: &DigestConfig, cli: &Cli) -> anyhow::Result<()> {
    let (digest, comment) = query_digest_and_first_comment(query, cfg);

    if cli.json {
        let record = DigestRecord {
            query,
            digest: &digest,
            first_comment: comment,
        };
        println!("{}", serde_json::to_string(&record)?);
    } else if cli.first_comment {
        println!("{digest}\t{}", comment.unwrap_or(""));
    } else {
        println!("{digest}");
    }

    Ok(())
}
