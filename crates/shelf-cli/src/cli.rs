use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelf: in-memory product repository",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML store configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of bootstrap products to load (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<usize>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List products, sorted and paginated
    List(ListArgs),
    /// Show one product
    Get(GetArgs),
    /// Add a new product
    Add(ProductArgs),
    /// Replace an existing product
    Update(ProductArgs),
    /// Delete a product
    Delete(DeleteArgs),
    /// Run every operation once against the store
    Demo,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, default_value = "0")]
    pub start: usize,
    /// Page size (defaults to the configured limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    /// Field to sort by (defaults to the configured key)
    #[arg(short = 'k', long)]
    pub order_key: Option<String>,
    #[arg(short, long)]
    pub reverse: bool,
}

#[derive(Args)]
pub struct GetArgs {
    pub name: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub name: String,
}

#[derive(Args, Clone)]
pub struct ProductArgs {
    pub name: String,
    #[arg(long)]
    pub alias: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    /// Label as key=value; repeatable
    #[arg(short, long = "label", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
}

fn parse_label(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got {s:?}")),
    }
}
