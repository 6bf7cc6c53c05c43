use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::{json, Value};
use shelf_store::{InMemoryProductStore, ListOptions, ProductRepository, StoreConfig};
use shelf_types::Product;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed_count = seed;
    }
    tracing::debug!(?config, "store config");

    let store = InMemoryProductStore::from_config(&config);
    let steps = match &cli.command {
        Command::Demo => run_demo(&store, &config)?,
        command => vec![execute(&store, &config, command)?],
    };
    for step in &steps {
        println!("{}", render(step, &cli.format)?);
    }
    Ok(())
}

/// Result of one repository operation, ready to render.
#[derive(Debug)]
pub enum Report {
    Listing {
        options: ListOptions,
        products: Vec<Arc<Product>>,
    },
    Found(Arc<Product>),
    Missing(String),
    Added(Arc<Product>),
    Updated(String),
    Deleted(String),
}

pub fn execute(
    store: &dyn ProductRepository,
    config: &StoreConfig,
    command: &Command,
) -> anyhow::Result<Report> {
    match command {
        Command::List(args) => {
            let options = ListOptions::new(
                args.start,
                args.limit.unwrap_or(config.default_limit),
                args.order_key
                    .clone()
                    .unwrap_or_else(|| config.default_order_key.clone()),
                args.reverse,
            );
            let products = store.get_all(&options).context("listing products")?;
            Ok(Report::Listing { options, products })
        }
        Command::Get(args) => Ok(match store.get(&args.name)? {
            Some(product) => Report::Found(product),
            None => Report::Missing(args.name.clone()),
        }),
        Command::Add(args) => {
            let product = store
                .add(build_product(args))
                .with_context(|| format!("adding {}", args.name))?;
            Ok(Report::Added(product))
        }
        Command::Update(args) => {
            let mut product = build_product(args);
            if let Some(existing) = store.get(&args.name)? {
                product.metadata.uid = existing.uid().clone();
                product.metadata.creation_timestamp = existing.metadata.creation_timestamp;
            }
            store
                .update(&args.name, product)
                .with_context(|| format!("updating {}", args.name))?;
            Ok(Report::Updated(args.name.clone()))
        }
        Command::Delete(args) => {
            store
                .delete(&args.name)
                .with_context(|| format!("deleting {}", args.name))?;
            Ok(Report::Deleted(args.name.clone()))
        }
        Command::Demo => anyhow::bail!("demo is a sequence of commands, not a single operation"),
    }
}

fn build_product(args: &ProductArgs) -> Product {
    let mut product = Product::new(&args.name);
    if let Some(alias) = &args.alias {
        product = product.with_alias(alias);
    }
    if let Some(description) = &args.description {
        product = product.with_description(description);
    }
    if let Some(category) = &args.category {
        product = product.with_category(category);
    }
    if let Some(price) = args.price {
        product = product.with_price(price);
    }
    for (k, v) in &args.labels {
        product = product.with_label(k, v);
    }
    product
}

/// Exercise every operation once: add, get, update, list, delete.
fn run_demo(store: &dyn ProductRepository, config: &StoreConfig) -> anyhow::Result<Vec<Report>> {
    let widget = ProductArgs {
        name: "demo-widget".into(),
        alias: Some("Widget".into()),
        description: None,
        category: Some("demo".into()),
        price: Some(1.5),
        labels: vec![("source".into(), "demo".into())],
    };
    let repriced = ProductArgs {
        price: Some(99.0),
        ..widget.clone()
    };
    let script = [
        Command::Add(widget.clone()),
        Command::Get(GetArgs { name: widget.name.clone() }),
        Command::Update(repriced),
        Command::List(ListArgs {
            start: 0,
            limit: Some(config.default_limit),
            order_key: Some("price".into()),
            reverse: true,
        }),
        Command::Delete(DeleteArgs { name: widget.name.clone() }),
        Command::Get(GetArgs { name: widget.name.clone() }),
    ];
    script
        .iter()
        .map(|command| execute(store, config, command))
        .collect()
}

pub fn render(report: &Report, format: &OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report_json(report)?)?),
        OutputFormat::Text => Ok(report_text(report)),
    }
}

fn report_json(report: &Report) -> anyhow::Result<Value> {
    Ok(match report {
        Report::Listing { options, products } => {
            let items: Vec<&Product> = products.iter().map(|p| p.as_ref()).collect();
            json!({ "options": options, "items": items })
        }
        Report::Found(p) => json!({ "product": p.as_ref() }),
        Report::Missing(name) => json!({ "product": Value::Null, "name": name }),
        Report::Added(p) => json!({ "added": p.as_ref() }),
        Report::Updated(name) => json!({ "updated": name }),
        Report::Deleted(name) => json!({ "deleted": name }),
    })
}

fn report_text(report: &Report) -> String {
    match report {
        Report::Listing { options, products } => {
            let order = if options.reverse { "desc" } else { "asc" };
            let mut out = format!(
                "{} product(s) from {} by {} ({order})",
                products.len().to_string().bold(),
                options.start,
                options.order_key.cyan(),
            );
            for p in products {
                out.push('\n');
                out.push_str(&product_line(p));
            }
            out
        }
        Report::Found(p) => product_line(p),
        Report::Missing(name) => format!("No product named {}", name.yellow()),
        Report::Added(p) => format!("{} Added {} ({})", "✓".green().bold(), p.name().yellow(), p.uid()),
        Report::Updated(name) => format!("{} Updated {}", "✓".green().bold(), name.yellow()),
        Report::Deleted(name) => format!("{} Deleted {}", "✓".green().bold(), name.yellow()),
    }
}

fn product_line(p: &Product) -> String {
    let price = p
        .price()
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "-".into());
    let category = p.spec.as_ref().map(|s| s.category.as_str()).unwrap_or("-");
    format!(
        "  {:<16} {:>10}  {:<10} {}",
        p.name().yellow(),
        price,
        category,
        p.uid().short_id().dimmed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_store::StoreError;

    fn add_args(name: &str, price: f64) -> ProductArgs {
        ProductArgs {
            name: name.into(),
            alias: None,
            description: None,
            category: Some("tools".into()),
            price: Some(price),
            labels: vec![],
        }
    }

    #[test]
    fn list_uses_config_defaults() {
        let store = InMemoryProductStore::seeded(5);
        let config = StoreConfig {
            default_limit: 2,
            ..StoreConfig::default()
        };
        let command = Command::List(ListArgs {
            start: 0,
            limit: None,
            order_key: None,
            reverse: false,
        });
        match execute(&store, &config, &command).unwrap() {
            Report::Listing { options, products } => {
                assert_eq!(options, ListOptions::new(0, 2, "name", false));
                let names: Vec<&str> = products.iter().map(|p| p.name()).collect();
                assert_eq!(names, ["product0", "product1"]);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn add_then_duplicate_fails_with_store_error() {
        let store = InMemoryProductStore::new();
        let config = StoreConfig::default();
        let add = Command::Add(add_args("widget", 3.0));

        assert!(matches!(execute(&store, &config, &add).unwrap(), Report::Added(_)));
        let err = execute(&store, &config, &add).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn update_keeps_existing_uid() {
        let store = InMemoryProductStore::new();
        let config = StoreConfig::default();
        let added = store.add(build_product(&add_args("widget", 3.0))).unwrap();

        let report = execute(&store, &config, &Command::Update(add_args("widget", 4.0))).unwrap();
        assert!(matches!(report, Report::Updated(_)));

        let read = store.get("widget").unwrap().unwrap();
        assert_eq!(read.uid(), added.uid());
        assert_eq!(read.price(), Some(4.0));
    }

    #[test]
    fn get_missing_reports_missing() {
        let store = InMemoryProductStore::new();
        let report = execute(
            &store,
            &StoreConfig::default(),
            &Command::Get(GetArgs { name: "nope".into() }),
        )
        .unwrap();
        assert!(matches!(report, Report::Missing(ref n) if n == "nope"));
    }

    #[test]
    fn delete_missing_fails() {
        let store = InMemoryProductStore::new();
        let command = Command::Delete(DeleteArgs { name: "ghost".into() });
        assert!(execute(&store, &StoreConfig::default(), &command).is_err());
    }

    #[test]
    fn demo_leaves_store_as_it_found_it() {
        let store = InMemoryProductStore::seeded(3);
        let steps = run_demo(&store, &StoreConfig::default()).unwrap();
        assert_eq!(steps.len(), 6);
        assert!(matches!(steps[0], Report::Added(_)));
        match &steps[3] {
            Report::Listing { products, .. } => {
                assert_eq!(products.len(), 4);
                assert_eq!(products[0].name(), "demo-widget");
                assert_eq!(products[0].price(), Some(99.0));
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert!(matches!(steps[5], Report::Missing(_)));
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn json_rendering() {
        let product = Arc::new(Product::new("widget").with_price(2.0));
        let out = render(&Report::Found(product), &OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["product"]["metadata"]["name"], "widget");
        assert_eq!(value["product"]["spec"]["price"], 2.0);

        let out = render(&Report::Deleted("widget".into()), &OutputFormat::Json).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap()["deleted"], "widget");
    }

    #[test]
    fn text_rendering_mentions_product() {
        let product = Arc::new(Product::new("widget").with_price(2.0));
        let out = render(&Report::Added(product), &OutputFormat::Text).unwrap();
        assert!(out.contains("widget"));
        let out = render(&Report::Missing("gizmo".into()), &OutputFormat::Text).unwrap();
        assert!(out.contains("gizmo"));
    }

    #[test]
    fn run_command_reads_config_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_count = 2").unwrap();
        let path = file.path().display().to_string();
        let cli = <Cli as clap::Parser>::try_parse_from([
            "shelf", "--config", path.as_str(), "get", "product1",
        ])
        .unwrap();
        run_command(cli).unwrap();
    }

    #[test]
    fn run_command_reports_bad_config() {
        let cli = <Cli as clap::Parser>::try_parse_from([
            "shelf", "--config", "/nonexistent/shelf.toml", "list",
        ])
        .unwrap();
        let err = run_command(cli).unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }
}
