//! Terminal front end for the inventory dashboard

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use inventory_client::editor::{STANDARD_SIZES, parse_price_input, parse_stock_input};
use inventory_client::image::{encode_image_file, is_image_reference, placeholder_image};
use inventory_client::logger::init_logger;
use inventory_client::{
    CategoryFilter, ClientConfig, ClientError, Dashboard, DraftAction, HttpClient, Product,
    SortKey, VariantPolicy,
};

#[derive(Debug, Parser)]
#[command(name = "inventory", about = "Inventory management dashboard")]
struct Cli {
    /// Backend origin; overrides INVENTORY_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds; overrides INVENTORY_TIMEOUT_SECS
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the product table and inventory statistics
    List {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
        /// Category id, or "all"
        #[arg(long, default_value = CategoryFilter::ALL)]
        category: String,
        /// name | price | stock
        #[arg(long, default_value = "name")]
        sort: SortKey,
    },
    /// Create a product
    Add(AddArgs),
    /// Set a product's availability
    Toggle {
        id: String,
        #[arg(action = clap::ArgAction::Set)]
        available: bool,
    },
    /// Delete a product
    Delete { id: String },
    /// List categories and their subcategories
    Categories,
    /// Create a category
    AddCategory { name: String },
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: String,
    #[arg(long, default_value = "0")]
    stock: String,
    /// Category id
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    subcategory: String,
    /// Size label; repeatable
    #[arg(long = "size")]
    sizes: Vec<String>,
    /// `color=image`, where image is a file path, URL or data URI; repeatable
    #[arg(long = "variant")]
    variants: Vec<String>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    qr_code: String,
    #[arg(long, default_value = "")]
    barcode: String,
    /// Create the product as out of stock
    #[arg(long)]
    unavailable: bool,
    /// Do not require subcategory and variants
    #[arg(long)]
    simple: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logger(Some(&cli.log_level));

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }

    let policy = match &cli.command {
        Command::Add(args) if args.simple => VariantPolicy::Optional,
        _ => VariantPolicy::Required,
    };

    let client = HttpClient::new(&config).context("building HTTP client")?;
    let mut dashboard = Dashboard::new(client).with_policy(policy);
    if let Err(e) = dashboard.load().await {
        // Without a product set there is nothing to show or act on
        if dashboard.store().last_updated().is_none() {
            return Err(e).with_context(|| format!("loading inventory from {}", config.api_root()));
        }
        tracing::warn!(error = %e, "Categories unavailable, showing products without names");
        eprintln!("warning: categories unavailable: {e}");
    }

    match cli.command {
        Command::List {
            search,
            category,
            sort,
        } => {
            dashboard.set_search(search);
            dashboard.set_category_filter(CategoryFilter::from(category.as_str()));
            dashboard.set_sort(sort);
            print_dashboard(&dashboard);
        }
        Command::Add(args) => add_product(&mut dashboard, args).await?,
        Command::Toggle { id, available } => {
            dashboard.toggle_availability(&id, available).await?;
            println!("{id}: {}", status_label(available));
        }
        Command::Delete { id } => {
            dashboard.delete(&id).await?;
            println!("Deleted {id}");
        }
        Command::Categories => {
            for category in dashboard.store().categories() {
                let subs: Vec<&str> = category.subcategory_names().collect();
                println!("{}  {}  [{}]", category.id, category.name, subs.join(", "));
            }
        }
        Command::AddCategory { name } => match dashboard.add_category(&name).await? {
            Some(category) => println!("Created category {} ({})", category.name, category.id),
            None => bail!("category name must not be empty"),
        },
    }

    Ok(())
}

async fn add_product(dashboard: &mut Dashboard<HttpClient>, args: AddArgs) -> Result<()> {
    dashboard.edit(DraftAction::SetName(args.name));
    dashboard.edit(DraftAction::SetPrice(parse_price_input(&args.price)));
    dashboard.edit(DraftAction::SetStock(parse_stock_input(&args.stock)));
    dashboard.edit(DraftAction::SetAvailability(!args.unavailable));
    dashboard.edit(DraftAction::SetCategory(args.category));
    dashboard.edit(DraftAction::SetSubcategory(args.subcategory));
    dashboard.edit(DraftAction::SetDescription(args.description));
    dashboard.edit(DraftAction::SetQrCode(args.qr_code));
    dashboard.edit(DraftAction::SetBarcode(args.barcode));

    for size in args.sizes {
        if !STANDARD_SIZES.contains(&size.as_str()) {
            tracing::info!(%size, "Non-standard size label");
        }
        dashboard.edit(DraftAction::SetPendingSize(size));
        dashboard.edit(DraftAction::AddSize);
    }

    for spec in args.variants {
        let Some((color, image)) = spec.split_once('=') else {
            bail!("variant must look like color=image, got {spec:?}");
        };
        let image = if is_image_reference(image) {
            image.to_string()
        } else {
            encode_image_file(image)
                .await
                .with_context(|| format!("reading image {image}"))?
        };
        dashboard.edit(DraftAction::SetPendingColor(color.to_string()));
        dashboard.edit(DraftAction::SetPendingImage(image));
        dashboard.edit(DraftAction::AddVariant);
    }

    match dashboard.submit().await {
        Ok(id) => {
            println!("Created product {}", id.as_deref().unwrap_or("(id pending)"));
            Ok(())
        }
        Err(ClientError::Rejected(report)) => {
            for field in &report.missing {
                eprintln!("  - {field}");
            }
            bail!("product not submitted")
        }
        Err(e) => Err(e.into()),
    }
}

fn status_label(available: bool) -> &'static str {
    if available { "In Stock" } else { "Out of Stock" }
}

fn or_na(values: &[&str]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

fn print_product(p: &Product) {
    let sizes: Vec<&str> = p.sizes.iter().map(String::as_str).collect();
    let image = p
        .primary_image()
        .map(|img| {
            if img.starts_with("data:") {
                "(embedded)".to_string()
            } else {
                img.to_string()
            }
        })
        .unwrap_or_else(|| placeholder_image(&p.name));

    println!(
        "{:<26} {:<24} {:<14} {:<12} {:<16} {:>6} {:>10.2}  {}",
        p.id,
        p.name,
        p.category.name,
        or_na(&sizes),
        or_na(&p.colors()),
        p.stock,
        p.price,
        status_label(p.availability),
    );
    if !p.qr_code.is_empty() || !p.barcode.is_empty() {
        println!("{:<26} QR {}  |  Barcode {}", "", p.qr_code, p.barcode);
    }
    println!("{:<26} Image {}", "", image);
}

fn print_dashboard(dashboard: &Dashboard<HttpClient>) {
    let view = dashboard.view();
    let stats = view.stats;

    println!("Inventory Management");
    println!(
        "Total Products: {} ({} available)   Available Items: {} ({} out of stock)   Total Value: ${}",
        stats.total,
        stats.available,
        stats.available,
        stats.out_of_stock(),
        stats.formatted_total_value()
    );
    println!();

    if view.visible.is_empty() {
        println!("No products found");
    } else {
        println!(
            "{:<26} {:<24} {:<14} {:<12} {:<16} {:>6} {:>10}  {}",
            "ID", "Product", "Category", "Sizes", "Colors", "Stock", "Price", "Status"
        );
        for product in &view.visible {
            print_product(product);
        }
    }

    println!();
    match dashboard.store().last_updated() {
        Some(at) => println!("Last updated: {}", at.to_rfc2822()),
        None => println!("Last updated: never"),
    }
}
