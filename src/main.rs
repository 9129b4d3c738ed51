//! Product Extractor command line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{ArgGroup, Parser};

use product_extractor::domain::{Backend, ProductInput, ProductRecord, ReviewQuota};
use product_extractor::infrastructure::config::{ConfigManager, defaults};
use product_extractor::infrastructure::init_logging_with_config;
use product_extractor::{ExtractionRequest, ExtractionService, export_to_path};

#[derive(Parser)]
#[command(
    name = "product-extractor",
    about = "Extract title, features, technical details and reviews of one product listing",
    version
)]
#[command(group(ArgGroup::new("input").required(true).args(["asin", "name", "url"])))]
struct Cli {
    /// Product identifier (ASIN).
    #[arg(long)]
    asin: Option<String>,

    /// Product name, resolved through a site search.
    #[arg(long)]
    name: Option<String>,

    /// Product page address.
    #[arg(long)]
    url: Option<String>,

    /// Storefront domain (fr, com, de, co.uk...).
    #[arg(long, default_value = defaults::DOMAIN)]
    domain: String,

    /// Data backend: scrape or api.
    #[arg(long, default_value = "scrape")]
    backend: Backend,

    /// API key for the api backend.
    #[arg(long, env = defaults::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Skip review collection.
    #[arg(long)]
    no_reviews: bool,

    /// 5-star reviews to collect.
    #[arg(long, default_value_t = defaults::REVIEWS_PER_TIER, value_parser = review_count)]
    stars5: u32,

    /// 4-star reviews to collect.
    #[arg(long, default_value_t = defaults::REVIEWS_PER_TIER, value_parser = review_count)]
    stars4: u32,

    /// 3-star reviews to collect.
    #[arg(long, default_value_t = defaults::REVIEWS_PER_TIER, value_parser = review_count)]
    stars3: u32,

    /// 2-star reviews to collect.
    #[arg(long, default_value_t = defaults::REVIEWS_PER_TIER, value_parser = review_count)]
    stars2: u32,

    /// 1-star reviews to collect.
    #[arg(long, default_value_t = defaults::REVIEWS_PER_TIER, value_parser = review_count)]
    stars1: u32,

    /// Configuration file; defaults to the per-user config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the record as a one-row CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the record as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn review_count(raw: &str) -> Result<u32, String> {
    let count: u32 = raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    if count > defaults::MAX_REVIEWS_PER_TIER {
        return Err(format!(
            "at most {} reviews per rating",
            defaults::MAX_REVIEWS_PER_TIER
        ));
    }
    Ok(count)
}

impl Cli {
    fn input(&self) -> Result<ProductInput> {
        match (&self.asin, &self.name, &self.url) {
            (Some(asin), _, _) => Ok(ProductInput::RawId(asin.clone())),
            (_, Some(name), _) => Ok(ProductInput::FreeText(name.clone())),
            (_, _, Some(url)) => Ok(ProductInput::Address(url.clone())),
            _ => bail!("one of --asin, --name or --url is required"),
        }
    }

    fn quota(&self) -> Result<ReviewQuota> {
        ReviewQuota::from_pairs([
            (5, self.stars5),
            (4, self.stars4),
            (3, self.stars3),
            (2, self.stars2),
            (1, self.stars1),
        ])
        .map_err(anyhow::Error::msg)
    }

    fn request(&self) -> Result<ExtractionRequest> {
        let mut request = ExtractionRequest::new(self.input()?, self.domain.clone())
            .with_backend(self.backend)
            .with_quota(self.quota()?);
        if let Some(key) = &self.api_key {
            request = request.with_api_credential(key.clone());
        }
        if self.no_reviews {
            request = request.without_reviews();
        }
        Ok(request)
    }
}

fn print_record(record: &ProductRecord) {
    println!("Title");
    println!("  {}", record.title);

    println!("\nFeatures");
    for feature in &record.features {
        println!("  - {feature}");
    }

    println!("\nTechnical details");
    for (name, value) in record.technical_details.iter() {
        println!("  {name} : {value}");
    }

    println!("\nCustomer reviews");
    for (i, review) in record.reviews.iter().enumerate() {
        println!("  {}. {}", i + 1, review);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = manager.load_config().await?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging_with_config(&config.logging)?;

    let request = cli.request()?;
    let service = ExtractionService::new(config)?;
    let record = service.extract(&request).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }

    if let Some(path) = &cli.csv {
        export_to_path(&record, path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
