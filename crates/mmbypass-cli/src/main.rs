use clap::{Args, Parser, Subcommand};
use mmbypass_client::{CatalogClient, QueryBuilder};
use mmbypass_core::{PriceRange, SearchRequest, SortOrder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mmbypass-cli")]
#[command(about = "Query the Megamarket catalog through the browser-impersonating client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Commands {
    /// Run a search and print the raw catalog response.
    Search(SearchArgs),
    /// Print the payload a search would send, without sending it.
    Payload(SearchArgs),
}

#[derive(Debug, Args, PartialEq, Eq)]
struct SearchArgs {
    /// Free-text query.
    query: String,

    /// 1-based page number.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Sort code, or one of `priceup`, `pricedown`, `newly`.
    #[arg(long, default_value = "0")]
    sort: SortOrder,

    /// Include products that are out of stock.
    #[arg(long)]
    show_not_available: bool,

    /// Lower price bound; requires `--price-max`.
    #[arg(long, requires = "price_max")]
    price_min: Option<u64>,

    /// Upper price bound; requires `--price-min`.
    #[arg(long, requires = "price_min")]
    price_max: Option<u64>,
}

impl SearchArgs {
    fn to_request(&self) -> anyhow::Result<SearchRequest> {
        let price_filter = match (self.price_min, self.price_max) {
            (Some(low), Some(high)) => Some(PriceRange::new(low, high)?),
            _ => None,
        };
        Ok(SearchRequest::new(
            self.query.clone(),
            self.page,
            self.sort,
            self.show_not_available,
            price_filter,
        )?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mmbypass_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let builder = QueryBuilder::new(config.auth_block()?);

    match cli.command {
        Commands::Search(args) => {
            let payload = builder.build(&args.to_request()?);
            let catalog =
                CatalogClient::browser(&config.upstream_origin, config.request_timeout_secs)?;
            tracing::info!(upstream = catalog.search_url(), "sending catalog search");
            let body = catalog.fetch(&payload).await?;
            println!("{body}");
        }
        Commands::Payload(args) => {
            let payload = builder.build(&args.to_request()?);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
