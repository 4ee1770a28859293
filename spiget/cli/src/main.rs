//! Spiget CLI - query the Spiget API from the command line

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use spiget_lib::{
    ApiError, ApiResponse, ClientConfig, ListOptions, RequestContext, ResourceSearchOptions,
    SearchField, Sort, SpigetClient,
};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spiget", version)]
#[command(about = "Query Spigot resources, authors and categories through the Spiget API", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv); -v also prints response metadata
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a single resource
    Resource {
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// List resources
    Resources {
        /// Only free resources
        #[arg(long, conflicts_with_all = ["new", "premium"])]
        free: bool,

        /// Only recently added resources
        #[arg(long, conflicts_with = "premium")]
        new: bool,

        /// Only premium resources
        #[arg(long)]
        premium: bool,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Search resources by name or tag
    Search {
        #[arg(value_name = "QUERY")]
        query: String,

        /// Field to match against (name, tag)
        #[arg(long)]
        field: Option<SearchField>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List authors
    Authors {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Show a single author
    Author {
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// List categories
    Categories {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Show API and crawler status
    Status,

    /// List events a webhook can subscribe to
    WebhookEvents,

    /// Register a webhook and print its id and secret
    RegisterWebhook {
        #[arg(value_name = "URL")]
        url: String,

        #[arg(value_name = "EVENTS", required = true)]
        events: Vec<String>,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Page number
    #[arg(long)]
    page: Option<u32>,

    /// Items per page
    #[arg(long)]
    size: Option<u32>,

    /// Sort field; prefix with '-' for descending (e.g. -downloads)
    #[arg(long, allow_hyphen_values = true)]
    sort: Option<String>,
}

impl PageArgs {
    fn options(&self) -> Option<ListOptions> {
        let mut options = ListOptions::new();
        options.page = self.page;
        options.size = self.size;
        options.sort = self.sort.as_deref().map(parse_sort);
        (options != ListOptions::default()).then_some(options)
    }
}

fn parse_sort(raw: &str) -> Sort {
    match raw.strip_prefix('-') {
        Some(field) => Sort::descending(field),
        None => Sort::ascending(raw.strip_prefix('+').unwrap_or(raw)),
    }
}

/// Initialize tracing subscriber with appropriate filter and format.
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,spiget_lib=info,spiget=info".to_string(),
            2 => "info,spiget_lib=debug,spiget=debug".to_string(),
            _ => "debug,spiget_lib=trace,spiget=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Prints the value as JSON on stdout and, when verbose, the envelope
/// metadata on stderr.
fn emit<T: Serialize>(answer: &ApiResponse<T>, verbose: bool) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&answer.value)?);
    if verbose {
        let response = &answer.response;
        eprintln!("status: {}", response.status);
        if let Some(pagination) = &response.pagination {
            eprintln!("pagination: {}", serde_json::to_string(pagination)?);
        }
        if let Some(rate_limit) = &response.rate_limit {
            eprintln!("rate limit: {}", serde_json::to_string(rate_limit)?);
        }
    }
    Ok(())
}

async fn run(
    command: Commands,
    client: &SpigetClient,
    ctx: &RequestContext,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Resource { id } => {
            emit(&client.resources().get(ctx, id).await?, verbose)?;
        }
        Commands::Resources {
            free,
            new,
            premium,
            paging,
        } => {
            let options = paging.options();
            let resources = client.resources();
            let answer = if free {
                resources.list_free(ctx, options.as_ref()).await?
            } else if new {
                resources.list_new(ctx, options.as_ref()).await?
            } else if premium {
                resources.list_premium(ctx, options.as_ref()).await?
            } else {
                resources.list(ctx, options.as_ref()).await?
            };
            emit(&answer, verbose)?;
        }
        Commands::Search {
            query,
            field,
            paging,
        } => {
            let options = ResourceSearchOptions {
                field,
                list: paging.options().unwrap_or_default(),
            };
            emit(
                &client.search().resources(ctx, &query, Some(&options)).await?,
                verbose,
            )?;
        }
        Commands::Authors { paging } => {
            let options = paging.options();
            emit(&client.authors().list(ctx, options.as_ref()).await?, verbose)?;
        }
        Commands::Author { id } => {
            emit(&client.authors().get(ctx, id).await?, verbose)?;
        }
        Commands::Categories { paging } => {
            let options = paging.options();
            emit(&client.categories().list(ctx, options.as_ref()).await?, verbose)?;
        }
        Commands::Status => {
            emit(&client.status().get(ctx).await?, verbose)?;
        }
        Commands::WebhookEvents => {
            emit(&client.webhook().events(ctx).await?, verbose)?;
        }
        Commands::RegisterWebhook { url, events } => {
            emit(&client.webhook().register(ctx, &url, &events).await?, verbose)?;
        }
    }
    Ok(())
}

fn build_client() -> Result<SpigetClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.base(), "using Spiget API");
    Ok(SpigetClient::new(config)?)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    let client = match build_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let ctx = RequestContext::background();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    if let Err(e) = run(cli.command, &client, &ctx, cli.log_verbosity > 0).await {
        eprintln!("Error: {e}");
        let code = match e.downcast_ref::<ApiError>() {
            Some(api) if api.is_cancelled() => 130,
            _ => 1,
        };
        std::process::exit(code);
    }
}
