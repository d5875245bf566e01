use clap::Parser;
use product_search::cli::{Cli, Commands};
use product_search::client::VisionClient;
use product_search::config::{Config, ACCESS_TOKEN_ENV};
use product_search::context::CallContext;
use product_search::error::Result;
use product_search::logging;
use product_search::operations::{self, SimilarProductsQuery};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::setup_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    let timeout = match cli.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.timeout(),
    };
    let ctx = CallContext::new(timeout);

    // Ctrl-C aborts the in-flight remote call
    let token = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            token.cancel();
        }
    });

    let mut out = std::io::stdout();

    match cli.command {
        Commands::DeleteProduct {
            project_id,
            location,
            product_id,
        } => {
            let client = VisionClient::from_config(&config)?;
            operations::delete_product(&client, &ctx, &mut out, &project_id, &location, &product_id)
                .await?;
        }

        Commands::DeleteReferenceImage {
            project_id,
            location,
            product_id,
            reference_image_id,
        } => {
            let client = VisionClient::from_config(&config)?;
            operations::delete_reference_image(
                &client,
                &ctx,
                &mut out,
                &project_id,
                &location,
                &product_id,
                &reference_image_id,
            )
            .await?;
        }

        Commands::Search {
            project_id,
            location,
            product_set_id,
            product_category,
            file,
            filter,
        } => {
            let client = VisionClient::from_config(&config)?;
            let query = SimilarProductsQuery {
                project_id: &project_id,
                location: &location,
                product_set_id: &product_set_id,
                product_category: &product_category,
                filter: &filter,
            };
            operations::search_similar_products(&client, &ctx, &mut out, &query, &file).await?;
        }

        Commands::ListProductSets {
            project_id,
            location,
        } => {
            let client = VisionClient::from_config(&config)?;
            operations::list_product_sets(&client, &ctx, &mut out, &project_id, &location).await?;
        }

        Commands::Config {
            set_access_token,
            set_endpoint,
            show,
        } => {
            if let Some(token) = set_access_token {
                config.set_access_token(token)?;
                println!("✔ Access token saved");
            }

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ Endpoint saved");
            }

            if show {
                let env_token = std::env::var(ACCESS_TOKEN_ENV).is_ok();
                println!("Settings:");
                println!("  config file: {}", Config::config_path()?.display());
                println!("  endpoint: {}", config.endpoint);
                println!(
                    "  quota project: {}",
                    config.quota_project.as_deref().unwrap_or("(none)")
                );
                println!("  page size: {}", config.page_size);
                println!("  timeout: {}s", config.timeout_seconds);
                println!(
                    "  access token: {}",
                    if env_token {
                        "set (environment)"
                    } else if config.access_token.is_some() {
                        "set (config file)"
                    } else {
                        "not set"
                    }
                );
            }
        }
    }

    Ok(())
}
