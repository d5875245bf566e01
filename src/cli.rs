use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "product-search")]
#[command(about = "Cloud Vision product search client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Deadline in seconds for the whole command (0 = none, default from config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Delete a product
    DeleteProduct {
        project_id: String,
        location: String,
        product_id: String,
    },

    /// Delete a reference image from a product
    DeleteReferenceImage {
        project_id: String,
        location: String,
        product_id: String,
        reference_image_id: String,
    },

    /// Search a product set for products similar to an image
    Search {
        project_id: String,
        location: String,
        product_set_id: String,

        /// Product category, e.g. apparel-v2, homegoods-v2, toys-v2
        product_category: String,

        /// Local image file
        file: PathBuf,

        /// Label filter expression, e.g. "style=womens AND color=red"
        #[arg(default_value = "")]
        filter: String,
    },

    /// List product sets in a location
    ListProductSets { project_id: String, location: String },

    /// Show or edit settings
    Config {
        /// Store an OAuth access token
        #[arg(long)]
        set_access_token: Option<String>,

        /// Override the service endpoint
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Print current settings
        #[arg(long)]
        show: bool,
    },
}
