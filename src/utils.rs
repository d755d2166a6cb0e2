//! Utils

use clap::Parser;

/// Arguments for the order demos
#[derive(Debug, Parser)]
pub struct DemoOrderArgs {
    /// Menu fixture set to load
    #[clap(short, long, default_value = "diner")]
    pub menu: String,

    /// Table number for the order
    #[clap(short, long)]
    pub table: Option<u32>,

    /// Customer name for the order
    #[clap(short, long)]
    pub customer: Option<String>,

    /// Amount tendered, e.g. "20.00 USD"; omit to leave the order unpaid
    #[clap(short, long)]
    pub pay: Option<String>,
}
