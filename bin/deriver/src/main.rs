//! Derives Facet transactions from a base-chain block and its receipts.
//!
//! ## Usage
//!
//! ```sh
//! facet-deriver --block block.json --receipts receipts.json --inbox.fee 1000000000000000
//! ```
//!
//! The inputs are the results of `eth_getBlockByNumber` (with full transactions) and
//! `eth_getBlockReceipts`, either bare or wrapped in their JSON-RPC response. Each derived
//! transaction is printed to stdout as one JSON object per line.

#[macro_use]
extern crate tracing;

use clap::Parser;

mod cli;
mod error;
mod flags;
mod input;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()?;
    Ok(())
}
