//! Contains the deriver CLI.

use crate::{error::DeriverResult, flags::ConfigArgs, input::read_rpc};
use clap::Parser;
use facet_cli::{LogArgs, LogConfig};
use facet_derive::{DerivedTransaction, EnvelopeDecoder, InboxDeriver, RpcBlock, RpcReceipt};
use std::{
    io::{self, Write},
    path::PathBuf,
};

/// The deriver CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Logging arguments.
    #[command(flatten)]
    pub(crate) log_args: LogArgs,
    /// Derivation config arguments.
    #[command(flatten)]
    pub(crate) config_args: ConfigArgs,
    /// Path to the block, as returned by `eth_getBlockByNumber` with full transactions.
    #[arg(long, short = 'b')]
    pub(crate) block: PathBuf,
    /// Path to the block receipts, as returned by `eth_getBlockReceipts`.
    #[arg(long, short = 'r')]
    pub(crate) receipts: PathBuf,
}

impl Cli {
    /// Runs the deriver binary.
    pub(crate) fn run(self) -> DeriverResult<()> {
        LogConfig::new(&self.log_args).init_tracing_subscriber(None)?;

        let derived = self.derive()?;
        write_derived(io::stdout().lock(), &derived)
    }

    /// Loads the inputs and derives their transactions.
    pub(crate) fn derive(&self) -> DeriverResult<Vec<DerivedTransaction>> {
        let deriver = InboxDeriver::new(self.config_args.resolve()?, EnvelopeDecoder::default());
        debug!(target: "deriver", config = ?deriver.config(), "Resolved derivation config");

        let block = read_rpc::<RpcBlock>(&self.block)?;
        let receipts = read_rpc::<Vec<RpcReceipt>>(&self.receipts)?;

        Ok(deriver.derive_block(&block, &receipts)?)
    }
}

/// Writes each transaction to `out` as one JSON object per line.
fn write_derived<W: Write>(mut out: W, derived: &[DerivedTransaction]) -> DeriverResult<()> {
    for tx in derived {
        serde_json::to_writer(&mut out, tx)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
