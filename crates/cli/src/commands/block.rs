//! Block operations command.

use super::{load_wallet, open_blockchain};
use crate::config::NodeConfig;
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use proofchain_core::Block;
use std::io::{self, Write};

#[derive(Args)]
pub struct BlockArgs {
    #[command(subcommand)]
    command: BlockCommand,
}

#[derive(Subcommand)]
enum BlockCommand {
    /// Mine pending transactions into a new block
    Mine,
    /// List recent blocks
    List {
        /// Number of blocks to show
        #[arg(short, long, default_value = "10")]
        count: usize,
    },
    /// Show detailed block information
    Info {
        /// Block index
        index: usize,
    },
    /// Verify the chain and the pending transactions
    Verify,
}

pub fn run(args: BlockArgs, config: &NodeConfig) -> Result<()> {
    match args.command {
        BlockCommand::Mine => mine(config),
        BlockCommand::List { count } => list_blocks(config, count),
        BlockCommand::Info { index } => show_block_info(config, index),
        BlockCommand::Verify => verify(config),
    }
}

fn mine(config: &NodeConfig) -> Result<()> {
    let wallet = load_wallet(config)?;
    let mut blockchain = open_blockchain(config, wallet.public_key());

    println!("{}", "Mining block...".bold().cyan());
    let block = blockchain.mine_block().context("Mining failed")?;

    println!();
    println!("{}  Mined block #{}", "✓".green().bold(), block.index);
    println!("    Hash:         {}", block.hash().to_hex().bright_yellow());
    println!("    Proof:        {}", block.proof.to_string().bright_cyan());
    println!(
        "    Transactions: {}",
        block.tx_count().to_string().bright_cyan()
    );
    if let Some(balance) = blockchain.balance() {
        println!("    Balance:      {}", format!("{balance:.2}").bright_cyan());
    }
    println!();

    Ok(())
}

fn list_blocks(config: &NodeConfig, count: usize) -> Result<()> {
    let blockchain = open_blockchain(config, None);
    let chain = blockchain.chain();
    let stats = blockchain.stats();

    println!();
    println!("{}", "Chain:".bold().cyan());
    println!("  Height:  {}", stats.height.to_string().bright_cyan());
    println!("  Latest:  {}", stats.latest_block_hash.to_hex().bright_yellow());
    println!(
        "  Pending: {} ({} total)",
        stats.pending_transactions.to_string().bright_cyan(),
        format!("{:.2}", stats.pending_value).bright_cyan()
    );
    println!();
    println!("{}", "Recent Blocks:".bold().cyan());
    println!();

    for block in chain.iter().rev().take(count) {
        println!(
            "  {} {} {}",
            format!("#{}", block.index).bright_black(),
            block.hash().to_hex()[..16].bright_yellow(),
            format!("({} txs)", block.tx_count()).bright_black()
        );
    }

    println!();
    Ok(())
}

fn show_block_info(config: &NodeConfig, index: usize) -> Result<()> {
    let blockchain = open_blockchain(config, None);
    let block = blockchain.chain().get(index).context("Block not found")?;

    let mut out = io::stdout().lock();
    writeln!(out)?;
    write_block(&mut out, block)?;
    writeln!(out)?;
    Ok(())
}

fn verify(config: &NodeConfig) -> Result<()> {
    let blockchain = open_blockchain(config, None);

    if !blockchain.verify_chain() {
        bail!("Invalid blockchain");
    }
    println!(
        "{}  Chain is valid ({} blocks)",
        "✓".green().bold(),
        blockchain.chain().len()
    );

    if !blockchain.verify_open_transactions() {
        bail!("There are invalid pending transactions");
    }
    println!(
        "{}  All {} pending transactions are valid",
        "✓".green().bold(),
        blockchain.open_transactions().len()
    );

    Ok(())
}

/// Write a block with its transactions.
pub fn write_block<W: Write>(out: &mut W, block: &Block) -> io::Result<()> {
    writeln!(out, "{}", format!("Block #{}", block.index).bold().cyan())?;
    writeln!(out, "  Hash:          {}", block.hash().to_hex().bright_yellow())?;
    writeln!(
        out,
        "  Previous Hash: {}",
        if block.previous_hash.is_empty() {
            "(genesis)".bright_black()
        } else {
            block.previous_hash.bright_black()
        }
    )?;
    writeln!(out, "  Proof:         {}", block.proof.to_string().bright_cyan())?;
    writeln!(out, "  Timestamp:     {}", block.timestamp.to_string().bright_black())?;
    writeln!(out, "  Transactions:  {}", block.tx_count().to_string().bright_cyan())?;

    for tx in &block.transactions {
        let kind = if tx.is_reward() { "reward" } else { "transfer" };
        writeln!(
            out,
            "    {} {} -> {} {}",
            format!("[{kind}]").bright_black(),
            tx.sender.bright_yellow(),
            tx.recipient.bright_yellow(),
            format!("{:.2}", tx.amount).bright_cyan()
        )?;
    }
    Ok(())
}
