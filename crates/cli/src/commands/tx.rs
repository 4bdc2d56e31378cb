//! Transaction command.

use super::{load_wallet, open_blockchain};
use crate::config::NodeConfig;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Args)]
pub struct TxArgs {
    #[command(subcommand)]
    command: TxCommand,
}

#[derive(Subcommand)]
enum TxCommand {
    /// Sign a transfer with the wallet and add it to the pending pool
    Send {
        /// Recipient identity (hex public key)
        #[arg(short, long)]
        to: String,

        /// Amount to send
        #[arg(short, long)]
        amount: f64,
    },
    /// List pending transactions
    Pending,
}

pub fn run(args: TxArgs, config: &NodeConfig) -> Result<()> {
    match args.command {
        TxCommand::Send { to, amount } => send(config, &to, amount),
        TxCommand::Pending => list_pending(config),
    }
}

fn send(config: &NodeConfig, to: &str, amount: f64) -> Result<()> {
    let wallet = load_wallet(config)?;
    let sender = wallet.public_key().context("Wallet has no keys")?;
    let signature = wallet.sign_transaction(&sender, to, amount)?;

    let mut blockchain = open_blockchain(config, Some(sender.clone()));
    blockchain
        .add_transaction(to, &sender, &signature, amount)
        .context("Transaction rejected")?;

    println!(
        "{}  Added transaction of {} to {}",
        "✓".green().bold(),
        format!("{amount:.2}").bright_cyan(),
        to.bright_yellow()
    );
    println!(
        "    Pending: {}",
        blockchain.open_transactions().len().to_string().bright_cyan()
    );

    Ok(())
}

fn list_pending(config: &NodeConfig) -> Result<()> {
    let blockchain = open_blockchain(config, None);
    let pending = blockchain.open_transactions();

    println!();
    println!("{}", "Pending Transactions:".bold().cyan());
    println!();

    if pending.is_empty() {
        println!("  {}", "None".bright_black());
    }
    for tx in pending {
        println!(
            "  {} -> {} {}",
            tx.sender.bright_yellow(),
            tx.recipient.bright_yellow(),
            format!("{:.2}", tx.amount).bright_cyan()
        );
    }

    println!();
    Ok(())
}
