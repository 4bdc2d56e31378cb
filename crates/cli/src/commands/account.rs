//! Account management command.

use super::{load_wallet, open_blockchain};
use crate::config::NodeConfig;
use crate::wallet::Wallet;
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    command: AccountCommand,
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Generate a new keypair and save it to the key file
    New {
        /// Overwrite an existing key file
        #[arg(short, long)]
        force: bool,
    },
    /// Show the wallet's public key
    Show,
    /// Check a participant's balance (defaults to this wallet)
    Balance {
        /// Participant identity (hex public key)
        participant: Option<String>,
    },
}

pub fn run(args: AccountArgs, config: &NodeConfig) -> Result<()> {
    match args.command {
        AccountCommand::New { force } => new_keypair(config, force),
        AccountCommand::Show => show_wallet(config),
        AccountCommand::Balance { participant } => check_balance(config, participant),
    }
}

fn new_keypair(config: &NodeConfig, force: bool) -> Result<()> {
    let key_file = &config.wallet.key_file;
    if key_file.exists() && !force {
        bail!(
            "Key file already exists: {}. Pass --force to replace it.",
            key_file.display()
        );
    }

    let mut wallet = Wallet::new();
    wallet.create_keys();
    wallet.save_keys(key_file)?;

    println!("{}", "Generated new keypair:".bold().cyan());
    println!();
    println!(
        "  Public Key: {}",
        wallet.public_key().unwrap_or_default().bright_yellow()
    );
    println!();
    println!(
        "{}  Saved to: {}",
        "✓".green().bold(),
        key_file.display().to_string().bright_black()
    );
    println!();
    println!("{}", "Keep your private key safe!".yellow().bold());

    Ok(())
}

fn show_wallet(config: &NodeConfig) -> Result<()> {
    let wallet = load_wallet(config)?;

    println!();
    println!(
        "  Public Key: {}",
        wallet.public_key().unwrap_or_default().bright_yellow()
    );
    println!(
        "  Key File:   {}",
        config.wallet.key_file.display().to_string().bright_black()
    );
    println!();

    Ok(())
}

fn check_balance(config: &NodeConfig, participant: Option<String>) -> Result<()> {
    let participant = match participant {
        Some(p) => p,
        None => match load_wallet(config)?.public_key() {
            Some(p) => p,
            None => bail!("Wallet has no keys"),
        },
    };

    let blockchain = open_blockchain(config, None);
    let balance = blockchain.balance_of(&participant);

    println!();
    println!("  Participant: {}", participant.bright_yellow());
    println!("  Balance:     {}", format!("{balance:.2}").bright_cyan());
    println!();

    Ok(())
}
