//! Interactive node menu.

use crate::commands::{block::write_block, open_blockchain};
use crate::config::NodeConfig;
use crate::wallet::Wallet;
use anyhow::Result;
use colored::Colorize;
use proofchain_chain::Blockchain;
use std::io::{BufRead, Write};
use tracing::debug;

/// A wallet plus the ledger it hosts.
pub struct Node {
    wallet: Wallet,
    blockchain: Blockchain,
    config: NodeConfig,
}

impl Node {
    /// Start a node, loading the configured key file when it is usable.
    pub fn new(config: NodeConfig) -> Self {
        let mut wallet = Wallet::new();
        if let Err(e) = wallet.load_keys(&config.wallet.key_file) {
            debug!(error = %e, "starting without wallet keys");
        }
        let blockchain = open_blockchain(&config, wallet.public_key());
        Self {
            wallet,
            blockchain,
            config,
        }
    }

    pub fn blockchain(&self) -> &Blockchain {
        &self.blockchain
    }

    /// Run the menu until `q`, end of input, or an invalid chain.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        loop {
            print_menu(out)?;
            let Some(choice) = prompt(&mut input, out, "Your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_transaction(&mut input, out)?,
                "2" => match self.blockchain.mine_block() {
                    Ok(block) => writeln!(
                        out,
                        "{}  Mined block #{}",
                        "✓".green().bold(),
                        block.index
                    )?,
                    Err(e) => {
                        debug!(error = %e, "mining failed");
                        writeln!(out, "{}", "Mining failed, check that you have a wallet".red())?;
                    }
                },
                "3" => {
                    for block in self.blockchain.chain() {
                        write_block(out, block)?;
                    }
                    writeln!(out, "{}", "-".repeat(20))?;
                }
                "4" => {
                    if self.blockchain.verify_open_transactions() {
                        writeln!(out, "{}", "All transactions are valid".green())?;
                    } else {
                        writeln!(out, "{}", "There are invalid transactions".red())?;
                    }
                }
                "5" => {
                    self.wallet.create_keys();
                    self.rebuild();
                }
                "6" => match self.wallet.load_keys(&self.config.wallet.key_file) {
                    Ok(()) => self.rebuild(),
                    Err(e) => writeln!(out, "{} {:#}", "Loading wallet failed:".red(), e)?,
                },
                "7" => match self.wallet.save_keys(&self.config.wallet.key_file) {
                    Ok(()) => writeln!(
                        out,
                        "{}  Saved to: {}",
                        "✓".green().bold(),
                        self.config.wallet.key_file.display()
                    )?,
                    Err(e) => writeln!(out, "{} {:#}", "Saving wallet failed:".red(), e)?,
                },
                "q" => break,
                _ => writeln!(out, "Input was invalid, please pick a value from the list!")?,
            }

            if !self.blockchain.verify_chain() {
                writeln!(out, "{}", "Invalid blockchain!".red().bold())?;
                break;
            }

            match self.blockchain.balance() {
                Some(balance) => writeln!(
                    out,
                    "Balance of {}: {}",
                    self.blockchain.hosting_node().unwrap_or_default().bright_yellow(),
                    format!("{balance:6.2}").bright_cyan()
                )?,
                None => writeln!(out, "{}", "No wallet loaded".bright_black())?,
            }
        }

        writeln!(out, "Done!")?;
        Ok(())
    }

    fn add_transaction<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        let Some(recipient) = prompt(input, out, "Enter the recipient of the transaction: ")?
        else {
            return Ok(());
        };
        let Some(amount) = prompt(input, out, "Your transaction amount please: ")? else {
            return Ok(());
        };
        let Ok(amount) = amount.parse::<f64>() else {
            writeln!(out, "{}", "Amount must be a number".red())?;
            return Ok(());
        };

        let Some(sender) = self.wallet.public_key() else {
            writeln!(out, "{}", "Transaction failed, create or load a wallet first".red())?;
            return Ok(());
        };
        let signature = self.wallet.sign_transaction(&sender, &recipient, amount)?;

        match self
            .blockchain
            .add_transaction(&recipient, &sender, &signature, amount)
        {
            Ok(()) => writeln!(out, "{}  Added transaction!", "✓".green().bold())?,
            Err(e) => writeln!(out, "{} {}", "Transaction failed:".red(), e)?,
        }
        for tx in self.blockchain.open_transactions() {
            writeln!(out, "  {} -> {} {:.2}", tx.sender, tx.recipient, tx.amount)?;
        }
        Ok(())
    }

    /// Reopen the ledger hosted by the current wallet identity.
    fn rebuild(&mut self) {
        self.blockchain = open_blockchain(&self.config, self.wallet.public_key());
    }
}

fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", "Please choose".bold().cyan())?;
    writeln!(out, "1: Add a new transaction value")?;
    writeln!(out, "2: Mine a new block")?;
    writeln!(out, "3: Output the blockchain blocks")?;
    writeln!(out, "4: Check transaction validity")?;
    writeln!(out, "5: Create wallet")?;
    writeln!(out, "6: Load wallet")?;
    writeln!(out, "7: Save keys")?;
    writeln!(out, "q: Quit")
}

/// Read one trimmed line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_config(dir: &Path) -> NodeConfig {
        NodeConfig::default().with_overrides(
            Some(dir.join("blockchain.txt")),
            Some(dir.join("wallet.json")),
        )
    }

    fn run_script(node: &mut Node, script: &str) -> String {
        let mut out = Vec::new();
        node.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_mine_without_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let mut node = Node::new(test_config(dir.path()));

        let output = run_script(&mut node, "2\nq\n");

        assert!(output.contains("Mining failed"));
        assert!(output.contains("No wallet loaded"));
        assert_eq!(node.blockchain().chain().len(), 1);
    }

    #[test]
    fn test_create_wallet_and_mine() {
        let dir = tempfile::tempdir().unwrap();
        let mut node = Node::new(test_config(dir.path()));

        let output = run_script(&mut node, "5\n2\nq\n");

        assert!(output.contains("Mined block #1"));
        assert!(output.ends_with("Done!\n"));
        assert_eq!(node.blockchain().chain().len(), 2);
        assert_eq!(node.blockchain().balance(), Some(10.0));
        assert!(dir.path().join("blockchain.txt").exists());
    }

    #[test]
    fn test_transfer_and_saved_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let mut node = Node::new(config.clone());

        run_script(&mut node, "5\n7\n2\n1\nbob\n4\n2\nq\n");
        assert_eq!(node.blockchain().balance_of("bob"), 4.0);
        assert_eq!(node.blockchain().balance(), Some(16.0));

        // A fresh node picks up the saved key file and ledger.
        let restored = Node::new(config);
        assert_eq!(restored.blockchain().chain().len(), 3);
        assert_eq!(restored.blockchain().balance(), Some(16.0));
    }

    #[test]
    fn test_overspend_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut node = Node::new(test_config(dir.path()));

        let output = run_script(&mut node, "5\n1\nbob\n5\nq\n");

        assert!(output.contains("Transaction failed"));
        assert!(node.blockchain().open_transactions().is_empty());
    }

    #[test]
    fn test_unknown_input_and_eof() {
        let dir = tempfile::tempdir().unwrap();
        let mut node = Node::new(test_config(dir.path()));

        let output = run_script(&mut node, "x\n");

        assert!(output.contains("Input was invalid"));
        assert!(output.ends_with("Done!\n"));
    }
}
