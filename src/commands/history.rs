//! History command - list or clear recent searches

use crate::{ScatchError, cli::HistoryCommands, history::HistoryStore, output};

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the history command
///
/// # Errors
/// Returns an error if the history file cannot be read or written.
pub fn execute(store: &HistoryStore, command: HistoryCommands, quiet: bool) -> Result<()> {
    match command {
        HistoryCommands::List => {
            let history = store.load()?;
            if history.is_empty() {
                if !quiet {
                    println!("No recent searches.");
                }
                return Ok(());
            }
            for (i, entry) in history.entries().iter().enumerate() {
                if quiet {
                    println!("{entry}");
                } else {
                    println!("{:>2}. {entry}", i + 1);
                }
            }
        }
        HistoryCommands::Clear => {
            store.clear()?;
            if !quiet {
                println!("{}", output::success("Search history cleared"));
            }
        }
    }
    Ok(())
}
