pub(crate) mod cli;

use anyhow::Result;

use crate::config::Config;
use crate::db::Database;
use crate::ledger::Ledger;

/// Open the store, run the command given on the command line and print its output.
pub(crate) fn as_cli(args: &[String], config: Config) -> Result<()> {
    let db = Database::open(&config.db_path()?)?;
    let mut session = cli::Session {
        ledger: Ledger::load(db)?,
        config,
        today: chrono::Local::now().date_naive(),
    };
    let output = cli::execute(args, &mut session)?;
    print!("{output}");
    Ok(())
}
