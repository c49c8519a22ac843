use clap::Parser;
use config::{Cli, Command};
use shell::Shell;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

mod compute;
mod config;
mod data;
mod read;
mod shell;
mod write;

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level)?)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(store = %cli.config.store.display(), report = %cli.config.report.display());

    let stdin = std::io::stdin();
    let mut shell = Shell::new(&cli.config, stdin.lock(), std::io::stdout());
    execute(&mut shell, cli.command)
}

/// Runs one subcommand, or the menu when there is none. Failures of a single
/// subcommand end up in the exit status.
fn execute<R: BufRead, W: Write>(
    shell: &mut Shell<'_, R, W>,
    command: Option<Command>,
) -> Result<(), anyhow::Error> {
    match command {
        None => shell.run()?,
        Some(Command::Add {
            amount,
            category,
            date,
        }) => shell.add(amount, category, date)?,
        Some(Command::List) => shell.list()?,
        Some(Command::Analyze) => shell.analyze()?,
        Some(Command::Top) => shell.top()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{Command, Config},
        execute,
        shell::Shell,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn add_to_unwritable_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: dir.path().join("nonexistent").join("x.csv"),
            report: dir.path().join("analysis.json"),
        };
        let mut output = Vec::new();
        let mut shell = Shell::new(&config, &b""[..], &mut output);
        let add = Command::Add {
            amount: dec!(5),
            category: "Food".into(),
            date: None,
        };
        assert!(execute(&mut shell, Some(add)).is_err());
        assert!(!config.store.exists());
    }

    #[test]
    fn malformed_store_fails_every_reader() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: dir.path().join("expenses.csv"),
            report: dir.path().join("analysis.json"),
        };
        std::fs::write(&config.store, "ID,Amount,Category,Date\n1,x,Food,2024-01-01\n").unwrap();
        let mut output = Vec::new();
        let mut shell = Shell::new(&config, &b""[..], &mut output);
        for command in [Command::List, Command::Analyze, Command::Top] {
            assert!(execute(&mut shell, Some(command)).is_err());
        }
    }

    #[test]
    fn one_shot_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: dir.path().join("expenses.csv"),
            report: dir.path().join("analysis.json"),
        };
        let mut output = Vec::new();
        let mut shell = Shell::new(&config, &b""[..], &mut output);
        let add = Command::Add {
            amount: dec!(12.5),
            category: "Food".into(),
            date: None,
        };
        execute(&mut shell, Some(add)).unwrap();
        execute(&mut shell, Some(Command::Analyze)).unwrap();
        execute(&mut shell, Some(Command::Top)).unwrap();
        execute(&mut shell, None).unwrap();
        drop(shell);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Expense 12.5 added successfully!"));
        assert!(output.contains("Total Spent: 12.5"));
        assert!(output.contains("Top Expense: #"));
        assert_eq!(
            std::fs::read_to_string(&config.report).unwrap(),
            r#"{"Food":12.5}"#
        );
    }
}
