use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker",
    long_about = "Records expenses in a CSV file and reports spending per category. \
                  Without a subcommand, starts the interactive menu."
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Log filter (e.g. `info`, `expenses=debug`)
    #[arg(long, env = "EXPENSES_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where expenses and reports live. Passed down to every store operation.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// Expense store (CSV)
    #[arg(long, env = "EXPENSES_STORE", default_value = "expenses.csv")]
    pub store: PathBuf,

    /// Analysis report (JSON), replaced on every analysis
    #[arg(long, env = "EXPENSES_REPORT", default_value = "analysis.json")]
    pub report: PathBuf,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Record a new expense
    Add {
        amount: Decimal,
        category: String,
        /// Expense date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// List all expenses
    #[command(alias = "ls")]
    List,
    /// Print totals per category and write the report
    Analyze,
    /// Show the biggest expense
    Top,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, Config};
    use chrono::NaiveDate;
    use clap::Parser;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    #[test]
    fn explicit_paths() {
        let cli = Cli::try_parse_from([
            "expenses",
            "--store",
            "/tmp/a.csv",
            "--report",
            "/tmp/a.json",
            "list",
        ])
        .unwrap();
        assert_eq!(
            cli.config,
            Config {
                store: PathBuf::from("/tmp/a.csv"),
                report: PathBuf::from("/tmp/a.json"),
            }
        );
        assert_eq!(cli.command, Some(Command::List));
    }

    #[test]
    fn add_command() {
        let cli =
            Cli::try_parse_from(["expenses", "add", "12.5", "Food, Snacks", "-d", "2024-04-01"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Add {
                amount: dec!(12.5),
                category: "Food, Snacks".into(),
                date: NaiveDate::from_ymd_opt(2024, 4, 1),
            })
        );
    }

    #[test]
    fn bad_amount_rejected() {
        assert!(Cli::try_parse_from(["expenses", "add", "lots", "Food"]).is_err());
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["expenses"]).unwrap();
        assert_eq!(cli.command, None);
    }
}
