use crate::{
    compute::{top_expense, Analysis},
    config::Config,
    data::{Error, Expense},
    read::{read_all, read_into},
    write::{append_expense, write_analysis},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

const MENU: &str = "
1. Add Expense
2. View All Expenses
3. Analyze
4. Top Expense
5. Exit";

/// The interactive menu. Reads one line per answer from `input` and talks
/// back on `output`; failures are reported there and the loop carries on.
pub(crate) struct Shell<'a, R, W> {
    config: &'a Config,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(config: &'a Config, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
        }
    }

    /// Runs until "Exit" is chosen or the input runs dry.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };
            let (context, result) = match choice.trim() {
                "1" => {
                    let Some(amount) = self.prompt("Enter amount: ")? else {
                        return Ok(());
                    };
                    let amount = match parse_amount(&amount) {
                        Ok(amount) => amount,
                        Err(e) => {
                            tracing::warn!("{e}");
                            writeln!(self.output, "Invalid amount!")?;
                            continue;
                        }
                    };
                    let Some(category) = self.prompt("Enter category (Food, Travel, etc.): ")?
                    else {
                        return Ok(());
                    };
                    ("Error adding expense", self.add(amount, category, None))
                }
                "2" => ("Error reading expenses", self.list()),
                "3" => ("Error analyzing expenses", self.analyze()),
                "4" => ("Error reading expenses", self.top()),
                "5" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice! Try again.")?;
                    continue;
                }
            };
            if let Err(e) = result {
                tracing::error!("{context}: {e}");
                writeln!(self.output, "{context}: {e}")?;
            }
        }
    }

    /// Writes `question` and returns the answer without its line ending,
    /// `None` at end of input.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    pub fn add(
        &mut self,
        amount: Decimal,
        category: String,
        date: Option<NaiveDate>,
    ) -> Result<(), Error> {
        let expense = Expense::new(amount, category, date);
        append_expense(&self.config.store, &expense)?;
        writeln!(self.output, "Expense {} added successfully!", expense.amount)?;
        Ok(())
    }

    pub fn list(&mut self) -> Result<(), Error> {
        let expenses = read_all(&self.config.store)?;
        if expenses.is_empty() {
            writeln!(self.output, "No expense data found!")?;
        }
        for expense in &expenses {
            writeln!(self.output, "{expense}")?;
        }
        Ok(())
    }

    pub fn analyze(&mut self) -> Result<(), Error> {
        let mut analysis = Analysis::default();
        read_into(&self.config.store, &mut analysis)?;
        writeln!(self.output, "\n--- Expense Analysis ---")?;
        writeln!(self.output, "Total Spent: {}", analysis.grand_total)?;
        for (category, total) in &analysis.totals {
            writeln!(self.output, "{category}: {total}")?;
        }
        write_analysis(&self.config.report, &analysis)
    }

    pub fn top(&mut self) -> Result<(), Error> {
        let expenses = read_all(&self.config.store)?;
        match top_expense(&expenses) {
            Some(top) => writeln!(self.output, "Top Expense: {top}")?,
            None => writeln!(self.output, "No expenses yet!")?,
        }
        Ok(())
    }
}

/// Accepts plain decimals as well as scientific notation (`1e3`).
fn parse_amount(text: &str) -> Result<Decimal, Error> {
    let text = text.trim();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| Error::InvalidAmount(text.to_owned()))
}
