use crate::data::{Error, Expense};
use std::{fs::File, io, path::Path};

/// Trait for doing something with an `Expense` read from the store. A plain
/// `Vec` just collects them, `Analysis` sums them up as they come.
pub(crate) trait ExpenseUser {
    fn use_expense(&mut self, expense: Expense) -> Result<(), Error>;
}

impl ExpenseUser for Vec<Expense> {
    fn use_expense(&mut self, expense: Expense) -> Result<(), Error> {
        self.push(expense);
        Ok(())
    }
}

/// CSV importer for `Expense`s. Stops at the first row that doesn't decode.
pub(crate) fn read_expenses<R: io::Read, U: ExpenseUser>(
    reader: R,
    user: &mut U,
) -> Result<(), Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    for result in rdr.deserialize() {
        let expense: Expense = result.map_err(malformed)?;
        user.use_expense(expense)?;
    }
    Ok(())
}

/// Feeds every expense in the store at `path` to `user`. A store that doesn't
/// exist yet simply has no expenses in it.
pub(crate) fn read_into<U: ExpenseUser>(path: &Path, user: &mut U) -> Result<(), Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no store yet");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    read_expenses(file, user)
}

/// Reads back the whole store.
pub(crate) fn read_all(path: &Path) -> Result<Vec<Expense>, Error> {
    let mut expenses = Vec::new();
    read_into(path, &mut expenses)?;
    tracing::debug!(path = %path.display(), count = expenses.len(), "read store");
    Ok(expenses)
}

fn malformed(e: csv::Error) -> Error {
    match e.kind() {
        csv::ErrorKind::Deserialize { pos, err } => Error::MalformedRow {
            line: pos.as_ref().map_or(0, |p| p.line()),
            reason: err.to_string(),
        },
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => Error::MalformedRow {
            line: pos.as_ref().map_or(0, |p| p.line()),
            reason: format!("expected {expected_len} fields, found {len}"),
        },
        _ => Error::Csv(e),
    }
}
