use crate::{
    compute::Analysis,
    data::{Error, Expense, HEADER},
};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// Appends one `Expense` to the store, creating it (with its header) if needed.
pub(crate) fn append_expense(path: &Path, expense: &Expense) -> Result<(), Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let empty = file.metadata()?.len() == 0;
    write_expense(file, expense, empty)?;
    tracing::info!(path = %path.display(), id = expense.id, "appended expense");
    Ok(())
}

/// Basic CSV exporter for a single `Expense` row.
fn write_expense<W: io::Write>(writer: W, expense: &Expense, header: bool) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    if header {
        wtr.write_record(HEADER)?;
    }
    wtr.serialize(expense)?;
    wtr.flush()?;
    Ok(())
}

/// Replaces the report file with the per-category totals of `analysis`.
pub(crate) fn write_analysis(path: &Path, analysis: &Analysis) -> Result<(), Error> {
    let mut writer = io::BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, analysis)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), categories = analysis.totals.len(), "wrote analysis");
    Ok(())
}
