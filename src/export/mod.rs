//! Data exports

mod csv;

pub use csv::{export_expenses_csv, export_filename, export_incomes_csv, ExportKind};
