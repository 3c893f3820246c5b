//! Table output

use comfy_table::{presets::NOTHING, Table};

use super::Tabular;

/// Render records as a borderless table
pub fn to_table<T: Tabular>(records: &[T], no_header: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(T::headers().to_vec());
    }
    for record in records {
        table.add_row(record.row());
    }
    table.to_string()
}
