//! CSV serialization of a [`Summary`].

use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::Result;

use super::Summary;

/// Format a price as a fixed two-decimal currency string, e.g. `$3.50`.
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price)
}

/// Write the summary as CSV: a header row, one row per line item, and a
/// `TOTAL` row per store. When `blank_row_between_stores` is set, each
/// store section is followed by a blank separator row.
///
/// Row order follows store insertion order, then item order within each
/// store, with the store's total row immediately after its items.
pub fn write_summary<W: Write>(
    summary: &Summary,
    writer: W,
    blank_row_between_stores: bool,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["Store", "Item", "Price"])?;

    for (store, items) in summary.entries() {
        for item in items {
            wtr.write_record([store.display_name(), &item.name, &format_price(item.price)])?;
        }

        let total: Decimal = items.iter().map(|i| i.price).sum();
        wtr.write_record([store.display_name(), "TOTAL", &format_price(total)])?;

        if blank_row_between_stores {
            wtr.write_record(["", "", ""])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write the summary CSV to a file.
///
/// Unlike per-image failures, a failed write here is fatal: the error is
/// returned to the caller so the run can abort with a clear message.
pub fn write_summary_file(
    summary: &Summary,
    path: &Path,
    blank_row_between_stores: bool,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(summary, file, blank_row_between_stores)?;

    info!(
        "Wrote summary with {} items to {}",
        summary.item_count(),
        path.display()
    );

    Ok(())
}
