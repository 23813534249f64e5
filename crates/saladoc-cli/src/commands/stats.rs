//! Stats command implementation.

use crate::error::Result;
use crate::output::Formatter;
use saladoc_domain::{CorpusStats, DocumentRecord};

/// Execute the stats command.
pub fn execute_stats(corpus: &[DocumentRecord], formatter: &Formatter) -> Result<()> {
    let stats = CorpusStats::from_records(corpus);
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}
