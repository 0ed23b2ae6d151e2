use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use config::shared::{ColumnRef, HeaderConfig};
use destek::ingest::header::resolve_headers;
use destek::source::SourceFile;

use crate::error::{ConverterError, ConverterResult};

#[derive(Args)]
pub(crate) struct HeadersArgs {
    /// 1-based number of the header row
    #[arg(long, default_value_t = 1)]
    header_row: u32,

    /// Prefix each header with the label in the row above it
    #[arg(long)]
    merge_parent: bool,

    /// Carry parent labels rightward over blank parent cells
    #[arg(long)]
    fill_forward_parent: bool,

    /// Source sheet (.json or .csv)
    source: PathBuf,
}

impl HeadersArgs {
    pub(crate) async fn run(self) -> ConverterResult<()> {
        if self.header_row == 0 {
            return Err(ConverterError::usage("header row numbers start at 1"));
        }

        let header = HeaderConfig {
            row: self.header_row,
            merge_parent: self.merge_parent,
            fill_forward_parent: self.fill_forward_parent,
        };

        let source = SourceFile::load(&self.source).await?;
        let headers = resolve_headers(&source.grid, &header)?;
        print!("{}", render_headers(&headers));

        Ok(())
    }
}

/// Renders one `<letters>  <header>` line per column.
fn render_headers(headers: &[String]) -> String {
    let mut out = String::new();

    for (index, name) in headers.iter().enumerate() {
        let _ = writeln!(out, "{:<4}{name}", ColumnRef::from_index(index).letters());
    }

    out
}
