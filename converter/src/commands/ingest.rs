use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use config::shared::ConverterConfig;
use destek::destination::fs::FsDestination;
use destek::ingest::pipeline::run_ingestion_from_paths;
use destek::ingest::report::IngestReport;
use destek::types::{DatasetId, SHARD_COUNT};

use crate::error::{ConverterError, ConverterResult};
use crate::settings::load_ingest_job;

#[derive(Args)]
pub(crate) struct IngestArgs {
    /// Ingestion job file (yaml or json)
    #[arg(long)]
    job: PathBuf,

    /// Dataset id, overriding the job file. Derived from the first source file name when
    /// neither is set
    #[arg(long)]
    dataset_id: Option<String>,

    /// Root directory dataset directories are written into, overriding `output_dir`
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Source sheets (.json or .csv), merged in the given order
    #[arg(required = true)]
    sources: Vec<PathBuf>,
}

impl IngestArgs {
    pub(crate) async fn run(self, converter_config: &ConverterConfig) -> ConverterResult<()> {
        let mut job = load_ingest_job(&self.job)?;
        job.dataset_id =
            resolve_dataset_id(self.dataset_id.as_deref(), &job.dataset_id, &self.sources)?;

        let output_dir = self
            .output_dir
            .unwrap_or_else(|| converter_config.output_dir.clone());
        let destination = FsDestination::new(output_dir);

        let report = run_ingestion_from_paths(job, &self.sources, &destination).await?;
        print!(
            "{}",
            render_summary(&report, &destination.dataset_dir(report.dataset_id.as_str()))
        );

        match report.failure() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// Picks the dataset id: command line first, then the job file, then the first source name.
fn resolve_dataset_id(
    from_args: Option<&str>,
    from_job: &str,
    sources: &[PathBuf],
) -> ConverterResult<String> {
    if let Some(id) = from_args.map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    if !from_job.trim().is_empty() {
        return Ok(from_job.trim().to_string());
    }

    sources
        .first()
        .and_then(|path| path.file_name())
        .and_then(|name| DatasetId::from_file_name(&name.to_string_lossy()))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| {
            ConverterError::usage(
                "no dataset id given and none could be derived from the source file name",
            )
        })
}

fn render_summary(report: &IngestReport, directory: &std::path::Path) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "dataset: {}", report.dataset_id);
    let _ = writeln!(out, "written to: {}", directory.display());
    let _ = writeln!(out, "columns: {}", report.schema.join(", "));
    let _ = writeln!(
        out,
        "records: {} ({} rows, {} merged duplicates)",
        report.records,
        report.accepted_rows(),
        report.duplicate_rows()
    );

    for file in &report.files {
        let _ = writeln!(
            out,
            "  {}: {} rows, {} blank, {} without identity, {} duplicates",
            file.file,
            file.accepted_rows,
            file.blank_rows,
            file.rows_without_identity,
            file.duplicate_rows
        );
    }

    for failure in &report.failures {
        let _ = writeln!(
            out,
            "  {}: rejected, {}",
            failure.file,
            failure.error.description().unwrap_or("see error report")
        );
    }

    if report.is_empty() {
        let _ = writeln!(
            out,
            "warning: no rows qualified, all {SHARD_COUNT} shards were written empty"
        );
    }

    out
}
