use std::path::Path;

use config::shared::IngestConfig;
use tracing::{info, warn};

use crate::destination::Destination;
use crate::error::{DestekError, DestekResult};
use crate::ingest::merger::{ShardAccumulator, merge_sheet};
use crate::ingest::report::{FileFailure, FileReport, IngestReport};
use crate::package::DatasetPackage;
use crate::source::SourceFile;
use crate::types::DatasetId;

/// One ingestion run: source files are merged, strictly one after another, into a single
/// accumulator owned by the pipeline.
///
/// A file that fails is recorded and skipped; it never stops the run.
#[derive(Debug)]
pub struct IngestPipeline {
    config: IngestConfig,
    dataset: DatasetId,
    accumulator: ShardAccumulator,
    files: Vec<FileReport>,
    failures: Vec<FileFailure>,
}

impl IngestPipeline {
    /// Validates `config` and prepares an empty accumulator.
    pub fn new(config: IngestConfig) -> DestekResult<Self> {
        config.validate()?;
        let dataset = DatasetId::new(config.dataset_id.trim())?;

        Ok(Self {
            config,
            dataset,
            accumulator: ShardAccumulator::new(),
            files: Vec::new(),
            failures: Vec::new(),
        })
    }

    pub fn dataset(&self) -> &DatasetId {
        &self.dataset
    }

    /// Merges one source file.
    ///
    /// Returns the per-file counts, or the recorded failure when the file was rejected.
    pub fn ingest(&mut self, source: &SourceFile) -> Result<&FileReport, &FileFailure> {
        match merge_sheet(&mut self.accumulator, &source.name, &source.grid, &self.config) {
            Ok(report) => {
                info!(
                    dataset_id = %self.dataset,
                    file = %source.name,
                    accepted_rows = report.accepted_rows,
                    blank_rows = report.blank_rows,
                    rows_without_identity = report.rows_without_identity,
                    duplicate_rows = report.duplicate_rows,
                    "source file merged"
                );

                self.files.push(report);
                Ok(&self.files[self.files.len() - 1])
            }
            Err(error) => Err(self.reject(&source.name, error)),
        }
    }

    /// Reads the sheet at `path` and merges it.
    ///
    /// A sheet that cannot be read is recorded as a failed file like one that fails to merge.
    pub async fn ingest_path(&mut self, path: &Path) -> Result<&FileReport, &FileFailure> {
        match SourceFile::load(path).await {
            Ok(source) => self.ingest(&source),
            Err(error) => Err(self.reject(&SourceFile::name_for(path), error)),
        }
    }

    fn reject(&mut self, file: &str, error: DestekError) -> &FileFailure {
        warn!(
            dataset_id = %self.dataset,
            file = %file,
            error = %error,
            "source file rejected"
        );

        self.failures.push(FileFailure {
            file: file.to_string(),
            error,
        });
        &self.failures[self.failures.len() - 1]
    }

    /// Freezes the accumulated shards into a package.
    ///
    /// The package always holds every shard, even when no row qualified.
    pub fn finish(self) -> (DatasetPackage, IngestReport) {
        let records = self.accumulator.record_count();
        let schema = self
            .accumulator
            .schema()
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let package = self.accumulator.into_package(self.dataset.clone());

        let report = IngestReport {
            dataset_id: self.dataset,
            schema,
            files: self.files,
            failures: self.failures,
            records,
        };

        if report.is_empty() {
            warn!(
                dataset_id = %report.dataset_id,
                files = report.files.len(),
                failed_files = report.failures.len(),
                "no rows qualified, the dataset will only contain empty shards"
            );
        }

        (package, report)
    }
}

/// Ingests `sources` in order and writes the resulting package to `destination`.
///
/// Rejected files do not fail the run; they are listed in the returned report.
pub async fn run_ingestion<D>(
    config: IngestConfig,
    sources: &[SourceFile],
    destination: &D,
) -> DestekResult<IngestReport>
where
    D: Destination,
{
    let mut pipeline = IngestPipeline::new(config)?;
    log_start::<D>(&pipeline, sources.len());

    for source in sources {
        let _ = pipeline.ingest(source);
    }

    write_report(pipeline, destination).await
}

/// Reads and ingests the sheets at `paths` in order, then writes the package to `destination`.
///
/// Sheets that cannot be read are listed in the returned report next to those that fail to
/// merge; the remaining files are still ingested and written.
pub async fn run_ingestion_from_paths<D, P>(
    config: IngestConfig,
    paths: &[P],
    destination: &D,
) -> DestekResult<IngestReport>
where
    D: Destination,
    P: AsRef<Path>,
{
    let mut pipeline = IngestPipeline::new(config)?;
    log_start::<D>(&pipeline, paths.len());

    for path in paths {
        let _ = pipeline.ingest_path(path.as_ref()).await;
    }

    write_report(pipeline, destination).await
}

fn log_start<D: Destination>(pipeline: &IngestPipeline, files: usize) {
    info!(
        dataset_id = %pipeline.dataset(),
        files,
        destination = D::name(),
        "starting ingestion"
    );
}

async fn write_report<D: Destination>(
    pipeline: IngestPipeline,
    destination: &D,
) -> DestekResult<IngestReport> {
    let (package, report) = pipeline.finish();
    destination.write_package(&package).await?;

    info!(
        dataset_id = %report.dataset_id,
        records = report.records,
        accepted_rows = report.accepted_rows(),
        duplicate_rows = report.duplicate_rows(),
        failed_files = report.failures.len(),
        "ingestion finished"
    );

    Ok(report)
}
