use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::destination::Destination;
use crate::error::DestekResult;
use crate::package::DatasetPackage;
use crate::types::{DatasetId, ShardId};

/// Publishes datasets as `<root>/<dataset-id>/<shard-id>.json` on the local file system.
///
/// All shards are written into a staging directory next to the dataset directory, which is
/// then swapped into place. A re-ingested dataset therefore replaces all of its shards at once.
#[derive(Debug, Clone)]
pub struct FsDestination {
    root: PathBuf,
}

impl FsDestination {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding the shards of `dataset`.
    pub fn dataset_dir(&self, dataset: &str) -> PathBuf {
        self.root.join(dataset)
    }
}

async fn write_shards(directory: &Path, shards: Vec<(ShardId, Vec<u8>)>) -> DestekResult<()> {
    fs::create_dir(directory).await?;

    for (shard, bytes) in shards {
        fs::write(directory.join(shard.file_name()), bytes).await?;
    }

    Ok(())
}

/// Moves the fully written `staging` directory to `target`.
///
/// An existing `target` is moved aside to `retired` first and put back if the swap fails. On
/// error the staging directory is removed. Once the new shards are in place, failing to remove
/// the retired directory is only logged.
async fn publish(
    dataset: &DatasetId,
    staging: &Path,
    target: &Path,
    retired: &Path,
) -> DestekResult<()> {
    let replaced = match swap_into_place(dataset, staging, target, retired).await {
        Ok(replaced) => replaced,
        Err(err) => {
            let _ = fs::remove_dir_all(staging).await;
            return Err(err);
        }
    };

    if replaced && let Err(err) = fs::remove_dir_all(retired).await {
        warn!(
            dataset_id = %dataset,
            directory = %retired.display(),
            error = %err,
            "previous dataset could not be removed"
        );
    }

    Ok(())
}

/// Returns whether a previous dataset directory was moved to `retired`.
async fn swap_into_place(
    dataset: &DatasetId,
    staging: &Path,
    target: &Path,
    retired: &Path,
) -> DestekResult<bool> {
    if !fs::try_exists(target).await? {
        fs::rename(staging, target).await?;
        return Ok(false);
    }

    fs::rename(target, retired).await?;

    if let Err(err) = fs::rename(staging, target).await {
        warn!(dataset_id = %dataset, error = %err, "restoring previous dataset");
        fs::rename(retired, target).await?;
        return Err(err.into());
    }

    Ok(true)
}

impl Destination for FsDestination {
    fn name() -> &'static str {
        "fs"
    }

    async fn write_package(&self, package: &DatasetPackage) -> DestekResult<()> {
        let dataset = package.dataset();
        let shards = package.encode()?;

        fs::create_dir_all(&self.root).await?;

        let suffix = format!("{:016x}", rand::random::<u64>());
        let target = self.dataset_dir(dataset.as_str());
        let staging = self.root.join(format!(".{dataset}.staging-{suffix}"));

        if let Err(err) = write_shards(&staging, shards).await {
            let _ = fs::remove_dir_all(&staging).await;
            return Err(err);
        }

        let retired = self.root.join(format!(".{dataset}.retired-{suffix}"));
        publish(dataset, &staging, &target, &retired).await?;

        info!(
            dataset_id = %dataset,
            directory = %target.display(),
            records = package.record_count(),
            "dataset package written"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_every_shard_and_replaces_previous_dataset() {
        let root = tempfile::tempdir().unwrap();
        let destination = FsDestination::new(root.path());
        let dataset = DatasetId::new("koyun").unwrap();

        let first = DatasetPackage::empty(dataset.clone(), vec!["Ad".to_string()]);
        destination.write_package(&first).await.unwrap();

        let directory = destination.dataset_dir("koyun");
        fs::write(directory.join("stale.json"), b"{}").await.unwrap();

        let second = DatasetPackage::empty(dataset, vec!["Soyad".to_string()]);
        destination.write_package(&second).await.unwrap();

        let mut names = Vec::new();
        let mut entries = fs::read_dir(&directory).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names.len(), 100);
        assert!(!names.contains(&"stale.json".to_string()));

        let shard = fs::read_to_string(directory.join("42.json")).await.unwrap();
        assert_eq!(shard, r#"{"cols":["Soyad"],"data":{}}"#);

        let mut root_entries = fs::read_dir(root.path()).await.unwrap();
        let mut root_names = Vec::new();
        while let Some(entry) = root_entries.next_entry().await.unwrap() {
            root_names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(root_names, vec!["koyun".to_string()]);
    }

    #[tokio::test]
    async fn failed_swap_removes_staging_and_keeps_previous_dataset() {
        let root = tempfile::tempdir().unwrap();
        let dataset = DatasetId::new("koyun").unwrap();
        let staging = root.path().join(".koyun.staging-1");
        let target = root.path().join("koyun");
        let retired = root.path().join(".koyun.retired-1");

        fs::create_dir(&staging).await.unwrap();
        fs::write(staging.join("0.json"), b"new").await.unwrap();
        fs::create_dir(&target).await.unwrap();
        fs::write(target.join("0.json"), b"old").await.unwrap();
        // A non-empty directory in the way makes moving the previous dataset aside fail.
        fs::create_dir(&retired).await.unwrap();
        fs::write(retired.join("keep"), b"").await.unwrap();

        assert!(publish(&dataset, &staging, &target, &retired).await.is_err());

        assert!(!fs::try_exists(&staging).await.unwrap());
        assert_eq!(fs::read(target.join("0.json")).await.unwrap(), b"old");
    }

    #[tokio::test]
    async fn publish_into_new_directory() {
        let root = tempfile::tempdir().unwrap();
        let dataset = DatasetId::new("keci").unwrap();
        let staging = root.path().join(".keci.staging-1");
        let target = root.path().join("keci");
        let retired = root.path().join(".keci.retired-1");

        fs::create_dir(&staging).await.unwrap();
        fs::write(staging.join("0.json"), b"new").await.unwrap();

        publish(&dataset, &staging, &target, &retired).await.unwrap();

        assert!(!fs::try_exists(&staging).await.unwrap());
        assert!(!fs::try_exists(&retired).await.unwrap());
        assert_eq!(fs::read(target.join("0.json")).await.unwrap(), b"new");
    }
}
