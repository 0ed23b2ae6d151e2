use std::future::Future;

use crate::error::DestekResult;
use crate::package::DatasetPackage;

/// Receives finished dataset packages.
///
/// A write replaces every shard document of the package's dataset. Implementations must
/// not leave a mix of old and new shards behind once the write returns successfully.
pub trait Destination {
    /// Returns the name of the destination.
    fn name() -> &'static str;

    /// Publishes all shard documents of `package`.
    fn write_package(
        &self,
        package: &DatasetPackage,
    ) -> impl Future<Output = DestekResult<()>> + Send;
}
