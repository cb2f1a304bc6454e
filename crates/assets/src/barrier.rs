use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::Instrument;

use crate::{AssetCategory, AssetError, AssetRegistry, AssetSource, Manifest};

/// How long the barrier waits for the whole manifest by default.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that abort the loading barrier.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load {category} \"{name}\": {source}")]
    Failed {
        name: String,
        category: AssetCategory,
        #[source]
        source: AssetError,
    },
    #[error("asset loading timed out after {after:?}; still loading: {}", .outstanding.join(", "))]
    TimedOut {
        after: Duration,
        outstanding: Vec<String>,
    },
}

/// Wait-for-all join over one fetch per manifest entry.
///
/// Every request is issued up front with no concurrency limit. Each completed
/// load is inserted into the registry immediately; the registry is handed out
/// only once all of them have completed. The first failure, or running past the
/// timeout, aborts the remaining loads.
pub struct LoadBarrier<'a, S: ?Sized> {
    manifest: &'a Manifest,
    source: &'a S,
    timeout: Duration,
}

impl<'a, S: AssetSource + ?Sized> LoadBarrier<'a, S> {
    pub fn new(manifest: &'a Manifest, source: &'a S) -> Self {
        Self {
            manifest,
            source,
            timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the barrier and invoke `on_complete` with the populated registry.
    ///
    /// The continuation is an `FnOnce`: it runs exactly once, and only after
    /// every load has completed. On error it never runs.
    pub async fn wait<T>(self, on_complete: impl FnOnce(AssetRegistry) -> T) -> Result<T, LoadError> {
        let registry = self.run().await?;
        Ok(on_complete(registry))
    }

    /// Run the barrier and return the populated registry.
    pub async fn run(self) -> Result<AssetRegistry, LoadError> {
        let span = tracing::info_span!("load_assets", total = self.manifest.len());
        self.drive().instrument(span).await
    }

    async fn drive(self) -> Result<AssetRegistry, LoadError> {
        let entries = &self.manifest.entries;
        let mut pending: FuturesUnordered<_> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let request = self.source.fetch(entry);
                async move { (index, request.await) }
            })
            .collect();
        let mut outstanding: BTreeSet<usize> = (0..entries.len()).collect();
        let mut registry = AssetRegistry::new();

        let joined = async {
            while let Some((index, result)) = pending.next().await {
                let entry = &entries[index];
                let asset = result.and_then(|asset| {
                    if asset.category() == entry.category {
                        Ok(asset)
                    } else {
                        Err(AssetError::CategoryMismatch {
                            name: entry.name.clone(),
                            expected: entry.category,
                            actual: asset.category(),
                        })
                    }
                });
                let asset = asset.map_err(|source| LoadError::Failed {
                    name: entry.name.clone(),
                    category: entry.category,
                    source,
                })?;
                registry.insert(entry.name.clone(), asset);
                outstanding.remove(&index);
                tracing::info!(
                    "loaded {} \"{}\" from {}",
                    entry.category,
                    entry.name,
                    entry.locator
                );
            }
            Ok::<(), LoadError>(())
        };

        let outcome = tokio::time::timeout(self.timeout, joined).await;
        match outcome {
            Ok(Ok(())) => {
                tracing::info!(assets = registry.len(), "all assets loaded");
                Ok(registry)
            }
            Ok(Err(err)) => {
                tracing::error!("{err}");
                Err(err)
            }
            Err(_) => {
                let outstanding: Vec<String> = outstanding
                    .iter()
                    .map(|i| entries[*i].name.clone())
                    .collect();
                tracing::error!(?outstanding, "asset loading timed out");
                Err(LoadError::TimedOut {
                    after: self.timeout,
                    outstanding,
                })
            }
        }
    }
}
