//! Async batch processing module
//!
//! Compresses many files or buffers concurrently. Each item is encoded on
//! tokio's blocking pool; at most `concurrency_limit` run at once.

#[cfg(feature = "async")]
/// Concurrent compression with a configurable concurrency limit
pub mod processor {
    use crate::async_convenience::compress_bytes_async;
    use crate::{compression_stats, CompressOptions, CompressionStats, Result, SubpackError};
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};

    /// Concurrent batch compressor
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
        options: CompressOptions,
    }

    impl AsyncBatchProcessor {
        /// Create a processor with one task per CPU and default options
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
                options: CompressOptions::default(),
            }
        }

        /// Set the concurrency limit (at least 1)
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Set the compression options applied to every item
        pub fn with_options(mut self, options: CompressOptions) -> Self {
            self.options = options;
            self
        }

        /// Current concurrency limit
        pub fn concurrency_limit(&self) -> usize {
            self.concurrency_limit
        }

        /// Compress files concurrently, in completion order
        pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            let results = stream::iter(files.into_iter().map(|path| {
                let processor = self.clone();
                async move {
                    let (path, _, compressed) = processor.compress_single_file(path).await?;
                    Ok::<_, SubpackError>((path, compressed))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await?;

            Ok(results)
        }

        /// Stream per-file statistics as they complete
        pub fn compress_files_streaming<P: AsRef<Path> + Send + Sync + 'static>(
            &self,
            files: Vec<P>,
        ) -> impl futures::Stream<Item = Result<(PathBuf, CompressionStats)>> + '_ {
            stream::iter(files.into_iter().map(move |path| {
                let processor = self.clone();
                async move {
                    let (path, input_len, compressed) =
                        processor.compress_single_file(path).await?;
                    let stats = compression_stats(
                        input_len,
                        &compressed,
                        processor.options.method,
                        processor.options.dictionary.self_extracting,
                    )?;
                    Ok::<_, SubpackError>((path, stats))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
        }

        /// Compress in-memory buffers, keeping input order
        pub async fn compress_buffers(&self, buffers: Vec<Vec<u8>>) -> Result<Vec<Vec<u8>>> {
            stream::iter(
                buffers
                    .into_iter()
                    .map(|data| compress_bytes_async(data, self.options.clone())),
            )
            .buffered(self.concurrency_limit)
            .try_collect()
            .await
        }

        async fn compress_single_file<P: AsRef<Path>>(
            &self,
            path: P,
        ) -> Result<(PathBuf, usize, Vec<u8>)> {
            let path = path.as_ref();
            let data = tokio::fs::read(path).await?;
            let input_len = data.len();

            let compressed = compress_bytes_async(data, self.options.clone()).await?;
            Ok((path.to_path_buf(), input_len, compressed))
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
