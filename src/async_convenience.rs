//! Async convenience functions
//!
//! The codecs are synchronous pure functions. These wrappers run them on
//! tokio's blocking pool and handle file I/O asynchronously.

#[cfg(feature = "async")]
/// Blocking-pool wrappers and async file helpers
pub mod functions {
    use crate::{compression_stats, CompressOptions, CompressionStats, Method, Result, SubpackError};
    use std::path::{Path, PathBuf};

    /// Compress an owned buffer on the blocking pool
    pub async fn compress_bytes_async(data: Vec<u8>, options: CompressOptions) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || crate::compress_bytes(&data, &options))
            .await
            .map_err(|e| SubpackError::TaskFailed(e.to_string()))?
    }

    /// Decompress an owned buffer on the blocking pool
    pub async fn decompress_bytes_async(
        data: Vec<u8>,
        method: Method,
        self_extracting: bool,
    ) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || crate::decompress_bytes(&data, method, self_extracting))
            .await
            .map_err(|e| SubpackError::TaskFailed(e.to_string()))?
    }

    /// Compress a file asynchronously
    pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        options: CompressOptions,
    ) -> Result<CompressionStats> {
        let data = tokio::fs::read(input_path).await?;
        let input_len = data.len();
        let method = options.method;
        let self_extracting = options.dictionary.self_extracting;

        let compressed = compress_bytes_async(data, options).await?;
        tokio::fs::write(output_path, &compressed).await?;

        compression_stats(input_len, &compressed, method, self_extracting)
    }

    /// Decompress a file asynchronously
    pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        method: Method,
        self_extracting: bool,
    ) -> Result<CompressionStats> {
        let compressed = tokio::fs::read(input_path).await?;
        let stats_input = compressed.clone();

        let restored = decompress_bytes_async(compressed, method, self_extracting).await?;
        tokio::fs::write(output_path, &restored).await?;

        compression_stats(restored.len(), &stats_input, method, self_extracting)
    }

    /// Compress multiple files concurrently
    pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
        files: Vec<P>,
        options: CompressOptions,
        concurrency: Option<usize>,
    ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
        use crate::async_batch::AsyncBatchProcessor;

        let mut processor = AsyncBatchProcessor::new().with_options(options);
        if let Some(limit) = concurrency {
            processor = processor.with_concurrency(limit);
        }

        processor.compress_files(files).await
    }
}

#[cfg(feature = "async")]
pub use functions::*;
