//! Category-partitioned result files.
//!
//! Each [`Category`] owns one append-only text file in the output directory.
//! A file handle sits behind its own async mutex, so concurrent workers write
//! whole lines one at a time and lines never interleave.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use log::debug;
use strum::IntoEnumIterator;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::classify::Category;
use crate::error_handling::SinkError;

struct Destination {
    path: PathBuf,
    file: Mutex<tokio::fs::File>,
}

/// Concurrent-safe, append-only store with one destination per category.
pub struct ResultSink {
    destinations: HashMap<Category, Destination>,
}

impl ResultSink {
    /// Opens all destinations under `dir`, truncating results of a previous run.
    ///
    /// Creates `dir` if needed. Call once per run, before any worker starts.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the directory or a file cannot be created.
    pub fn create(dir: &Path) -> Result<Self, SinkError> {
        std::fs::create_dir_all(dir).map_err(|source| SinkError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut destinations = HashMap::new();
        for category in Category::iter() {
            let path = dir.join(category.file_name());
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .map_err(|source| SinkError::Io {
                    path: path.clone(),
                    source,
                })?;
            debug!("Reset {} destination at {}", category, path.display());
            destinations.insert(
                category,
                Destination {
                    path,
                    file: Mutex::new(tokio::fs::File::from_std(file)),
                },
            );
        }

        Ok(Self { destinations })
    }

    /// Appends one line to the category's destination.
    ///
    /// Embedded line breaks are replaced by spaces so that one call always
    /// produces exactly one line.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the write fails.
    pub async fn append(&self, category: Category, line: &str) -> Result<(), SinkError> {
        let destination = self.destination(category);
        let mut record = line.replace(['\r', '\n'], " ");
        record.push('\n');

        let mut file = destination.file.lock().await;
        file.write_all(record.as_bytes())
            .await
            .map_err(|source| SinkError::Io {
                path: destination.path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| SinkError::Io {
            path: destination.path.clone(),
            source,
        })
    }

    /// Points a category at another file, e.g. a device that rejects writes.
    #[cfg(test)]
    pub(crate) fn redirect(&mut self, category: Category, path: &Path) -> Result<(), SinkError> {
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| SinkError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        self.destinations.insert(
            category,
            Destination {
                path: path.to_path_buf(),
                file: Mutex::new(tokio::fs::File::from_std(file)),
            },
        );
        Ok(())
    }

    /// Path of the category's destination.
    pub fn path(&self, category: Category) -> &Path {
        &self.destination(category).path
    }

    /// Reads back all lines written to a category.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the file cannot be read.
    pub async fn read_lines(&self, category: Category) -> Result<Vec<String>, SinkError> {
        let destination = self.destination(category);
        // Holding the lock waits out any in-flight append
        let _guard = destination.file.lock().await;
        let content = tokio::fs::read_to_string(&destination.path)
            .await
            .map_err(|source| SinkError::Io {
                path: destination.path.clone(),
                source,
            })?;
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Number of lines written to a category.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the file cannot be read.
    pub async fn count_lines(&self, category: Category) -> Result<usize, SinkError> {
        Ok(self.read_lines(category).await?.len())
    }

    fn destination(&self, category: Category) -> &Destination {
        // Every category is inserted by `create`
        &self.destinations[&category]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_makes_one_empty_file_per_category() {
        let dir = TempDir::new().expect("tempdir");
        let sink = ResultSink::create(dir.path()).expect("sink");
        for category in Category::iter() {
            assert!(sink.path(category).exists());
            assert_eq!(sink.count_lines(category).await.expect("count"), 0);
        }
    }

    #[tokio::test]
    async fn test_create_truncates_previous_results() {
        let dir = TempDir::new().expect("tempdir");
        {
            let sink = ResultSink::create(dir.path()).expect("sink");
            sink.append(Category::Successful, "https://old.example")
                .await
                .expect("append");
        }
        let sink = ResultSink::create(dir.path()).expect("sink");
        assert_eq!(sink.count_lines(Category::Successful).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_append_writes_to_category_file() {
        let dir = TempDir::new().expect("tempdir");
        let sink = ResultSink::create(dir.path()).expect("sink");
        sink.append(Category::SslSelfSigned, "https://a.example – CA: SberCA")
            .await
            .expect("append");

        let content =
            std::fs::read_to_string(dir.path().join("ssl_self_sign_err.txt")).expect("read");
        assert_eq!(content, "https://a.example – CA: SberCA\n");
        assert_eq!(sink.count_lines(Category::SslOther).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_embedded_newlines_stay_on_one_line() {
        let dir = TempDir::new().expect("tempdir");
        let sink = ResultSink::create(dir.path()).expect("sink");
        sink.append(Category::RequestError, "https://a.example – error: first\nsecond")
            .await
            .expect("append");
        let lines = sink.read_lines(Category::RequestError).await.expect("read");
        assert_eq!(lines, vec!["https://a.example – error: first second"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = TempDir::new().expect("tempdir");
        let sink = Arc::new(ResultSink::create(dir.path()).expect("sink"));
        let categories: Vec<Category> = Category::iter().collect();

        let mut handles = Vec::new();
        for i in 0..10_000usize {
            let sink = Arc::clone(&sink);
            let category = categories[i % categories.len()];
            handles.push(tokio::spawn(async move {
                sink.append(category, &format!("https://host-{i}.example – marker {i}"))
                    .await
                    .expect("append");
            }));
        }
        for handle in handles {
            handle.await.expect("task");
        }

        let mut seen = HashSet::new();
        for category in &categories {
            for line in sink.read_lines(*category).await.expect("read") {
                let (url, marker) = line.split_once(" – marker ").expect("intact line");
                assert_eq!(url, format!("https://host-{marker}.example"));
                assert!(seen.insert(line.clone()), "duplicate line {line}");
            }
        }
        assert_eq!(seen.len(), 10_000);
    }
}
