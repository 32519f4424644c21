//! Directory-backed corpus supplier
//!
//! Every file is one document and its path is the document identifier.
//! Files are read lazily, one per iteration step, each exactly once.

use crate::config::SiftConfig;
use crate::error::{Error, Result};
use crate::types::Document;
use std::path::{Path, PathBuf};
use std::vec::IntoIter;

/// Iterator over the documents stored in a directory
///
/// Without an explicit file list the paths are sorted ascending, which makes
/// the supplied identifiers non-decreasing across the whole corpus.
#[derive(Debug)]
pub struct DirectoryCorpus {
    root: PathBuf,
    paths: IntoIter<PathBuf>,
}

impl DirectoryCorpus {
    /// List every regular file directly inside `root`, in ascending path order.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let entries = std::fs::read_dir(&root).map_err(|e| Error::io(&root, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&root, e))?;
            let path = entry.path();
            // Follows symlinks, so a linked file counts as a document.
            let metadata = std::fs::metadata(&path).map_err(|e| Error::io(&path, e))?;
            if metadata.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        tracing::debug!(
            target: "sift::corpus",
            root = %root.display(),
            files = paths.len(),
            "Corpus directory listed"
        );

        Ok(DirectoryCorpus {
            root,
            paths: paths.into_iter(),
        })
    }

    /// Use an explicit list of file names inside `root`, kept in the given order.
    pub fn with_files<I, S>(root: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let root = root.into();
        let paths: Vec<PathBuf> = files.into_iter().map(|f| root.join(f)).collect();
        DirectoryCorpus {
            root,
            paths: paths.into_iter(),
        }
    }

    /// Build the supplier described by a configuration.
    pub fn from_config(config: &SiftConfig) -> Result<Self> {
        match &config.files {
            Some(files) => Ok(Self::with_files(&config.corpus_dir, files)),
            None => Self::open(&config.corpus_dir),
        }
    }

    /// Directory the corpus is read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of documents not yet read.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl Iterator for DirectoryCorpus {
    type Item = Result<Document<PathBuf>>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Document::new(path, text)),
            Err(e) => Err(Error::io(path, e)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}
