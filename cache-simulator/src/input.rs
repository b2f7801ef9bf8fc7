//! Trace input for cache simulation
//!
//! A trace is a text file with one access per line. The first
//! whitespace-delimited token of each line is the key; anything after it
//! (operation, offset, size) is ignored. The key is opaque: a token such
//! as `#42` is a key like any other. Blank lines carry no access and are
//! skipped.
//!
//! Traces are streamed line by line through [`TraceReader`], or collected
//! once into a [`Trace`] so that a capacity sweep can replay the same keys
//! many times without touching the file again.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Error types for trace parsing
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("failed to open trace {}", .path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Reading the trace failed part way through.
    #[error("failed to read trace at line {line}")]
    Read {
        /// One-based line number of the failed read.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Streaming reader over the keys of a trace
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line_num: usize,
    line_buffer: String,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened trace");
        // 1MB buffer, traces are read front to back exactly once
        Ok(Self::from_reader(BufReader::with_capacity(1024 * 1024, file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_num: 0,
            line_buffer: String::with_capacity(256),
        }
    }

    /// Reads every remaining key into memory.
    pub fn load(self) -> Result<Trace, TraceError> {
        let keys = self.collect::<Result<Vec<_>, _>>()?;
        debug!(requests = keys.len(), "loaded trace");
        Ok(Trace { keys })
    }

    /// Extracts the key from a single line, if the line carries one.
    fn parse_line(line: &str) -> Option<&str> {
        line.split_whitespace().next()
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<String, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            self.line_num += 1;
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    if let Some(key) = Self::parse_line(&self.line_buffer) {
                        return Some(Ok(key.to_string()));
                    }
                }
                Err(source) => {
                    return Some(Err(TraceError::Read {
                        line: self.line_num,
                        source,
                    }))
                }
            }
        }
    }
}

/// An in-memory trace: the access keys in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    keys: Vec<String>,
}

impl Trace {
    /// Creates a trace from keys in request order.
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Returns the keys in request order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Iterates over the keys in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.keys.iter()
    }

    /// Number of requests.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the trace has no requests.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct keys.
    pub fn unique_keys(&self) -> usize {
        self.keys.iter().collect::<HashSet<_>>().len()
    }
}

impl<S: Into<String>> FromIterator<S> for Trace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
