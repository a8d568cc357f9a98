// crates/featuredict-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, memory, decompression) behind the
//! [`ResourceAccess`] trait and delegates to the preset parsers.

use crate::error::{DictionaryError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "json")]
pub mod presets;
#[cfg(feature = "json")]
pub mod translations;
#[cfg(feature = "fetch")]
pub mod fetch;

/// Named resources a catalog reads its preset files from.
pub trait ResourceAccess: Send + Sync {
    fn exists(&self, name: &str) -> bool;

    /// Open a resource for reading. Missing resources are
    /// [`DictionaryError::NotFound`].
    fn open(&self, name: &str) -> Result<Box<dyn Read>>;
}

/// Resources are files in a base directory.
///
/// With the `compact` feature, `name.gz` is read transparently when `name`
/// itself does not exist.
#[derive(Debug, Clone)]
pub struct FileSystemAccess {
    base: PathBuf,
}

impl FileSystemAccess {
    pub fn new(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        if !base.is_dir() {
            return Err(DictionaryError::NotFound(format!(
                "{} is not a directory",
                base.display()
            )));
        }
        Ok(FileSystemAccess { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn compressed(&self, name: &str) -> PathBuf {
        self.base.join(format!("{name}.gz"))
    }
}

impl ResourceAccess for FileSystemAccess {
    fn exists(&self, name: &str) -> bool {
        if self.base.join(name).is_file() {
            return true;
        }
        cfg!(feature = "compact") && self.compressed(name).is_file()
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let path = self.base.join(name);
        if path.is_file() {
            return open_stream(&path);
        }
        #[cfg(feature = "compact")]
        {
            let gz = self.compressed(name);
            if gz.is_file() {
                return open_stream(&gz);
            }
        }
        Err(DictionaryError::NotFound(format!(
            "{name} not found in {}",
            self.base.display()
        )))
    }
}

/// Resources held in memory, mostly for tests and embedded data.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccess {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), content.into());
    }
}

impl ResourceAccess for MemoryAccess {
    fn exists(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let content = self
            .resources
            .get(name)
            .ok_or_else(|| DictionaryError::NotFound(name.to_owned()))?;
        Ok(Box::new(Cursor::new(content.clone())))
    }
}

/// Open a file, buffered, decompressing it if its name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DictionaryError::NotFound(format!("cannot open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        if path.extension().is_some_and(|ext| ext == "gz") {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
    }

    Ok(Box::new(reader))
}
