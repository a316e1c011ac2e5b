//! Where descriptor sources come from.
use crate::error::TableError;
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

/// Source of descriptor text, looked up by file name (`6502.opcodes`, ...)
pub trait DescriptorStore {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    fn load(&self, name: &str) -> Result<Cow<'_, str>, TableError>;
}

/// Descriptor sources compiled into the library
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledDescriptors;

impl BundledDescriptors {
    pub const SOURCES: [(&'static str, &'static str); 3] = [
        ("6502.opcodes", include_str!("../descriptors/6502.opcodes")),
        ("65c02.opcodes", include_str!("../descriptors/65c02.opcodes")),
        ("65c816.opcodes", include_str!("../descriptors/65c816.opcodes")),
    ];
}

impl DescriptorStore for BundledDescriptors {
    fn describe(&self) -> String {
        "bundled descriptors".to_owned()
    }

    fn load(&self, name: &str) -> Result<Cow<'_, str>, TableError> {
        Self::SOURCES
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, text)| Cow::Borrowed(*text))
            .ok_or_else(|| TableError::Source {
                name: name.to_owned(),
                error: io::Error::new(io::ErrorKind::NotFound, "no bundled descriptor source"),
            })
    }
}

/// Descriptor sources read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryDescriptors {
    root: PathBuf,
}

impl DirectoryDescriptors {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DescriptorStore for DirectoryDescriptors {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self, name: &str) -> Result<Cow<'_, str>, TableError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path)
            .map(Cow::Owned)
            .map_err(|error| TableError::Source {
                name: path.display().to_string(),
                error,
            })
    }
}
