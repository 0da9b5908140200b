//! Raw file access used when rewriting configuration files.

use std::fs;
use std::io;
use std::path::Path;

pub trait FileReader {
    fn read(&self, path: &Path) -> io::Result<String>;
}

pub trait FileWriter {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Reads and writes through the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl FileReader for FsStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

impl FileWriter for FsStore {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}
