use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Chainable, Result};

/// A destination for rendered output.
pub trait Sink {
    fn write<B: AsRef<[u8]>>(&self, bytes: B) -> Result<()>;

    #[inline]
    fn write_from<S: AsRef<Path>>(&self, source: S) -> Result<()> {
        let source = source.as_ref();
        let bytes = fs::read(source).chain_with(|| error! {
            "failed to open file for reading",
            "file path" => source.display(),
        })?;

        self.write(bytes)
    }
}

impl Sink for Path {
    /// Writes to the file at `self`, creating missing parent directories.
    fn write<B: AsRef<[u8]>>(&self, bytes: B) -> Result<()> {
        if let Some(parent) = self.parent() {
            fs::create_dir_all(parent).chain_with(|| error! {
                "failed to create output directory",
                "directory path" => parent.display(),
            })?;
        }

        let file = fs::File::create(self).chain_with(|| error! {
            "failed to open/create file for writing",
            "file path" => self.display(),
        })?;

        let mut file = io::BufWriter::new(file);
        file.write_all(bytes.as_ref())?;
        file.flush()?;
        Ok(())
    }
}

impl Sink for PathBuf {
    fn write<B: AsRef<[u8]>>(&self, bytes: B) -> Result<()> {
        self.as_path().write(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::Sink;

    #[test]
    fn parents_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms/inputs/text.html");
        path.write("<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");

        let copy = dir.path().join("copy.html");
        copy.write_from(&path).unwrap();
        assert_eq!(fs::read_to_string(copy).unwrap(), "<html></html>");
    }
}
