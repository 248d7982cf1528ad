use std::path::{Path, PathBuf};

pub trait PathExt: AsRef<Path> {
    /// Moves `self` from under `from` to under `to`. Returns `None` if `self`
    /// does not live under `from`.
    fn rebase<F: AsRef<Path>, T: AsRef<Path>>(&self, from: F, to: T) -> Option<PathBuf>;

    /// The file name without its final extension, lossily converted.
    fn stem(&self) -> String;
}

impl PathExt for Path {
    fn rebase<F: AsRef<Path>, T: AsRef<Path>>(&self, from: F, to: T) -> Option<PathBuf> {
        let from = super::normalize(from);
        let suffix = super::normalize(self);
        let suffix = suffix.strip_prefix(&from).ok()?;
        Some(to.as_ref().join(suffix))
    }

    fn stem(&self) -> String {
        self.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
