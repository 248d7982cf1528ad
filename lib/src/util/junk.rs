/// Returns `true` if `file_name` is an operating system or editor artifact
/// that never belongs in a styleguide: `.DS_Store`, `Thumbs.db`, vim swap
/// files, backup files ending in `~`, AppleDouble `._` files and the like.
/// Ordinary dotfiles such as `.gitkeep` are not junk.
pub fn is_junk(file_name: &str) -> bool {
    const EXACT: &[&str] = &[
        ".DS_Store",
        ".AppleDouble",
        ".LSOverride",
        ".Trashes",
        ".Spotlight-V100",
        ".fseventsd",
        ".TemporaryItems",
        "__MACOSX",
        "Thumbs.db",
        "ehthumbs.db",
        "Desktop.ini",
        "npm-debug.log",
        "Icon\r",
    ];

    EXACT.contains(&file_name)
        || file_name.starts_with("._")
        || file_name.ends_with('~')
        || file_name.ends_with("@eaDir")
        || (file_name.starts_with('.') && file_name.ends_with(".swp"))
}

#[cfg(test)]
mod tests {
    use super::is_junk;

    #[test]
    fn artifacts_are_junk() {
        for name in [".DS_Store", "Thumbs.db", "._buttons.scss", ".buttons.scss.swp",
            "buttons.scss~", "__MACOSX", "Desktop.ini", "@eaDir"]
        {
            assert!(is_junk(name), "{name} should be junk");
        }
    }

    #[test]
    fn sources_are_not_junk() {
        for name in ["buttons.scss", "_mixins.scss", ".gitkeep", "forms", "swp.scss"] {
            assert!(!is_junk(name), "{name} should not be junk");
        }
    }
}
