mod path_ext;
mod junk;
mod sink;

pub use path_ext::*;
pub use junk::*;
pub use sink::*;

use std::path::{Path, PathBuf, Component};

/// A helper function to determine the relative path to `path` from `base`.
///
/// Returns `None` if there is no relative path from `base` to `path`, that is,
/// `base` and `path` do not share a common ancestor. `path` and `base` must be
/// either both absolute or both relative; returns `None` if one is relative and
/// the other absolute.
///
/// ```
/// use sassdown::util::diff_paths;
///
/// assert_eq!(diff_paths("/a/b/c", "b/c"), None);
/// assert_eq!(diff_paths("/out/forms/input.html", "/out"), Some("forms/input.html".into()));
/// assert_eq!(diff_paths("/out", "/out/forms"), Some("..".into()));
/// assert_eq!(diff_paths("/out", "/out"), Some("".into()));
/// ```
// Copyright 2021 Sergio Benitez
// Copyright 2012-2015 The Rust Project Developers.
// Copyright 2017 The Rust Project Developers.
// Adapted from `figment`, which adapted from `pathdiff`, which itself adapted
// from rustc's path_relative_from.
pub fn diff_paths<P, B>(path: P, base: B) -> Option<PathBuf>
     where P: AsRef<Path>, B: AsRef<Path>
{
    let (path, base) = (path.as_ref(), base.as_ref());
    if path.has_root() != base.has_root() {
        return None;
    }

    let mut ita = path.components();
    let mut itb = base.components();
    let mut comps: Vec<Component> = vec![];
    loop {
        match (ita.next(), itb.next()) {
            (None, None) => break,
            (Some(a), None) => {
                comps.push(a);
                comps.extend(ita.by_ref());
                break;
            }
            (None, _) => comps.push(Component::ParentDir),
            (Some(a), Some(b)) if comps.is_empty() && a == b => (),
            (Some(a), Some(b)) if b == Component::CurDir => comps.push(a),
            (Some(_), Some(b)) if b == Component::ParentDir => return None,
            (Some(a), Some(_)) => {
                comps.push(Component::ParentDir);
                comps.extend(itb.map(|_| Component::ParentDir));
                comps.push(a);
                comps.extend(ita.by_ref());
                break;
            }
        }
    }

    Some(comps.iter().map(|c| c.as_os_str()).collect())
}

/// Lexically normalizes `path`: drops `.` components and folds `..` into the
/// preceding normal component. Symlinks are not consulted.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut normal = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normal.components().next_back() {
                Some(Component::Normal(_)) => { normal.pop(); }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normal.push(".."),
            },
            c => normal.push(c),
        }
    }

    normal
}

/// Joins the components of a relative path with `/`, the form used in links.
pub fn to_slash<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns `true` if `string` names a remote resource rather than a local path:
/// `http:`, `https:` and `file:` URLs and protocol-relative `//` paths.
pub fn is_url(string: &str) -> bool {
    let rest = ["https:", "http:", "file:"].iter()
        .find_map(|scheme| string.strip_prefix(scheme))
        .unwrap_or(string);

    rest.starts_with("//")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn diff_paths_between_destinations() {
        assert_eq!(diff_paths("a/b/c", "/b/c"), None);
        assert_eq!(diff_paths("/foo/bar", "/foo/bar/baz"), Some("..".into()));
        assert_eq!(diff_paths("/foo/bar/quux", "/foo/bar/baz"), Some("../quux".into()));
        assert_eq!(diff_paths("styleguide/base/type.html", "styleguide"),
            Some("base/type.html".into()));
    }

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize("./assets/./forms/../buttons.scss"), Path::new("assets/buttons.scss"));
        assert_eq!(normalize("/assets/../../x"), Path::new("/x"));
        assert_eq!(normalize("../x/y/.."), Path::new("../x"));
        assert_eq!(normalize(""), PathBuf::new());
    }

    #[test]
    fn to_slash_joins_with_forward_slashes() {
        let path: PathBuf = ["forms", "inputs", "text.html"].iter().collect();
        assert_eq!(to_slash(&path), "forms/inputs/text.html");
        assert_eq!(to_slash(""), "");
    }

    #[test]
    fn urls_are_recognized() {
        assert!(is_url("https://cdn.example.com/app.css"));
        assert!(is_url("http://example.com/app.js"));
        assert!(is_url("file:///tmp/app.css"));
        assert!(is_url("//cdn.example.com/app.css"));
        assert!(!is_url("dist/app.css"));
        assert!(!is_url("https.css"));
        assert!(!is_url("/dist/app.css"));
    }
}
