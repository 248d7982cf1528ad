use std::path::Path;

use sassdown::config::{Config, CONFIG_FILE};
use sassdown::error::{Chainable, Result};

use crate::flags::Sassdown;

/// Reads the configuration file, if any, and applies `flags` over it. Paths
/// are resolved against `cwd`.
pub fn load(flags: Sassdown, cwd: &Path) -> Result<Config> {
    let mut config = match &flags.config {
        Some(path) => Config::read(cwd.join(path))?,
        None if cwd.join(CONFIG_FILE).is_file() => Config::read(cwd.join(CONFIG_FILE))?,
        None => Config::default(),
    };

    apply(&mut config, flags);
    config.absolutize(cwd);
    Ok(config)
}

fn apply(config: &mut Config, flags: Sassdown) {
    fn set<T>(slot: &mut T, value: Option<T>) {
        if let Some(value) = value {
            *slot = value;
        }
    }

    set(&mut config.src, flags.src);
    set(&mut config.dest, flags.dest);
    set(&mut config.title, flags.title);
    set(&mut config.highlight, flags.highlight);
    set(&mut config.comment_start, flags.comment_start);
    set(&mut config.comment_end, flags.comment_end);
    config.readme = flags.readme.or(config.readme.take());
    config.template = flags.template.or(config.template.take());
    config.theme = flags.theme.or(config.theme.take());

    if !flags.files.is_empty() {
        config.files = flags.files;
    }

    config.assets.extend(flags.asset);
    config.scripts.extend(flags.script);
    config.exclude_missing |= flags.exclude_missing;
    config.dry_run |= flags.dry_run;
}

/// The working directory.
pub fn cwd() -> Result<std::path::PathBuf> {
    std::env::current_dir().chain(sassdown::error!("failed to determine working directory"))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;
    use std::path::Path;

    use crate::flags::Sassdown;
    use super::load;

    fn flags(args: &[&str]) -> Sassdown {
        Sassdown::from_vec(args.iter().map(OsString::from).collect()).unwrap()
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path();
        fs::write(cwd.join("sassdown.toml"), concat!(
            "src = \"styles\"\n",
            "title = \"Acme\"\n",
            "assets = [\"dist/app.css\"]\n",
            "files = [\"*.scss\"]\n",
        )).unwrap();

        let config = load(flags(&["--title", "Acme UI", "--asset", "dist/print.css", "-n"]), cwd).unwrap();
        assert_eq!(config.title, "Acme UI");
        assert_eq!(config.src, cwd.join("styles"));
        assert_eq!(config.dest, cwd.join("styleguide"));
        assert_eq!(config.files, ["*.scss"]);
        assert_eq!(config.assets, ["dist/app.css", "dist/print.css"]);
        assert!(config.dry_run);
        assert!(config.excludes_missing());
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let error = load(flags(&["--config", "missing.toml"]), dir.path()).unwrap_err();
        assert_eq!(error.message(), "failed to read configuration file");
    }

    #[test]
    fn defaults_without_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(flags(&["--files", "a.scss", "--files", "b.scss", "--src", "/abs"]), dir.path())
            .unwrap();

        assert_eq!(config.src, Path::new("/abs"));
        assert_eq!(config.files, ["a.scss", "b.scss"]);
        assert_eq!(config.title, "Styleguide");
        assert!(config.readme.is_none());
    }
}
