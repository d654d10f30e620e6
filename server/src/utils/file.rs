//! Path helpers for config file locations

use std::path::PathBuf;

/// Expand `~` and make relative paths absolute against the current directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_unchanged() {
        assert_eq!(
            expand_path("/etc/zipkin/zipkin.json"),
            PathBuf::from("/etc/zipkin/zipkin.json")
        );
    }

    #[test]
    fn test_tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(
                expand_path("~/.zipkin/zipkin.json"),
                home.join(".zipkin").join("zipkin.json")
            );
        }
    }

    #[test]
    fn test_relative_path_made_absolute() {
        let result = expand_path("zipkin.json");
        assert!(result.is_absolute());
        assert!(result.ends_with("zipkin.json"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(expand_path("  /tmp/zipkin.json "), PathBuf::from("/tmp/zipkin.json"));
    }
}
