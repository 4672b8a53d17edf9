// Durable-tier path utilities.
// One JSON file per resource key under the platform cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/stockroom on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "stockroom").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Sanitize a resource key for use in filesystem paths.
/// Replaces problematic characters with underscores.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("products"), "products");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("key:name"), "key_name");
    }
}
