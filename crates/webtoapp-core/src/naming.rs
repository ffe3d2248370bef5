//! Name and URL normalization for generated artifacts.
//!
//! Launcher scripts and storage directories use an underscore slug while
//! shortcut files use a hyphen slug. Both are derived from the same display
//! name.

use crate::error::{Result, WebToAppError};
use url::Url;

/// Slug used for launcher scripts and storage directories.
///
/// Lower-cases the name and replaces spaces with underscores.
pub fn launcher_slug(name: &str) -> String {
    slug_with(name, '_')
}

/// Slug used for `.desktop` shortcut files.
///
/// Lower-cases the name and replaces spaces with hyphens.
pub fn shortcut_slug(name: &str) -> String {
    slug_with(name, '-')
}

fn slug_with(name: &str, space: char) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' => space,
            // Path separators would escape the target directory.
            '/' | '\\' | '\0' => space,
            other => other,
        })
        .collect();

    // All-dot slugs would resolve to the target directory or its parent.
    if slug.chars().all(|c| c == '.') {
        slug.replace('.', &space.to_string()) + &space.to_string()
    } else {
        slug
    }
}

/// Prepend `https://` when the input carries no `http://` or `https://` scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Normalize and validate a user-supplied URL.
///
/// The stored form is the normalized input string, not the parser's
/// canonical form, so `https://example.com` stays without a trailing slash.
pub fn parse_app_url(input: &str) -> Result<String> {
    if input.trim().is_empty() {
        return Err(WebToAppError::validation("url", "URL is required"));
    }

    let normalized = normalize_url(input);
    let parsed = Url::parse(&normalized)
        .map_err(|e| WebToAppError::validation("url", format!("{}: {}", normalized, e)))?;

    if parsed.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(WebToAppError::validation(
            "url",
            format!("{} has no host", normalized),
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_diverge_on_spaces() {
        assert_eq!(launcher_slug("My Tool"), "my_tool");
        assert_eq!(shortcut_slug("My Tool"), "my-tool");
        assert_eq!(launcher_slug("Mail"), shortcut_slug("Mail"));
    }

    #[test]
    fn test_slug_keeps_other_characters() {
        assert_eq!(launcher_slug("Dev.Docs (Beta)"), "dev.docs_(beta)");
        assert_eq!(shortcut_slug("ÄPFEL Markt"), "äpfel-markt");
    }

    #[test]
    fn test_slug_strips_path_separators() {
        assert_eq!(launcher_slug("a/b"), "a_b");
        assert_eq!(shortcut_slug("../x"), "..-x");
    }

    #[test]
    fn test_dot_names_become_plain_file_names() {
        assert_eq!(launcher_slug(".."), "___");
        assert_eq!(launcher_slug("."), "__");
        assert_eq!(shortcut_slug(".."), "---");
        assert_eq!(launcher_slug(""), "_");
        assert_eq!(launcher_slug("..."), "____");
        assert_eq!(launcher_slug(".hidden"), ".hidden");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(
            normalize_url("https://example.com/path?q=1"),
            "https://example.com/path?q=1"
        );
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn test_parse_app_url_rejects_empty() {
        let err = parse_app_url("   ").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_app_url_rejects_garbage() {
        assert!(parse_app_url("not a url").is_err());
    }

    #[test]
    fn test_parse_app_url_keeps_input_form() {
        assert_eq!(parse_app_url("example.com").unwrap(), "https://example.com");
    }
}
