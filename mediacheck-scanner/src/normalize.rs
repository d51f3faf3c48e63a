use url::Url;

/// Turn a `src` value into an absolute URL.
///
/// - `http://` / `https://` values are returned unchanged
/// - protocol-relative values (`//host/...`) get `https:` prepended
/// - anything else is resolved against `base`, with a trailing slash ensured
///   so the last path segment of the base is kept
pub fn normalize_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    if path.starts_with("//") {
        return format!("https:{}", path);
    }

    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };

    match Url::parse(&base).and_then(|b| b.join(path)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{}{}", base, path.trim_start_matches('/')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_passthrough() {
        assert_eq!(
            normalize_url("https://ionora.in", "https://other.com/a.mp4"),
            "https://other.com/a.mp4"
        );
        assert_eq!(
            normalize_url("https://ionora.in", "http://other.com/a b.mp4"),
            "http://other.com/a b.mp4"
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            normalize_url("https://ionora.in", "//cdn.example.com/x.mp4"),
            "https://cdn.example.com/x.mp4"
        );
        assert_eq!(normalize_url("http://localhost:3000", "//cdn/b.mp4"), "https://cdn/b.mp4");
    }

    #[test]
    fn test_relative_join() {
        assert_eq!(
            normalize_url("https://ionora.in", "media/clip.mp4"),
            "https://ionora.in/media/clip.mp4"
        );
        assert_eq!(
            normalize_url("https://ionora.in/", "media/clip.mp4"),
            "https://ionora.in/media/clip.mp4"
        );
    }

    #[test]
    fn test_root_relative_join() {
        assert_eq!(
            normalize_url("https://ionora.in/products", "/Testimonials/clip.mp4"),
            "https://ionora.in/Testimonials/clip.mp4"
        );
    }

    #[test]
    fn test_base_path_is_kept_as_directory() {
        assert_eq!(
            normalize_url("https://ionora.in/about", "clip.mp4"),
            "https://ionora.in/about/clip.mp4"
        );
        assert_eq!(
            normalize_url("https://ionora.in/about", "../clip.mp4"),
            "https://ionora.in/clip.mp4"
        );
    }

    #[test]
    fn test_encoded_file_names_survive() {
        assert_eq!(
            normalize_url(
                "https://ionora.in",
                "/Testimonials/LIFE%20Ionizer%20Advanced%20Education%20Part%201.mp4"
            ),
            "https://ionora.in/Testimonials/LIFE%20Ionizer%20Advanced%20Education%20Part%201.mp4"
        );
    }

    #[test]
    fn test_unparseable_base_falls_back_to_concatenation() {
        assert_eq!(normalize_url("not a base", "clip.mp4"), "not a base/clip.mp4");
    }
}
