use scraper::{Html, Selector};
use tracing::debug;

/// Collect every `<source src="...">` value in document order.
///
/// Values are trimmed and empty ones dropped. Duplicates are kept, each
/// occurrence gets its own check.
pub fn extract_media_references(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let source_selector = Selector::parse("source[src]").unwrap();

    document
        .select(&source_selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .inspect(|src| debug!("Found media reference: {}", src))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_document_order() {
        let html = r#"<html><body>
            <video><source src="a.mp4" type="video/mp4"></video>
            <video controls>
                <source type="video/webm" src='//cdn/b.webm'>
                <source src="https://other.com/c.mp4">
            </video>
        </body></html>"#;

        assert_eq!(
            extract_media_references(html),
            vec!["a.mp4", "//cdn/b.webm", "https://other.com/c.mp4"]
        );
    }

    #[test]
    fn test_skips_empty_and_missing_src() {
        let html = r#"<video><source src=""><source src="   "><source type="video/mp4"><source src=" x.mp4 "></video>"#;
        assert_eq!(extract_media_references(html), vec!["x.mp4"]);
    }

    #[test]
    fn test_ignores_other_src_attributes() {
        let html = r#"<img src="logo.png"><script src="app.js"></script><video src="direct.mp4"></video>"#;
        assert!(extract_media_references(html).is_empty());
    }

    #[test]
    fn test_keeps_duplicates() {
        let html = r#"<video><source src="/Testimonials/a.mp4"></video>
                      <video><source src="/Testimonials/a.mp4"></video>"#;
        assert_eq!(extract_media_references(html).len(), 2);
    }

    #[test]
    fn test_decodes_entities_in_src() {
        let html = r#"<video><source src="/video.mp4?w=1&amp;h=2"></video>"#;
        assert_eq!(extract_media_references(html), vec!["/video.mp4?w=1&h=2"]);
    }

    #[test]
    fn test_uppercase_tags() {
        let html = r#"<VIDEO><SOURCE SRC="loud.mp4"></VIDEO>"#;
        assert_eq!(extract_media_references(html), vec!["loud.mp4"]);
    }
}
