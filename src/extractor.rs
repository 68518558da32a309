use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};

/// Character budget for the tag-stripping strategy.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Elements whose text never counts as article content.
const BOILERPLATE_TAGS: [&str; 4] = ["nav", "header", "footer", "aside"];

/// Best-effort readable content for a page. `text` may be empty; callers
/// treat that as a terminal failure before summarizing.
#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    pub title: String,
    pub text: String,
}

// Create static selectors to avoid recompiling them each time
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("Failed to parse title selector"));

static OG_TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("Failed to parse og:title selector")
});

static META_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Failed to parse description selector")
});

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("Failed to parse heading selector"));

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to parse paragraph selector"));

static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("Failed to parse h1 selector"));

/// DOM-based strategy: readability first, falling back to basic scraping when
/// it yields nothing usable. Errors when no content-bearing node is found.
pub fn extract_readable(html: &str, url: &Url) -> Result<ExtractedArticle> {
    if let Ok(article) = readability::extractor::extract(&mut html.as_bytes(), url)
        && !article.text.trim().is_empty()
    {
        // A missing title is not fatal; try the meta/h1 ladder, else leave it
        // empty.
        let title = if article.title.trim().is_empty() {
            extract_title(&Html::parse_document(html)).unwrap_or_default()
        } else {
            article.title
        };
        return Ok(ExtractedArticle {
            title,
            text: article.text,
        });
    }

    fallback_extract(html).ok_or(AppError::Extract)
}

/// Tag-stripping strategy: concatenate the page title, the `description` meta
/// tag, heading text and paragraph text, skipping navigation/boilerplate
/// containers, truncated to [`MAX_CONTENT_CHARS`]. Always yields an article,
/// possibly with empty text.
pub fn strip_tags(html: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let headings = document
        .select(&HEADING_SELECTOR)
        .filter(|el| !in_boilerplate(*el))
        .map(element_text)
        .collect::<Vec<_>>()
        .join(" ");

    let paragraphs = document
        .select(&PARAGRAPH_SELECTOR)
        .filter(|el| !in_boilerplate(*el))
        .map(element_text)
        .collect::<Vec<_>>()
        .join(" ");

    let combined = format!("{} {} {} {}", title, description, headings, paragraphs);
    let text = truncate_chars(&combined, MAX_CONTENT_CHARS);

    ExtractedArticle { title, text }
}

/// Descendant text with `<script>`/`<style>` content left out, so inline
/// scripts inside a paragraph or heading never reach the model prompt.
fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        if let Some(text) = node.value().as_text()
            && !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| matches!(a.value().name(), "script" | "style"))
        {
            out.push_str(text);
        }
    }
    out
}

fn in_boilerplate(element: ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BOILERPLATE_TAGS.contains(&ancestor.value().name()))
}

fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn fallback_extract(html: &str) -> Option<ExtractedArticle> {
    let document = Html::parse_document(html);

    let text = extract_main_text(&document);
    if text.trim().is_empty() {
        return None;
    }

    let title = extract_title(&document).unwrap_or_default();
    Some(ExtractedArticle { title, text })
}

fn extract_title(document: &Html) -> Option<String> {
    if let Some(element) = document.select(&OG_TITLE_SELECTOR).next()
        && let Some(content) = element.value().attr("content")
    {
        return Some(content.to_string());
    }

    if let Some(element) = document.select(&TITLE_SELECTOR).next() {
        let title = element.text().collect::<String>().trim().to_string();
        if !title.is_empty() {
            return Some(title);
        }
    }

    if let Some(element) = document.select(&H1_SELECTOR).next() {
        let title = element.text().collect::<String>().trim().to_string();
        if !title.is_empty() {
            return Some(title);
        }
    }

    None
}

fn extract_main_text(document: &Html) -> String {
    let content_selectors = ["article", "main", "[role='main']", "#content", ".content"];

    for selector_str in content_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>();
                if text.trim().len() > 100 {
                    return text;
                }
            }
        }
    }

    // Last resort: the whole body
    if let Ok(body_selector) = Selector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return body.text().collect::<String>();
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_concatenates_title_description_headings_and_paragraphs() {
        let html = concat!(
            "<html><head>",
            "<title>Page Title</title>",
            r#"<meta name="description" content="A short description.">"#,
            "<style>body { color: red; }</style>",
            "<script>alert('nope');</script>",
            "</head><body>",
            "<h1>Main Heading</h1>",
            "<h2>Sub Heading</h2>",
            "<p>First paragraph.</p>",
            "<p>Second paragraph.<script>var secret = 'LEAKED';</script></p>",
            "</body></html>"
        );

        let article = strip_tags(html);

        assert_eq!(article.title, "Page Title");
        assert_eq!(
            article.text,
            "Page Title A short description. Main Heading Sub Heading First paragraph. Second paragraph."
        );
        assert!(!article.text.contains("alert"));
        assert!(!article.text.contains("color"));
        assert!(!article.text.contains("LEAKED"));
    }

    #[test]
    fn strip_tags_drops_inline_script_and_style_text() {
        let html = concat!(
            "<html><head><title>T</title></head><body>",
            "<p>Visible text.<script>var secret = 'LEAKED';</script></p>",
            "<h2>Heading<style>.x { display: none; }</style></h2>",
            "</body></html>"
        );

        let article = strip_tags(html);

        assert!(!article.text.contains("LEAKED"));
        assert!(!article.text.contains("display"));
        assert!(article.text.contains("Visible text."));
        assert!(article.text.contains("Heading"));
    }

    #[test]
    fn strip_tags_skips_boilerplate_containers() {
        let html = concat!(
            "<html><head><title>T</title></head><body>",
            "<nav><p>Navigation link</p></nav>",
            "<header><h1>Site banner</h1></header>",
            "<p>Actual content.</p>",
            "<footer><p>Copyright notice</p></footer>",
            "<aside><p>Advert</p></aside>",
            "</body></html>"
        );

        let article = strip_tags(html);

        assert_eq!(article.text, "T   Actual content.");
        assert!(!article.text.contains("Navigation"));
        assert!(!article.text.contains("banner"));
        assert!(!article.text.contains("Copyright"));
        assert!(!article.text.contains("Advert"));
    }

    #[test]
    fn strip_tags_truncates_at_exactly_the_character_budget() {
        let long_paragraph = "a".repeat(3 * MAX_CONTENT_CHARS);
        let html = format!("<html><head><title>T</title></head><body><p>{}</p></body></html>", long_paragraph);

        let article = strip_tags(&html);

        assert_eq!(article.text.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn strip_tags_yields_only_whitespace_for_an_empty_document() {
        let article = strip_tags("<html><head></head><body></body></html>");

        assert_eq!(article.title, "");
        assert!(article.text.trim().is_empty());
    }

    #[test]
    fn extract_readable_finds_title_and_text_in_a_minimal_page() {
        let url = Url::parse("https://example.com").unwrap();
        let article = extract_readable("<title>T</title><p>Hello world.</p>", &url).unwrap();

        assert_eq!(article.title, "T");
        assert!(article.text.contains("Hello world."));
    }

    #[test]
    fn extract_readable_prefers_the_article_element() {
        let html = concat!(
            "<html><head><title>Sample Article - News Site</title></head><body>",
            "<nav><a href=\"/\">Home</a></nav>",
            "<article>",
            "<p>This is the first paragraph of the article body, which carries ",
            "enough text to count as real content for the heuristics.</p>",
            "<p>This is the second paragraph with some more words in it.</p>",
            "</article>",
            "</body></html>"
        );

        let url = Url::parse("https://example.com/article").unwrap();
        let article = extract_readable(html, &url).unwrap();

        assert!(article.title.contains("Sample Article"));
        assert!(article.text.contains("first paragraph"));
        assert!(article.text.contains("second paragraph"));
    }

    #[test]
    fn extract_readable_accepts_pages_without_a_title() {
        let html = concat!(
            "<html><head></head><body>",
            "<p>Body text that stands on its own without any title element, ",
            "heading or metadata anywhere in the document.</p>",
            "</body></html>"
        );

        let url = Url::parse("https://example.com").unwrap();
        let article = extract_readable(html, &url).unwrap();

        assert!(article.title.is_empty());
        assert!(article.text.contains("stands on its own"));
    }

    #[test]
    fn extract_readable_fails_when_no_text_remains() {
        let url = Url::parse("https://example.com").unwrap();
        let result = extract_readable("<html><head></head><body></body></html>", &url);

        assert!(result.is_err());
    }
}
