// ABOUTME: Streaming tag-aware text extraction over raw HTML markup.
// ABOUTME: Retains text inside heading, p, code, and li elements and tokenizes it into words.

use quick_xml::events::{BytesRef, Event};
use quick_xml::reader::Reader;

/// Returns true for tag names whose text content is retained.
///
/// Matches "h" followed by zero or more decimal digits ("h", "h1", "h2", ...)
/// and the literal names "p", "code", "li". Comparison is ASCII
/// case-insensitive, as HTML tag names are.
pub fn is_retained_tag(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix('h') {
        if rest.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
    }
    matches!(lower.as_str(), "p" | "code" | "li")
}

/// Resolves an entity reference to its text, or returns it re-wrapped raw.
///
/// Named entities beyond the common ones pass through unresolved rather than
/// failing the scan.
fn resolve_ref(e: &BytesRef) -> String {
    let raw = e.decode().map(|s| s.into_owned()).unwrap_or_default();
    match raw.as_str() {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => "\u{00A0}".to_string(),
        _ => match e.resolve_char_ref() {
            Ok(Some(c)) => c.to_string(),
            _ => format!("&{};", raw),
        },
    }
}

/// Extracts word tokens from the retained text of `html`, in document order.
///
/// The scanner has exactly two states: retaining and skipping (the initial
/// state). A start tag matching [`is_retained_tag`] switches to retaining, a
/// matching end tag switches back. Nesting is not tracked, so a matching end
/// tag inside a retained element stops retention even though the outer
/// element is still open.
///
/// Adjacent text and entity references accumulate into one run; each run is
/// trimmed and split on whitespace at the next markup boundary. Duplicates
/// are kept; callers that want a set dedupe downstream. Malformed markup
/// ends the scan early with whatever was collected so far.
pub fn extract_words(html: &str) -> Vec<String> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut words = Vec::new();
    let mut retaining = false;
    let mut pending = String::new();

    // Tokenize the accumulated text run and reset it.
    fn flush(pending: &mut String, words: &mut Vec<String>) {
        let trimmed = pending.trim();
        if !trimmed.is_empty() {
            words.extend(trimmed.split_whitespace().map(str::to_string));
        }
        pending.clear();
    }

    loop {
        match reader.read_event() {
            Ok(Event::Text(ref e)) => {
                if retaining {
                    pending.push_str(&e.decode().map(|s| s.into_owned()).unwrap_or_default());
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if retaining {
                    pending.push_str(&resolve_ref(e));
                }
            }
            Ok(Event::Start(ref e)) => {
                flush(&mut pending, &mut words);
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if is_retained_tag(&name) {
                    retaining = true;
                }
            }
            Ok(Event::Empty(ref e)) => {
                flush(&mut pending, &mut words);
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                // A self-closing element opens and closes at once, so a
                // matching one leaves the scanner skipping
                if is_retained_tag(&name) {
                    retaining = false;
                }
            }
            Ok(Event::End(ref e)) => {
                flush(&mut pending, &mut words);
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if is_retained_tag(&name) {
                    retaining = false;
                }
            }
            Ok(Event::Eof) => {
                flush(&mut pending, &mut words);
                break;
            }
            Err(_) => {
                flush(&mut pending, &mut words);
                break;
            }
            // Comments, CDATA, doctype, and processing instructions end a
            // text run but carry no words.
            Ok(_) => flush(&mut pending, &mut words),
        }
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn retained_tag_headings() {
        assert!(is_retained_tag("h"));
        assert!(is_retained_tag("h1"));
        assert!(is_retained_tag("h2"));
        assert!(is_retained_tag("h42"));
        assert!(is_retained_tag("H3"));
    }

    #[test]
    fn retained_tag_literals() {
        assert!(is_retained_tag("p"));
        assert!(is_retained_tag("code"));
        assert!(is_retained_tag("li"));
        assert!(is_retained_tag("P"));
    }

    #[test]
    fn retained_tag_rejects_others() {
        // "h" must be followed by digits only
        assert!(!is_retained_tag("html"));
        assert!(!is_retained_tag("head"));
        assert!(!is_retained_tag("header"));
        assert!(!is_retained_tag("hr"));
        assert!(!is_retained_tag("h1x"));

        assert!(!is_retained_tag("div"));
        assert!(!is_retained_tag("span"));
        assert!(!is_retained_tag("pre"));
        assert!(!is_retained_tag(""));
    }

    #[test]
    fn extracts_words_from_retained_elements_only() {
        let html = "<h1>Hello world</h1><div>ignored</div><p>olleH</p>";
        assert_eq!(extract_words(html), vec!["Hello", "world", "olleH"]);
    }

    #[test]
    fn nested_end_tag_stops_retention() {
        // The </code> end tag resets the state even though <p> is still open
        let html = "<p>outer <code>inner</code> tail</p>";
        assert_eq!(extract_words(html), vec!["outer", "inner"]);
    }

    #[test]
    fn list_items_are_retained() {
        let html = "<ul><li>alpha</li><li>beta gamma</li></ul>";
        assert_eq!(extract_words(html), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn bare_h_tag_is_retained() {
        let html = "<h>solo</h>";
        assert_eq!(extract_words(html), vec!["solo"]);
    }

    #[test]
    fn self_closing_retained_tag_resets_state() {
        let html = "<h1>one <p/> two</h1>";
        assert_eq!(extract_words(html), vec!["one"]);
    }

    #[test]
    fn whitespace_only_text_yields_no_words() {
        assert_eq!(extract_words("<p>   \n\t  </p>"), Vec::<String>::new());
    }

    #[test]
    fn duplicates_are_kept_in_document_order() {
        let html = "<p>echo echo</p><li>echo</li>";
        assert_eq!(extract_words(html), vec!["echo", "echo", "echo"]);
    }

    #[test]
    fn top_level_text_is_skipped() {
        let html = "stray <p>kept</p> stray";
        assert_eq!(extract_words(html), vec!["kept"]);
    }

    #[test]
    fn unclosed_markup_is_best_effort() {
        assert_eq!(extract_words("<p>ok"), vec!["ok"]);
        assert_eq!(extract_words(""), Vec::<String>::new());
    }

    #[test]
    fn entity_references_join_surrounding_text() {
        assert_eq!(
            extract_words("<p>fish &amp; chips</p>"),
            vec!["fish", "&", "chips"]
        );
        // A reference inside a token does not split it
        assert_eq!(extract_words("<p>AT&amp;T</p>"), vec!["AT&T"]);
    }

    #[test]
    fn numeric_character_references_resolve() {
        assert_eq!(extract_words("<p>a&#45;b</p>"), vec!["a-b"]);
    }

    #[test]
    fn punctuation_stays_attached_to_words() {
        // No normalization at extraction time
        let html = "<p>Hello, world!</p>";
        assert_eq!(extract_words(html), vec!["Hello,", "world!"]);
    }
}
