//! Renders article markdown into the HTML that feed previews are cut from.

use pulldown_cmark::{html, Options, Parser};

/// Converts `markdown` to HTML, appending the result to `w`. Footnotes, smart
/// punctuation, strikethrough, tables, and task lists are enabled.
pub fn to_html(w: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    html::push_html(w, Parser::new_ext(markdown, options));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paragraphs_become_p_elements() {
        let mut out = String::new();
        to_html(&mut out, "first\n\nsecond\n\nthird\n");
        assert_eq!("<p>first</p>\n<p>second</p>\n<p>third</p>\n", out);
    }

    #[test]
    fn test_appends_to_existing_output() {
        let mut out = String::from("<!-- body -->");
        to_html(&mut out, "~~gone~~");
        assert_eq!("<!-- body --><p><del>gone</del></p>\n", out);
    }
}
