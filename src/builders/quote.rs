//! Block quotes, styled by length.

use serde::Serialize;
use tracing::debug;

use super::cache::{content_key, FragmentCache};
use super::non_blank;
use crate::document::QuoteInput;
use crate::error::Result;
use crate::format::escape_html;

/// Quotes with more words than this are long quotes.
pub const LONG_QUOTE_WORDS: usize = 40;

/// A rendered block quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteResult {
    pub html: String,
    pub is_long_quote: bool,
    pub word_count: usize,
    /// Parenthetical `(author, citation)`, empty when both are absent.
    pub citation: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuoteBuilder {
    cache: FragmentCache<QuoteResult>,
}

impl QuoteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a block quote, or return the cached result for an identical input.
    pub fn format_block_quote(&mut self, input: &QuoteInput) -> Result<QuoteResult> {
        let key = content_key(input)?;
        if let Some(hit) = self.cache.get(&key) {
            debug!(words = hit.word_count, "quote cache hit");
            return Ok(hit);
        }

        let word_count = word_count(&input.text);
        let is_long_quote = word_count > LONG_QUOTE_WORDS;
        let result = QuoteResult {
            html: render_quote(input, is_long_quote),
            is_long_quote,
            word_count,
            citation: parenthetical(input.author.as_deref(), input.citation.as_deref()),
        };
        debug!(words = word_count, long = is_long_quote, "rendered quote");

        self.cache.insert(key, result.clone());
        Ok(result)
    }

    /// Number of distinct quotes rendered so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn parenthetical(author: Option<&str>, citation: Option<&str>) -> String {
    let parts: Vec<&str> = [non_blank(author), non_blank(citation)]
        .into_iter()
        .flatten()
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

fn render_quote(input: &QuoteInput, is_long_quote: bool) -> String {
    let class = if is_long_quote {
        "mla-block-quote-long"
    } else {
        "mla-block-quote"
    };

    let mut html = format!("<blockquote class=\"{}\">", class);
    html.push_str(&format!("<p>{}</p>", escape_html(&input.text)));
    if let Some(author) = non_blank(input.author.as_deref()) {
        html.push_str(&format!("<cite>{}</cite>", escape_html(author)));
    }
    if let Some(citation) = non_blank(input.citation.as_deref()) {
        html.push_str(&format!(
            "<span class=\"citation\">({})</span>",
            escape_html(citation)
        ));
    }
    html.push_str("</blockquote>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn quote(text: String) -> QuoteInput {
        QuoteInput {
            text,
            author: None,
            citation: None,
        }
    }

    #[test]
    fn test_forty_words_is_short() {
        let mut builder = QuoteBuilder::new();
        let result = builder.format_block_quote(&quote(words(40))).unwrap();

        assert!(!result.is_long_quote);
        assert!(result.html.starts_with("<blockquote class=\"mla-block-quote\">"));
    }

    #[test]
    fn test_forty_one_words_is_long() {
        let mut builder = QuoteBuilder::new();
        let result = builder.format_block_quote(&quote(words(41))).unwrap();

        assert!(result.is_long_quote);
        assert_eq!(result.word_count, 41);
        assert!(result.html.starts_with("<blockquote class=\"mla-block-quote-long\">"));
    }

    #[test]
    fn test_word_count_ignores_whitespace_runs() {
        assert_eq!(word_count("  one\n\ttwo   three "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_author_and_citation() {
        let mut builder = QuoteBuilder::new();
        let input = QuoteInput {
            text: "So it goes.".into(),
            author: Some("Vonnegut".into()),
            citation: Some("p. 27".into()),
        };
        let result = builder.format_block_quote(&input).unwrap();

        assert_eq!(
            result.html,
            "<blockquote class=\"mla-block-quote\"><p>So it goes.</p><cite>Vonnegut</cite>\
             <span class=\"citation\">(p. 27)</span></blockquote>\n"
        );
        assert_eq!(result.citation, "(Vonnegut, p. 27)");
    }

    #[test]
    fn test_absent_parts_are_omitted() {
        let mut builder = QuoteBuilder::new();
        let result = builder
            .format_block_quote(&quote("Call me Ishmael.".into()))
            .unwrap();

        assert!(!result.html.contains("<cite>"));
        assert!(!result.html.contains("citation"));
        assert_eq!(result.citation, "");
    }

    #[test]
    fn test_citation_only() {
        let mut builder = QuoteBuilder::new();
        let input = QuoteInput {
            text: "Call me Ishmael.".into(),
            author: Some("  ".into()),
            citation: Some("Melville 1".into()),
        };
        let result = builder.format_block_quote(&input).unwrap();

        assert!(!result.html.contains("<cite>"));
        assert_eq!(result.citation, "(Melville 1)");
    }

    #[test]
    fn test_identical_quote_is_cached() {
        let mut builder = QuoteBuilder::new();
        let first = builder.format_block_quote(&quote("Again.".into())).unwrap();
        let second = builder.format_block_quote(&quote("Again.".into())).unwrap();

        assert_eq!(first, second);
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_quote_text_is_escaped() {
        let mut builder = QuoteBuilder::new();
        let result = builder
            .format_block_quote(&quote("<script>x</script>".into()))
            .unwrap();
        assert!(result.html.contains("<p>&lt;script&gt;x&lt;/script&gt;</p>"));
    }
}
