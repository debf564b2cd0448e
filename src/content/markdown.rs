//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::frontmatter::{self, RawRecord};
use crate::config::{HighlightConfig, MarkdownConfig};
use crate::error::Result;

lazy_static! {
    static ref BARE_URL: Regex =
        Regex::new(r#"\b(?:https?://|www\.)[^\s<>"']+"#).expect("bare URL pattern is valid");
}

/// A document split into raw front-matter, markdown body and HTML
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Parsed but unvalidated front-matter
    pub front_matter: RawRecord,
    /// The markdown body as written
    pub content: String,
    pub content_html: String,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    raw_html: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default(), &MarkdownConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(highlight: &HighlightConfig, markdown: &MarkdownConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: highlight.theme.clone(),
            line_numbers: highlight.line_number,
            raw_html: markdown.raw_html,
        }
    }

    /// Split front-matter off `contents` and render the body
    ///
    /// `document` names the source in parse errors.
    pub fn render(&self, document: &str, contents: &str) -> Result<RenderedDocument> {
        let (front_matter, body) = frontmatter::parse(document, contents)?;
        let content_html = self.render_html(body);
        Ok(RenderedDocument {
            front_matter,
            content: body.to_string(),
            content_html,
        })
    }

    /// Render markdown to HTML
    pub fn render_html(&self, markdown: &str) -> String {
        // Front-matter is handled separately, so no YAML metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        // Merged so a bare URL never arrives split across text events
        let parser = TextMergeStream::new(Parser::new_ext(markdown, options));

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        // Inside links and image alt text, URLs stay as written
        let mut link_depth = 0usize;

        for event in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlight_code(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                    link_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Text(text) if link_depth == 0 && BARE_URL.is_match(&text) => {
                    autolink(&text, &mut events);
                }
                Event::Html(raw) | Event::InlineHtml(raw) if !self.raw_html => {
                    events.push(Event::Text(raw));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        sanitize(&html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => {
                tracing::debug!("Falling back to plain code block for {}", lang);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    html_escape(lang),
                    html_escape(code)
                )
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip scripts, event handlers and unsafe URLs from rendered HTML
///
/// Hand-written markup keeps its classes and ids, and highlighted code
/// keeps its inline colors.
fn sanitize(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .link_rel(None)
        .add_tags(["figure", "figcaption", "input"])
        .add_generic_attributes(["class", "id"])
        .add_tag_attributes("input", ["type", "checked", "disabled"])
        .add_tag_attributes("pre", ["style"])
        .add_tag_attributes("span", ["style"])
        .add_tag_attributes("th", ["style"])
        .add_tag_attributes("td", ["style"]);
    builder.clean(html).to_string()
}

/// Whether a matched URL names a host like `example.com`
fn has_dotted_host(url: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split(['/', '?', '#', ':']).next().unwrap_or_default();
    host.contains('.') && host.split('.').all(|label| !label.is_empty())
}

/// Turn bare URLs in a text run into links
fn autolink<'a>(text: &str, events: &mut Vec<Event<'a>>) {
    let mut last = 0;
    for m in BARE_URL.find_iter(text) {
        let url = m
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']']);
        if !has_dotted_host(url) {
            continue;
        }
        let start = m.start();
        let end = start + url.len();

        if start > last {
            events.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }

        let href = if url.starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        events.push(Event::InlineHtml(CowStr::from(format!(
            r#"<a href="{}">{}</a>"#,
            html_escape(&href),
            html_escape(url)
        ))));
        last = end;
    }

    if last < text.len() {
        events.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
