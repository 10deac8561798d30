//! Markdown rendering with syntax highlighting and heading anchors

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::ContentError;
use crate::config::HighlightConfig;
use crate::theme::Theme;

/// Language token used for code blocks that do not declare one
const PLAIN_LANGUAGE: &str = "text";

/// Markdown renderer with class-based syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    highlight: HighlightConfig,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom highlight themes
    pub fn with_options(highlight: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            highlight: highlight.clone(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String, ContentError> {
        // Front-matter is stripped before rendering, so YAML metadata
        // blocks stay disabled
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block_lang = Some(code_language(&kind));
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(lang) = code_block_lang.take() {
                        let highlighted = self.highlight_code(&code_block_content, &lang)?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block_lang.is_some() => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        assign_heading_ids(&mut events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block into class-annotated spans
    fn highlight_code(&self, code: &str, lang: &str) -> Result<String, ContentError> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        let lang = html_escape(lang);
        Ok(format!(
            r#"<pre data-language="{}"><code class="language-{}">{}</code></pre>"#,
            lang,
            lang,
            generator.finalize()
        ))
    }

    /// Stylesheet for highlighted code under a site theme
    pub fn theme_css(&self, theme: Theme) -> Result<String, ContentError> {
        let name = self.highlight.theme_for(theme);
        let highlight_theme = self
            .theme_set
            .themes
            .get(name)
            .ok_or_else(|| ContentError::Render(format!("unknown highlight theme: {}", name)))?;
        Ok(css_for_theme_with_class_style(
            highlight_theme,
            ClassStyle::Spaced,
        )?)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a fenced block's info string
fn code_language(kind: &CodeBlockKind) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .unwrap_or(PLAIN_LANGUAGE)
            .to_string(),
        CodeBlockKind::Indented => PLAIN_LANGUAGE.to_string(),
    }
}

/// Give every heading an id: the explicit `{#id}` if written, otherwise the
/// slugified heading text, suffixed `-1`, `-2`, ... on repeats
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used: HashSet<String> = HashSet::new();
    let mut i = 0;

    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Heading { .. })) {
            let end = events[i..]
                .iter()
                .position(|e| matches!(e, Event::End(TagEnd::Heading(_))))
                .map_or(events.len(), |pos| i + pos);
            let text = heading_text(&events[i + 1..end]);

            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                let anchor = match id.take() {
                    Some(explicit) => {
                        used.insert(explicit.to_string());
                        explicit.to_string()
                    }
                    None => unique_id(&mut used, slug::slugify(&text)),
                };
                *id = Some(CowStr::from(anchor));
            }
            i = end;
        }
        i += 1;
    }
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        if let Event::Text(t) | Event::Code(t) = event {
            text.push_str(t);
        }
    }
    text
}

fn unique_id(used: &mut HashSet<String>, base: String) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
