//! Event-driven HTML generation for one parse pass.
//!
//! The writer walks the markdown event stream and emits HTML, buffering each
//! code block so the dispatcher can classify it whole: diagram blocks become
//! empty placeholder containers (filled in later by the preview reconciler),
//! everything else becomes a literal listing. Math events render eagerly to
//! MathML since that path is synchronous.

use std::collections::HashMap;

use markdown_weaver::{
    Alignment, BlockQuoteKind, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag,
    TagEnd,
};
use markdown_weaver_escape::{
    FmtWriter, StrWrite, escape_href, escape_html, escape_html_body_text,
};
use smol_str::SmolStr;

use vellum_diagram::DiagramRequest;

use crate::dispatch::{BlockNode, CodeBlockDescriptor, DiagramDispatcher};
#[cfg(feature = "syntax-highlighting")]
use crate::highlight::Highlighter;
use crate::math;

/// A diagram block discovered during the pass, waiting for its async render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDiagram {
    /// The fence tag that routed the block.
    pub language: SmolStr,
    pub request: DiagramRequest,
}

/// Output of one parse pass. The HTML contains one empty
/// `<div class="diagram" data-diagram-id="...">` per pending diagram.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub html: String,
    pub diagrams: Vec<PendingDiagram>,
}

/// Parser extensions for the preview: GFM tables, task lists, strikethrough,
/// footnotes, alerts, and `$`/`$$` math events.
pub fn document_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
        | Options::ENABLE_MATH
}

/// Render one parse pass with plain (unhighlighted) code listings.
pub fn render_document(source: &str, dispatcher: &DiagramDispatcher) -> RenderedDocument {
    let mut html = String::new();
    let parser = Parser::new_ext(source, document_options());
    let writer = DocumentWriter::new(parser, FmtWriter(&mut html), dispatcher);
    // Writing into a String cannot fail.
    let diagrams = writer.run().unwrap_or_default();
    finish_pass(source, html, diagrams)
}

/// Render one parse pass, highlighting listings whose language the
/// highlighter knows; unknown languages fall back to plain listings.
#[cfg(feature = "syntax-highlighting")]
pub fn render_document_highlighted(
    source: &str,
    dispatcher: &DiagramDispatcher,
    highlighter: &Highlighter,
) -> RenderedDocument {
    let mut html = String::new();
    let parser = Parser::new_ext(source, document_options());
    let writer =
        DocumentWriter::new(parser, FmtWriter(&mut html), dispatcher).with_highlighter(highlighter);
    let diagrams = writer.run().unwrap_or_default();
    finish_pass(source, html, diagrams)
}

fn finish_pass(source: &str, html: String, diagrams: Vec<PendingDiagram>) -> RenderedDocument {
    tracing::debug!(
        source_bytes = source.len(),
        diagrams = diagrams.len(),
        "document pass rendered",
    );
    RenderedDocument { html, diagrams }
}

enum TableState {
    Head,
    Body,
}

struct DocumentWriter<'a, I, W> {
    iter: I,
    writer: W,
    dispatcher: &'a DiagramDispatcher,
    #[cfg(feature = "syntax-highlighting")]
    highlighter: Option<&'a Highlighter>,

    /// Whether or not the last write ended with a newline.
    end_newline: bool,
    /// Buffered `(language, content)` while inside a code block.
    code_buffer: Option<(Option<String>, String)>,
    table_state: TableState,
    table_alignments: Vec<Alignment>,
    table_cell_index: usize,
    numbers: HashMap<CowStr<'a>, usize>,
    diagrams: Vec<PendingDiagram>,
}

impl<'a, I, W> DocumentWriter<'a, I, W>
where
    I: Iterator<Item = Event<'a>>,
    W: StrWrite,
{
    fn new(iter: I, writer: W, dispatcher: &'a DiagramDispatcher) -> Self {
        Self {
            iter,
            writer,
            dispatcher,
            #[cfg(feature = "syntax-highlighting")]
            highlighter: None,
            end_newline: true,
            code_buffer: None,
            table_state: TableState::Head,
            table_alignments: vec![],
            table_cell_index: 0,
            numbers: HashMap::new(),
            diagrams: Vec::new(),
        }
    }

    #[cfg(feature = "syntax-highlighting")]
    fn with_highlighter(mut self, highlighter: &'a Highlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    #[inline]
    fn write_newline(&mut self) -> Result<(), W::Error> {
        self.end_newline = true;
        self.writer.write_str("\n")
    }

    #[inline]
    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)?;
        if !s.is_empty() {
            self.end_newline = s.ends_with('\n');
        }
        Ok(())
    }

    fn run(mut self) -> Result<Vec<PendingDiagram>, W::Error> {
        while let Some(event) = self.iter.next() {
            match event {
                Event::Start(tag) => self.start_tag(tag)?,
                Event::End(tag) => self.end_tag(tag)?,
                Event::Text(text) => {
                    if let Some((_, ref mut buffer)) = self.code_buffer {
                        buffer.push_str(&text);
                    } else {
                        escape_html_body_text(&mut self.writer, &text)?;
                        self.end_newline = text.ends_with('\n');
                    }
                }
                Event::Code(text) => {
                    let descriptor = CodeBlockDescriptor {
                        language: None,
                        inline: true,
                        content: &text,
                    };
                    // Inline descriptors always classify as listings.
                    if let BlockNode::Listing { content, .. } =
                        self.dispatcher.resolve(&descriptor)
                    {
                        self.write("<code>")?;
                        escape_html_body_text(&mut self.writer, &content)?;
                        self.write("</code>")?;
                    }
                }
                Event::InlineMath(text) => {
                    let html = math::math_to_html(&text, false);
                    self.write(&html)?;
                }
                Event::DisplayMath(text) => {
                    let html = math::math_to_html(&text, true);
                    self.write(&html)?;
                }
                Event::Html(html) | Event::InlineHtml(html) => {
                    self.write(&html)?;
                }
                Event::SoftBreak => {
                    self.write_newline()?;
                }
                Event::HardBreak => {
                    self.write("<br />\n")?;
                }
                Event::Rule => {
                    if self.end_newline {
                        self.write("<hr />\n")?;
                    } else {
                        self.write("\n<hr />\n")?;
                    }
                }
                Event::FootnoteReference(name) => {
                    let len = self.numbers.len() + 1;
                    self.write("<sup class=\"footnote-reference\"><a href=\"#")?;
                    escape_html(&mut self.writer, &name)?;
                    self.write("\">")?;
                    let number = *self.numbers.entry(name).or_insert(len);
                    write!(&mut self.writer, "{}", number)?;
                    self.write("</a></sup>")?;
                }
                Event::TaskListMarker(true) => {
                    self.write("<input disabled=\"\" type=\"checkbox\" checked=\"\"/>\n")?;
                }
                Event::TaskListMarker(false) => {
                    self.write("<input disabled=\"\" type=\"checkbox\"/>\n")?;
                }
                _ => {}
            }
        }
        Ok(self.diagrams)
    }

    fn start_tag(&mut self, tag: Tag<'a>) -> Result<(), W::Error> {
        match tag {
            Tag::HtmlBlock => Ok(()),
            Tag::Paragraph(_) => {
                if self.end_newline {
                    self.write("<p>")
                } else {
                    self.write("\n<p>")
                }
            }
            Tag::Heading {
                level, id, classes, ..
            } => {
                if self.end_newline {
                    self.write("<")?;
                } else {
                    self.write("\n<")?;
                }
                write!(&mut self.writer, "{}", level)?;
                if let Some(id) = id {
                    self.write(" id=\"")?;
                    escape_html(&mut self.writer, &id)?;
                    self.write("\"")?;
                }
                let mut classes = classes.iter();
                if let Some(class) = classes.next() {
                    self.write(" class=\"")?;
                    escape_html(&mut self.writer, class)?;
                    for class in classes {
                        self.write(" ")?;
                        escape_html(&mut self.writer, class)?;
                    }
                    self.write("\"")?;
                }
                self.write(">")
            }
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                self.write("<table>")
            }
            Tag::TableHead => {
                self.table_state = TableState::Head;
                self.table_cell_index = 0;
                self.write("<thead><tr>")
            }
            Tag::TableRow => {
                self.table_cell_index = 0;
                self.write("<tr>")
            }
            Tag::TableCell => {
                match self.table_state {
                    TableState::Head => self.write("<th")?,
                    TableState::Body => self.write("<td")?,
                }
                match self.table_alignments.get(self.table_cell_index) {
                    Some(&Alignment::Left) => self.write(" style=\"text-align: left\">"),
                    Some(&Alignment::Center) => self.write(" style=\"text-align: center\">"),
                    Some(&Alignment::Right) => self.write(" style=\"text-align: right\">"),
                    _ => self.write(">"),
                }
            }
            Tag::BlockQuote(kind) => {
                let class_str = match kind {
                    None => "",
                    Some(BlockQuoteKind::Note) => " class=\"markdown-alert-note\"",
                    Some(BlockQuoteKind::Tip) => " class=\"markdown-alert-tip\"",
                    Some(BlockQuoteKind::Important) => " class=\"markdown-alert-important\"",
                    Some(BlockQuoteKind::Warning) => " class=\"markdown-alert-warning\"",
                    Some(BlockQuoteKind::Caution) => " class=\"markdown-alert-caution\"",
                };
                if self.end_newline {
                    self.write(&format!("<blockquote{}>\n", class_str))
                } else {
                    self.write(&format!("\n<blockquote{}>\n", class_str))
                }
            }
            Tag::CodeBlock(info) => {
                if !self.end_newline {
                    self.write_newline()?;
                }
                let language = match info {
                    CodeBlockKind::Fenced(info) => {
                        let lang = info.split(' ').next().unwrap_or("");
                        if lang.is_empty() {
                            None
                        } else {
                            Some(lang.to_string())
                        }
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code_buffer = Some((language, String::new()));
                Ok(())
            }
            Tag::List(Some(1)) => {
                if self.end_newline {
                    self.write("<ol>\n")
                } else {
                    self.write("\n<ol>\n")
                }
            }
            Tag::List(Some(start)) => {
                if self.end_newline {
                    self.write("<ol start=\"")?;
                } else {
                    self.write("\n<ol start=\"")?;
                }
                write!(&mut self.writer, "{}", start)?;
                self.write("\">\n")
            }
            Tag::List(None) => {
                if self.end_newline {
                    self.write("<ul>\n")
                } else {
                    self.write("\n<ul>\n")
                }
            }
            Tag::Item => {
                if self.end_newline {
                    self.write("<li>")
                } else {
                    self.write("\n<li>")
                }
            }
            Tag::Emphasis => self.write("<em>"),
            Tag::Strong => self.write("<strong>"),
            Tag::Strikethrough => self.write("<del>"),
            Tag::Superscript => self.write("<sup>"),
            Tag::Subscript => self.write("<sub>"),
            Tag::Link {
                link_type: LinkType::Email,
                dest_url,
                title,
                ..
            } => {
                self.write("<a href=\"mailto:")?;
                escape_href(&mut self.writer, &dest_url)?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut self.writer, &title)?;
                }
                self.write("\">")
            }
            Tag::Link {
                dest_url, title, ..
            } => {
                self.write("<a href=\"")?;
                escape_href(&mut self.writer, &dest_url)?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut self.writer, &title)?;
                }
                self.write("\">")
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.write("<img src=\"")?;
                escape_href(&mut self.writer, &dest_url)?;
                self.write("\" alt=\"")?;
                self.raw_text()?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut self.writer, &title)?;
                }
                self.write("\" />")
            }
            Tag::FootnoteDefinition(name) => {
                if self.end_newline {
                    self.write("<div class=\"footnote-definition\" id=\"")?;
                } else {
                    self.write("\n<div class=\"footnote-definition\" id=\"")?;
                }
                escape_html(&mut self.writer, &name)?;
                self.write("\"><sup class=\"footnote-definition-label\">")?;
                let len = self.numbers.len() + 1;
                let number = *self.numbers.entry(name).or_insert(len);
                write!(&mut self.writer, "{}", number)?;
                self.write("</sup>")
            }
            _ => Ok(()),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), W::Error> {
        match tag {
            TagEnd::Paragraph(_) => {
                self.write("</p>\n")?;
            }
            TagEnd::Heading(level) => {
                self.write("</")?;
                write!(&mut self.writer, "{}", level)?;
                self.write(">\n")?;
            }
            TagEnd::Table => {
                self.write("</tbody></table>\n")?;
            }
            TagEnd::TableHead => {
                self.write("</tr></thead><tbody>\n")?;
                self.table_state = TableState::Body;
            }
            TagEnd::TableRow => {
                self.write("</tr>\n")?;
            }
            TagEnd::TableCell => {
                match self.table_state {
                    TableState::Head => self.write("</th>")?,
                    TableState::Body => self.write("</td>")?,
                }
                self.table_cell_index += 1;
            }
            TagEnd::BlockQuote(_) => {
                self.write("</blockquote>\n")?;
            }
            TagEnd::CodeBlock => {
                if let Some((language, buffer)) = self.code_buffer.take() {
                    let descriptor = CodeBlockDescriptor {
                        language: language.as_deref(),
                        inline: false,
                        content: &buffer,
                    };
                    match self.dispatcher.resolve(&descriptor) {
                        BlockNode::Diagram { language, request } => {
                            self.write("<div class=\"diagram\" data-diagram-id=\"")?;
                            escape_html(&mut self.writer, &request.identifier)?;
                            self.write("\"></div>\n")?;
                            self.diagrams.push(PendingDiagram { language, request });
                        }
                        BlockNode::Listing { language, content } => {
                            self.write_listing(language.as_deref(), &content)?;
                        }
                    }
                }
            }
            TagEnd::List(true) => {
                self.write("</ol>\n")?;
            }
            TagEnd::List(false) => {
                self.write("</ul>\n")?;
            }
            TagEnd::Item => {
                self.write("</li>\n")?;
            }
            TagEnd::Emphasis => {
                self.write("</em>")?;
            }
            TagEnd::Strong => {
                self.write("</strong>")?;
            }
            TagEnd::Strikethrough => {
                self.write("</del>")?;
            }
            TagEnd::Superscript => {
                self.write("</sup>")?;
            }
            TagEnd::Subscript => {
                self.write("</sub>")?;
            }
            TagEnd::Link => {
                self.write("</a>")?;
            }
            TagEnd::FootnoteDefinition => {
                self.write("</div>\n")?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Emit a literal code listing, highlighted when possible.
    fn write_listing(&mut self, language: Option<&str>, content: &str) -> Result<(), W::Error> {
        #[cfg(feature = "syntax-highlighting")]
        if let (Some(lang), Some(highlighter)) = (language, self.highlighter) {
            match highlighter.highlight(lang, content) {
                Ok(html) => {
                    self.write(&html)?;
                    self.write_newline()?;
                    return Ok(());
                }
                Err(err) => {
                    tracing::trace!(language = lang, error = %err, "falling back to plain listing");
                }
            }
        }
        match language {
            Some(lang) => {
                self.write("<pre><code class=\"language-")?;
                escape_html(&mut self.writer, lang)?;
                self.write("\">")?;
            }
            None => self.write("<pre><code>")?,
        }
        escape_html_body_text(&mut self.writer, content)?;
        self.write("</code></pre>\n")
    }

    // Run raw text, consuming the matching end tag. Used for image alt text.
    fn raw_text(&mut self) -> Result<(), W::Error> {
        let mut nest = 0;
        while let Some(event) = self.iter.next() {
            match event {
                Event::Start(_) => nest += 1,
                Event::End(_) => {
                    if nest == 0 {
                        break;
                    }
                    nest -= 1;
                }
                Event::Html(_) => {}
                Event::InlineHtml(text) | Event::Code(text) | Event::Text(text) => {
                    // The output lands inside an attribute value.
                    escape_html(&mut self.writer, &text)?;
                    self.end_newline = text.ends_with('\n');
                }
                Event::InlineMath(text) => {
                    self.write("$")?;
                    escape_html(&mut self.writer, &text)?;
                    self.write("$")?;
                }
                Event::DisplayMath(text) => {
                    self.write("$$")?;
                    escape_html(&mut self.writer, &text)?;
                    self.write("$$")?;
                }
                Event::SoftBreak | Event::HardBreak | Event::Rule => {
                    self.write(" ")?;
                }
                Event::FootnoteReference(name) => {
                    let len = self.numbers.len() + 1;
                    let number = *self.numbers.entry(name).or_insert(len);
                    write!(&mut self.writer, "[{}]", number)?;
                }
                Event::TaskListMarker(true) => self.write("[x]")?,
                Event::TaskListMarker(false) => self.write("[ ]")?,
                _ => {}
            }
        }
        Ok(())
    }
}
