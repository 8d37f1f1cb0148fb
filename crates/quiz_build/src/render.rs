//! Markdown → HTML with a table of render rules keyed by node kind.
//!
//! The parser's event stream is rendered with `pulldown_cmark::html`, except
//! for node kinds that have a rule: their inner events are rendered first and
//! the rule turns that inner HTML into the node's HTML. Nested overridden
//! nodes are handled inside-out.

use std::collections::HashMap;
use std::fmt;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Markdown node kinds a rule can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading,
    BlockQuote,
    ListItem,
}

/// What a render rule sees: the node kind, its facts, and its rendered content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'a> {
    pub kind: NodeKind,
    /// Heading level 1-6; 0 for other kinds.
    pub level: u8,
    /// List item carries the correct marker (`- [x]`).
    pub correct: bool,
    pub inner_html: &'a str,
    /// List items: the inline text of the first paragraph, unwrapped.
    /// Empty for other kinds.
    pub lead_html: &'a str,
    /// List items: the block content after the lead (explanations, nested
    /// lists). Equals `inner_html` for other kinds.
    pub tail_html: &'a str,
}

pub type RenderFn = fn(&Node<'_>) -> String;

/// Dispatch table from node kind to render function.
#[derive(Clone, Default)]
pub struct RenderRules {
    rules: HashMap<NodeKind, RenderFn>,
}

impl fmt::Debug for RenderRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.rules.keys().collect();
        kinds.sort_by_key(|k| format!("{:?}", k));
        f.debug_struct("RenderRules").field("kinds", &kinds).finish()
    }
}

impl RenderRules {
    /// No overrides: plain CommonMark HTML.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Quiz rules: title/heading classes, explanation disclosures, checkbox options.
    pub fn quiz() -> Self {
        Self::empty()
            .with_rule(NodeKind::Heading, quiz_heading)
            .with_rule(NodeKind::BlockQuote, quiz_explanation)
            .with_rule(NodeKind::ListItem, quiz_option)
    }

    pub fn with_rule(mut self, kind: NodeKind, rule: RenderFn) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    pub fn get(&self, kind: NodeKind) -> Option<RenderFn> {
        self.rules.get(&kind).copied()
    }
}

pub const CORRECT_CLASS: &str = "quiz-option-correct";

fn quiz_heading(node: &Node<'_>) -> String {
    if node.level == 1 {
        format!("<h1 class=\"quiz-title\">{}</h1>\n", node.inner_html)
    } else {
        format!(
            "<h{level} class=\"quiz-heading\">{}</h{level}>\n",
            node.inner_html,
            level = node.level
        )
    }
}

fn quiz_explanation(node: &Node<'_>) -> String {
    format!(
        "<details class=\"quiz-explanation\">\n<summary>Explanation</summary>\n{}</details>\n",
        node.inner_html
    )
}

fn quiz_option(node: &Node<'_>) -> String {
    let class = if node.correct {
        format!("quiz-option {}", CORRECT_CLASS)
    } else {
        "quiz-option".to_string()
    };
    let tail = node.tail_html.trim();
    format!(
        "<li class=\"{}\"><label><input type=\"checkbox\"> {}</label>{}{}</li>\n",
        class,
        node.lead_html.trim(),
        if tail.is_empty() { "" } else { "\n" },
        tail
    )
}

/// Events collected for one overridden node (or the document root).
struct Frame<'a> {
    kind: Option<NodeKind>,
    level: u8,
    correct: bool,
    events: Vec<Event<'a>>,
}

impl<'a> Frame<'a> {
    fn root() -> Self {
        Self::open(None, 0)
    }

    fn open(kind: Option<NodeKind>, level: u8) -> Self {
        Self {
            kind,
            level,
            correct: false,
            events: Vec::new(),
        }
    }
}

fn opens(tag: &Tag<'_>) -> Option<(NodeKind, u8)> {
    match tag {
        Tag::Heading { level, .. } => Some((NodeKind::Heading, *level as u8)),
        Tag::BlockQuote(_) => Some((NodeKind::BlockQuote, 0)),
        Tag::Item => Some((NodeKind::ListItem, 0)),
        _ => None,
    }
}

fn closes(tag: &TagEnd) -> Option<NodeKind> {
    match tag {
        TagEnd::Heading(_) => Some(NodeKind::Heading),
        TagEnd::BlockQuote(_) => Some(NodeKind::BlockQuote),
        TagEnd::Item => Some(NodeKind::ListItem),
        _ => None,
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render `markdown` to HTML, applying `rules` to the node kinds they cover.
/// Input pulldown-cmark cannot structure is passed through as text.
pub fn render_quiz(markdown: &str, rules: &RenderRules) -> String {
    let mut stack: Vec<Frame<'_>> = vec![Frame::root()];

    for event in Parser::new_ext(markdown, parser_options()) {
        match &event {
            Event::Start(tag) => {
                if let Some((kind, level)) = opens(tag).filter(|(k, _)| rules.get(*k).is_some()) {
                    stack.push(Frame::open(Some(kind), level));
                    continue;
                }
            }
            Event::End(tag) => {
                if let Some(kind) = closes(tag) {
                    if let Some(rule) = rules.get(kind) {
                        if stack.len() > 1 && stack.last().and_then(|f| f.kind) == Some(kind) {
                            if let Some(frame) = stack.pop() {
                                let rendered = apply(rule, kind, frame);
                                if let Some(parent) = stack.last_mut() {
                                    parent.events.push(Event::Html(CowStr::from(rendered)));
                                }
                            }
                            continue;
                        }
                    }
                }
            }
            Event::TaskListMarker(checked) => {
                if let Some(item) = stack
                    .iter_mut()
                    .rev()
                    .find(|f| f.kind == Some(NodeKind::ListItem))
                {
                    item.correct = *checked;
                    continue;
                }
            }
            _ => {}
        }
        if let Some(top) = stack.last_mut() {
            top.events.push(event);
        }
    }

    // Well-formed parser output leaves only the root; fold anything else into it.
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.events.extend(frame.events);
            }
        }
    }

    let mut out = String::new();
    if let Some(root) = stack.pop() {
        html::push_html(&mut out, root.events.into_iter());
    }
    out
}

fn starts_block(event: &Event<'_>) -> bool {
    matches!(
        event,
        Event::Html(_)
            | Event::Rule
            | Event::Start(
                Tag::Paragraph
                    | Tag::List(_)
                    | Tag::BlockQuote(_)
                    | Tag::CodeBlock(_)
                    | Tag::Heading { .. }
                    | Tag::Table(_)
                    | Tag::HtmlBlock
            )
    )
}

/// Split a list item's events into its leading inline run and the blocks
/// after it. A loose item's first paragraph is unwrapped into the lead.
fn split_lead<'a>(events: Vec<Event<'a>>) -> (Vec<Event<'a>>, Vec<Event<'a>>) {
    let mut iter = events.into_iter().peekable();
    let mut lead = Vec::new();
    if matches!(iter.peek(), Some(Event::Start(Tag::Paragraph))) {
        iter.next();
        for event in iter.by_ref() {
            if matches!(event, Event::End(TagEnd::Paragraph)) {
                break;
            }
            lead.push(event);
        }
    } else {
        while let Some(event) = iter.next_if(|e| !starts_block(e)) {
            lead.push(event);
        }
    }
    (lead, iter.collect())
}

fn to_html<'a>(events: impl IntoIterator<Item = Event<'a>>) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

fn apply(rule: RenderFn, kind: NodeKind, frame: Frame<'_>) -> String {
    let inner = to_html(frame.events.iter().cloned());
    let (lead, tail) = if kind == NodeKind::ListItem {
        let (lead, tail) = split_lead(frame.events);
        (to_html(lead), to_html(tail))
    } else {
        (String::new(), inner.clone())
    };
    let node = Node {
        kind,
        level: frame.level,
        correct: frame.correct,
        inner_html: &inner,
        lead_html: &lead,
        tail_html: &tail,
    };
    rule(&node)
}
