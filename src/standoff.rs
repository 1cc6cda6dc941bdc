//! Line-based notation for building Documents.
//!
//! The CLI, the WASM surface, and the test suite all construct annotation
//! documents from this notation:
//!
//! ```text
//! # comment
//! word <id> <label…>
//! link <id> [top] [trigger=<word-id>] [type=<reltype>] [label=<text>] <arg-id>[:in|:out] …
//! ```
//!
//! Argument direction defaults to `:out`. A link's display label defaults to
//! its trigger's label, else its reltype, else its id. Links may reference
//! links declared later (two-pass resolution).

use std::collections::HashMap;

use regex::Regex;

use crate::document::{ArrowDirection, Document, LinkId, NodeRef, WordId};
use crate::error::ParseError;

/// A parsed document plus the id table needed to address entities by name.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub doc: Document,
    pub ids: HashMap<String, NodeRef>,
}

struct WordDecl {
    id: String,
    label: String,
}

struct LinkDecl {
    line: usize,
    id: String,
    top: bool,
    trigger: Option<String>,
    reltype: Option<String>,
    label: Option<String>,
    args: Vec<(String, ArrowDirection)>,
}

/// Parse the notation into a Document and an id table.
pub fn parse(src: &str) -> Result<Parsed, ParseError> {
    let word_re = Regex::new(r"^word\s+([A-Za-z_][A-Za-z0-9_-]*)\s+(.+)$").expect("word pattern");
    let link_re = Regex::new(r"^link\s+([A-Za-z_][A-Za-z0-9_-]*)\s*(.*)$").expect("link pattern");
    let arg_re = Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)(?::(in|out))?$").expect("arg pattern");

    let mut words: Vec<WordDecl> = Vec::new();
    let mut links: Vec<LinkDecl> = Vec::new();
    let mut ids: HashMap<String, NodeRef> = HashMap::new();

    // pass 1: declarations and id assignment
    for (i, raw) in src.lines().enumerate() {
        let lineno = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = word_re.captures(line) {
            let id = caps[1].to_string();
            if ids.contains_key(&id) {
                return Err(ParseError::new(lineno, format!("duplicate id '{id}'")));
            }
            ids.insert(id.clone(), NodeRef::Word(WordId(words.len())));
            words.push(WordDecl {
                id,
                label: caps[2].trim().to_string(),
            });
        } else if let Some(caps) = link_re.captures(line) {
            let id = caps[1].to_string();
            if ids.contains_key(&id) {
                return Err(ParseError::new(lineno, format!("duplicate id '{id}'")));
            }
            ids.insert(id.clone(), NodeRef::Link(LinkId(links.len())));

            let mut decl = LinkDecl {
                line: lineno,
                id,
                top: false,
                trigger: None,
                reltype: None,
                label: None,
                args: Vec::new(),
            };
            for token in caps[2].split_whitespace() {
                if token == "top" {
                    decl.top = true;
                } else if let Some(v) = token.strip_prefix("trigger=") {
                    decl.trigger = Some(v.to_string());
                } else if let Some(v) = token.strip_prefix("type=") {
                    decl.reltype = Some(v.to_string());
                } else if let Some(v) = token.strip_prefix("label=") {
                    decl.label = Some(v.to_string());
                } else if let Some(caps) = arg_re.captures(token) {
                    let dir = match caps.get(2).map(|m| m.as_str()) {
                        Some("in") => ArrowDirection::Incoming,
                        _ => ArrowDirection::Outgoing,
                    };
                    decl.args.push((caps[1].to_string(), dir));
                } else {
                    return Err(ParseError::new(lineno, format!("bad token '{token}'")));
                }
            }
            links.push(decl);
        } else {
            return Err(ParseError::new(lineno, format!("unrecognized line '{line}'")));
        }
    }

    // pass 2: build the document and resolve references
    let mut doc = Document::new();
    for w in &words {
        doc.add_word(w.label.clone());
    }
    for _ in &links {
        doc.links.push(crate::document::Link::default());
    }
    for (i, decl) in links.iter().enumerate() {
        let resolve = |name: &str| {
            ids.get(name).copied().ok_or_else(|| {
                ParseError::new(decl.line, format!("unknown id '{name}'"))
            })
        };

        let trigger = match &decl.trigger {
            None => None,
            Some(name) => match resolve(name)? {
                NodeRef::Word(w) => Some(w),
                NodeRef::Link(_) => {
                    return Err(ParseError::new(
                        decl.line,
                        format!("trigger '{name}' is not a word"),
                    ));
                }
            },
        };

        let mut arguments = Vec::with_capacity(decl.args.len());
        let mut directions = Vec::with_capacity(decl.args.len());
        for (name, dir) in &decl.args {
            arguments.push(resolve(name)?);
            directions.push(*dir);
        }

        let label = decl
            .label
            .clone()
            .or_else(|| trigger.map(|t| doc.word(t).label.clone()))
            .or_else(|| decl.reltype.clone())
            .unwrap_or_else(|| decl.id.clone());

        let link = &mut doc.links[i];
        link.label = label;
        link.arguments = arguments;
        link.directions = directions;
        link.trigger = trigger;
        link.reltype = decl.reltype.clone();
        link.top = decl.top;
    }

    // wire incident-link lists in declaration order
    for i in 0..doc.links.len() {
        doc.register_incident(LinkId(i));
    }

    Ok(Parsed { doc, ids })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
