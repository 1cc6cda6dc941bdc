//! Entity model: Words, Links, and the Document arena that owns them.
//!
//! The annotation graph is cyclic and directed. Words are leaf-capable
//! entities with a label; Links are typed connectives joining Words and/or
//! other Links. Identity is positional (`WordId`/`LinkId` into the arena),
//! so two traversals reaching the same entity compare equal by `NodeRef`
//! regardless of label collisions.

pub mod graphview;

/// Index of a Word in its Document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(pub usize);

/// Index of a Link in its Document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

/// Identity of either entity kind. Equality IS identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Word(WordId),
    Link(LinkId),
}

/// Arrow direction of one link participant: `Outgoing` is a forward tree
/// edge (+1 in the source data), `Incoming` points back into the
/// participant (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Outgoing,
    Incoming,
}

/// A leaf-capable entity with a display label.
#[derive(Debug, Clone, Default)]
pub struct Word {
    pub label: String,
    /// Incident links, in registration order. Never sorted: this order
    /// drives left-to-right placement.
    pub links: Vec<LinkId>,
}

/// A typed connective entity.
#[derive(Debug, Clone, Default)]
pub struct Link {
    pub label: String,
    /// Links incident on this link (links may participate in other links).
    pub links: Vec<LinkId>,
    /// Ordered participants.
    pub arguments: Vec<NodeRef>,
    /// Parallel to `arguments`. May be shorter when the source data is
    /// malformed; classification then follows `ArrowFallback`.
    pub directions: Vec<ArrowDirection>,
    /// The Word that licenses this link, if any.
    pub trigger: Option<WordId>,
    /// Relation label for trigger-less (coreference-style) links.
    pub reltype: Option<String>,
    /// Whether this link participates in top-link/coreference traversal.
    pub top: bool,
}

/// Owns every Word and Link. The layout crate only ever borrows it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub words: Vec<Word>,
    pub links: Vec<Link>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_word(&mut self, label: impl Into<String>) -> WordId {
        let id = WordId(self.words.len());
        self.words.push(Word {
            label: label.into(),
            links: Vec::new(),
        });
        id
    }

    /// Add a link and register it on every participant's (and the
    /// trigger's) incident-link list, preserving insertion order.
    pub fn add_link(
        &mut self,
        label: impl Into<String>,
        trigger: Option<WordId>,
        reltype: Option<String>,
        top: bool,
        args: Vec<(NodeRef, ArrowDirection)>,
    ) -> LinkId {
        let id = LinkId(self.links.len());
        let (arguments, directions): (Vec<NodeRef>, Vec<ArrowDirection>) =
            args.into_iter().unzip();
        self.links.push(Link {
            label: label.into(),
            links: Vec::new(),
            arguments,
            directions,
            trigger,
            reltype,
            top,
        });
        self.register_incident(id);
        id
    }

    /// Push `id` onto the incident-link list of its trigger and of each of
    /// its arguments, once per entity.
    pub(crate) fn register_incident(&mut self, id: LinkId) {
        let mut targets: Vec<NodeRef> = Vec::new();
        if let Some(t) = self.links[id.0].trigger {
            targets.push(NodeRef::Word(t));
        }
        for &arg in &self.links[id.0].arguments {
            if !targets.contains(&arg) {
                targets.push(arg);
            }
        }
        for target in targets {
            match target {
                NodeRef::Word(w) => self.words[w.0].links.push(id),
                NodeRef::Link(l) => self.links[l.0].links.push(id),
            }
        }
    }

    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// Display label of either entity kind.
    pub fn label(&self, node: NodeRef) -> &str {
        match node {
            NodeRef::Word(w) => &self.words[w.0].label,
            NodeRef::Link(l) => &self.links[l.0].label,
        }
    }

    /// Incident links of either entity kind, in storage order.
    pub fn links_of(&self, node: NodeRef) -> &[LinkId] {
        match node {
            NodeRef::Word(w) => &self.words[w.0].links,
            NodeRef::Link(l) => &self.links[l.0].links,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
