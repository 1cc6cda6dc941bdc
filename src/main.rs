//! annotree CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;

use annotree::config::LayoutConfig;
use annotree::document::graphview::GraphView;
use annotree::document::{LinkId, NodeRef, WordId};
use annotree::layout::{Group, IncomingRef, LayoutEngine, MonospaceMeasure};
use annotree::{standoff, svg};

/// Lay out Word/Link annotation graphs as trees.
#[derive(Parser, Debug)]
#[command(
    name = "annotree",
    about = "Lay out Word/Link annotation graphs as collision-free trees"
)]
struct Cli {
    /// Input file in standoff notation (reads from stdin if not provided)
    input: Option<String>,

    /// Id of the entity to root the tree at (defaults to the first word)
    #[arg(short = 'r', long = "root")]
    root: Option<String>,

    /// Promote an incoming link after the initial layout: ANCHOR-ID:LINK-ID
    #[arg(short = 'g', long = "graft")]
    graft: Vec<String>,

    /// Maximum traversal depth from the root
    #[arg(long = "max-depth", default_value = "20")]
    max_depth: usize,

    /// Lay out over top links and coreference groups instead of the live scene
    #[arg(short = 't', long = "top")]
    top: bool,

    /// Print node positions instead of SVG
    #[arg(short = 'p', long = "positions")]
    positions: bool,

    /// Print the entity graph in Graphviz DOT format and exit
    #[arg(long = "dot")]
    dot: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Find the affordance for `link` at the first occurrence of `anchor`
/// across the live groups.
fn find_affordance(groups: &[Group], anchor: NodeRef, link: LinkId) -> Option<IncomingRef> {
    for (gi, group) in groups.iter().enumerate() {
        for id in group.tree.descendants(group.tree.root) {
            let n = &group.tree[id];
            if n.node == anchor && n.incoming.contains(&link) {
                return Some(IncomingRef {
                    node: link,
                    group: gi,
                    anchor: id,
                });
            }
        }
    }
    None
}

fn dump_groups(groups: &[Group]) -> String {
    let mut out = String::new();
    for (gi, group) in groups.iter().enumerate() {
        out.push_str(&format!("group {gi} (offset {})\n", group.offset));
        for id in group.tree.descendants(group.tree.root) {
            let n = &group.tree[id];
            out.push_str(&format!(
                "  {:>8.1} {:>8.1}  {}\n",
                n.offset + group.offset,
                n.y,
                n.label
            ));
        }
    }
    out
}

fn main() {
    let cli = Cli::parse();

    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => fail(format!("cannot read '{path}': {e}")),
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(format!("cannot read stdin: {e}"));
        }
        buf
    };

    let parsed = match standoff::parse(&text) {
        Ok(p) => p,
        Err(e) => fail(e),
    };

    let rendered = if cli.dot {
        GraphView::from_document(&parsed.doc).to_dot()
    } else {
        let root = match &cli.root {
            Some(id) => match parsed.ids.get(id) {
                Some(&r) => r,
                None => fail(format!("unknown root id '{id}'")),
            },
            None => {
                if parsed.doc.word_count() == 0 {
                    fail("document has no words; pass --root");
                }
                NodeRef::Word(WordId(0))
            }
        };

        let config = LayoutConfig {
            max_depth: cli.max_depth,
            ..LayoutConfig::default()
        };
        let mut engine = LayoutEngine::new(config, MonospaceMeasure::default());

        if cli.top {
            let result = match engine.layout(&parsed.doc, root) {
                Ok(r) => r,
                Err(e) => fail(e),
            };
            if cli.positions {
                let mut out = String::new();
                for n in &result.nodes {
                    out.push_str(&format!("{:>8.1} {:>8.1}  {}\n", n.offset, n.y, n.label));
                }
                out
            } else {
                svg::render_result(&result)
            }
        } else {
            if let Err(e) = engine.rebuild(&parsed.doc, root) {
                fail(e);
            }
            for request in &cli.graft {
                let Some((anchor_id, link_id)) = request.split_once(':') else {
                    fail(format!("bad graft argument '{request}' (want ANCHOR-ID:LINK-ID)"));
                };
                let anchor = match parsed.ids.get(anchor_id) {
                    Some(&r) => r,
                    None => fail(format!("unknown anchor id '{anchor_id}'")),
                };
                let link = match parsed.ids.get(link_id) {
                    Some(&NodeRef::Link(l)) => l,
                    Some(_) => fail(format!("'{link_id}' is not a link")),
                    None => fail(format!("unknown link id '{link_id}'")),
                };
                let Some(at) = find_affordance(engine.groups(), anchor, link) else {
                    fail(format!("no incoming affordance '{link_id}' at '{anchor_id}'"));
                };
                if let Err(e) = engine.graft(&parsed.doc, at) {
                    fail(e);
                }
            }
            if cli.positions {
                dump_groups(engine.groups())
            } else {
                svg::render_groups(&parsed.doc, engine.groups())
            }
        }
    };

    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            fail(format!("cannot write '{path}': {e}"));
        }
    } else {
        print!("{rendered}");
        if let Err(e) = io::stdout().flush() {
            fail(format!("cannot flush stdout: {e}"));
        }
    }
}
