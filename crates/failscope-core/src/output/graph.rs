//! Rendering of the pipeline chain as SVG or Mermaid

use crate::coordination::{Stage, PIPELINE};
use std::fmt::Write as _;

const NODE_WIDTH: u32 = 220;
const NODE_HEIGHT: u32 = 44;
const GAP: u32 = 36;
const MARGIN: u32 = 20;

const START: &str = "__start__";
const END: &str = "__end__";

/// Escape a string for XML text and attribute content
pub fn escape_xml_into(s: &str, buf: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&apos;"),
            c => buf.push(c),
        }
    }
}

enum Node {
    Terminal(&'static str),
    Step(Stage),
}

fn nodes() -> Vec<Node> {
    let mut nodes = Vec::with_capacity(PIPELINE.len() + 2);
    nodes.push(Node::Terminal(START));
    nodes.extend(PIPELINE.iter().copied().map(Node::Step));
    nodes.push(Node::Terminal(END));
    nodes
}

/// Mermaid flowchart of `__start__ -> stages -> __end__`
pub fn render_mermaid(stages: &[Stage]) -> String {
    let mut buf = String::with_capacity(256);
    buf.push_str("flowchart TD;\n");
    let _ = writeln!(buf, "\t{START}([<p>{START}</p>]):::first");
    for stage in stages {
        let _ = writeln!(buf, "\t{}({})", stage.as_str(), stage.as_str());
    }
    let _ = writeln!(buf, "\t{END}([<p>{END}</p>]):::last");

    let mut prev = START;
    for stage in stages {
        let _ = writeln!(buf, "\t{} --> {};", prev, stage.as_str());
        prev = stage.as_str();
    }
    let _ = writeln!(buf, "\t{} --> {};", prev, END);
    buf
}

/// Standalone SVG image of the fixed pipeline chain
pub fn render_svg() -> String {
    let nodes = nodes();
    let count = nodes.len() as u32;
    let width = NODE_WIDTH + 2 * MARGIN;
    let height = count * NODE_HEIGHT + (count - 1) * GAP + 2 * MARGIN;
    let cx = width / 2;

    let mut buf = String::with_capacity(2048);
    let _ = writeln!(
        buf,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="14">"#
    );
    buf.push_str(
        r##"<defs><marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto"><path d="M0,0 L10,5 L0,10 z" fill="#333"/></marker></defs>"##,
    );
    buf.push('\n');

    for (i, node) in nodes.iter().enumerate() {
        let y = MARGIN + i as u32 * (NODE_HEIGHT + GAP);
        let (id, label, rx, fill) = match node {
            Node::Terminal(name) => (*name, *name, NODE_HEIGHT / 2, "#f2f0ff"),
            Node::Step(stage) => (stage.as_str(), stage.label(), 6, "#ffffde"),
        };

        buf.push_str("<g id=\"");
        escape_xml_into(id, &mut buf);
        let _ = write!(
            buf,
            "\"><rect x=\"{MARGIN}\" y=\"{y}\" width=\"{NODE_WIDTH}\" height=\"{NODE_HEIGHT}\" rx=\"{rx}\" fill=\"{fill}\" stroke=\"#9370db\"/>"
        );
        let _ = write!(
            buf,
            "<text x=\"{cx}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">",
            y + NODE_HEIGHT / 2
        );
        escape_xml_into(label, &mut buf);
        buf.push_str("</text></g>\n");

        if i + 1 < nodes.len() {
            let y1 = y + NODE_HEIGHT;
            let y2 = y1 + GAP;
            let _ = writeln!(
                buf,
                "<line x1=\"{cx}\" y1=\"{y1}\" x2=\"{cx}\" y2=\"{y2}\" stroke=\"#333\" stroke-width=\"1.5\" marker-end=\"url(#arrow)\"/>"
            );
        }
    }

    buf.push_str("</svg>\n");
    buf
}
