// Rendering: Colorization inputs and the renderer seam
//
// Layout and drawing belong to whatever sits behind `TopologyRenderer`. The
// core only decides which elements are highlighted and in what color.

use std::io::Write;

use crate::graph::{Edge, Graph, NodeId};
use crate::Result;

/// Colors used when drawing a topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Hidden nodes and edges
    Red,
    /// Visible nodes
    LightBlue,
    /// Visible edges
    Gray,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::LightBlue => "lightblue",
            Color::Gray => "gray",
        }
    }
}

/// One graph to draw, with optional highlight lists
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub graph: &'a Graph,
    pub title: String,
    pub hidden_nodes: Option<&'a [NodeId]>,
    pub hidden_edges: Option<&'a [Edge]>,
}

impl<'a> RenderRequest<'a> {
    pub fn new(graph: &'a Graph, title: impl Into<String>) -> Self {
        Self {
            graph,
            title: title.into(),
            hidden_nodes: None,
            hidden_edges: None,
        }
    }

    /// Highlight the given nodes and edges as hidden
    pub fn with_hidden(mut self, nodes: &'a [NodeId], edges: &'a [Edge]) -> Self {
        self.hidden_nodes = Some(nodes);
        self.hidden_edges = Some(edges);
        self
    }

    pub fn node_color(&self, node: NodeId) -> Color {
        match self.hidden_nodes {
            Some(hidden) if hidden.contains(&node) => Color::Red,
            _ => Color::LightBlue,
        }
    }

    pub fn edge_color(&self, edge: &Edge) -> Color {
        match self.hidden_edges {
            Some(hidden) if hidden.contains(edge) => Color::Red,
            _ => Color::Gray,
        }
    }

    /// Color of every node, in graph order
    pub fn node_colors(&self) -> Vec<(NodeId, Color)> {
        self.graph.nodes().map(|n| (n, self.node_color(n))).collect()
    }

    /// Color of every edge, in graph order
    pub fn edge_colors(&self) -> Vec<(Edge, Color)> {
        self.graph.edges().map(|e| (e, self.edge_color(&e))).collect()
    }
}

/// Sink for rendered topologies
pub trait TopologyRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()>;
}

/// Writes each request as a Graphviz `graph` document
pub struct DotRenderer<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> DotRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }

    /// Number of documents written so far
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TopologyRenderer for DotRenderer<W> {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        let title = escape(&request.title);
        writeln!(self.writer, "graph \"{}\" {{", title)?;
        writeln!(self.writer, "  label=\"{}\";", title)?;
        writeln!(self.writer, "  node [style=filled];")?;

        for (node, color) in request.node_colors() {
            writeln!(self.writer, "  {} [fillcolor=\"{}\"];", node, color.as_str())?;
        }
        for (edge, color) in request.edge_colors() {
            let (u, v) = edge.endpoints();
            writeln!(self.writer, "  {} -- {} [color=\"{}\"];", u, v, color.as_str())?;
        }

        writeln!(self.writer, "}}")?;
        self.writer.flush()?;
        self.documents += 1;
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
