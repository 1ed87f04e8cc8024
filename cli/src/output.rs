// Stage output for `anonroute run`
//
// Prints a one-line summary per rendered stage and, when an output directory
// is configured, forwards every stage to a DOT file as well.

use anonroute_core::render::{Color, DotRenderer, RenderRequest, TopologyRenderer};
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Stream that receives the human-readable run output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Stdout,
    Stderr,
}

impl Console {
    /// Stdout is reserved for the report when `--json` has nowhere else to go
    pub fn for_run(json: bool, has_out_dir: bool) -> Self {
        if json && !has_out_dir {
            Console::Stderr
        } else {
            Console::Stdout
        }
    }

    pub fn writer(self) -> Box<dyn Write> {
        match self {
            Console::Stdout => Box::new(io::stdout()),
            Console::Stderr => Box::new(io::stderr()),
        }
    }
}

pub struct StageRenderer<W: Write> {
    console: W,
    dot: Option<DotRenderer<BufWriter<File>>>,
}

impl<W: Write> StageRenderer<W> {
    pub fn terminal_only(console: W) -> Self {
        Self { console, dot: None }
    }

    pub fn with_dot_file(console: W, path: &Path) -> Result<Self> {
        let file = File::create(path).context("Failed to create DOT file")?;
        Ok(Self {
            console,
            dot: Some(DotRenderer::new(BufWriter::new(file))),
        })
    }

    pub fn console_mut(&mut self) -> &mut W {
        &mut self.console
    }

    /// Hand the console back for the closing summary
    pub fn into_console(self) -> W {
        self.console
    }
}

impl<W: Write> TopologyRenderer for StageRenderer<W> {
    fn render(&mut self, request: &RenderRequest<'_>) -> anonroute_core::Result<()> {
        let highlighted_nodes = request
            .node_colors()
            .iter()
            .filter(|(_, color)| *color == Color::Red)
            .count();
        let highlighted_edges = request
            .edge_colors()
            .iter()
            .filter(|(_, color)| *color == Color::Red)
            .count();

        writeln!(self.console, "{}", request.title.bold())?;
        write!(
            self.console,
            "  {} nodes, {} edges",
            request.graph.node_count(),
            request.graph.edge_count()
        )?;
        if highlighted_nodes + highlighted_edges > 0 {
            write!(
                self.console,
                " ({} nodes and {} edges marked {})",
                highlighted_nodes,
                highlighted_edges,
                "hidden".bright_red()
            )?;
        }
        writeln!(self.console)?;

        if let Some(dot) = self.dot.as_mut() {
            dot.render(request)?;
            tracing::debug!(documents = dot.documents(), "Wrote DOT document");
        }
        Ok(())
    }
}
