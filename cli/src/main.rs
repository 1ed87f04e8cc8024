// anonroute: Command-line front end
//
// Runs the topology concealment simulation and manages its persisted
// defaults.

mod config;
mod output;

use anonroute_core::{Simulation, SimulationReport};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::path::PathBuf;

use output::{Console, StageRenderer};

#[derive(Parser)]
#[command(name = "anonroute")]
#[command(about = "anonroute: random topology concealment and restoration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, conceal, mark and restore a random topology
    Run {
        /// Number of nodes
        #[arg(short, long)]
        nodes: Option<usize>,
        /// Number of edges
        #[arg(short, long)]
        edges: Option<usize>,
        /// Fraction of nodes and edges to hide (0.0 to 1.0)
        #[arg(short, long)]
        ratio: Option<f64>,
        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Directory for topology.dot (and report.json with --json)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Emit the full run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Set { key: String, value: String },
    Get { key: String },
    List,
    Path,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            nodes,
            edges,
            ratio,
            seed,
            out,
            json,
        } => cmd_run(nodes, edges, ratio, seed, out, json),
        Commands::Config { action } => cmd_config(action),
    }
}

fn cmd_run(
    nodes: Option<usize>,
    edges: Option<usize>,
    ratio: Option<f64>,
    seed: Option<u64>,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = config::Config::load()?;

    let mut sim_config = config.simulation.clone();
    if let Some(n) = nodes {
        sim_config.num_nodes = n;
    }
    if let Some(m) = edges {
        sim_config.num_edges = m;
    }
    if let Some(r) = ratio {
        sim_config.hide_ratio = r;
    }
    if seed.is_some() {
        sim_config.seed = seed;
    }
    let out_dir = out.or_else(|| config.output_dir.as_ref().map(PathBuf::from));

    let mut simulation = Simulation::new(sim_config).context("Invalid simulation parameters")?;

    let console = Console::for_run(json, out_dir.is_some());
    let mut renderer = match &out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).context("Failed to create output directory")?;
            StageRenderer::with_dot_file(console.writer(), &dir.join("topology.dot"))?
        }
        None => StageRenderer::terminal_only(console.writer()),
    };

    {
        let out = renderer.console_mut();
        writeln!(out, "{}", "Anonymous Routing Simulation".bold())?;
        writeln!(out, "  Seed: {}", simulation.seed().to_string().bright_cyan())?;
        writeln!(out)?;
    }

    let report = simulation.run(&mut renderer).context("Simulation failed")?;
    let mut out = renderer.into_console();
    print_summary(&mut out, &report)?;

    if let Some(dir) = &out_dir {
        writeln!(out)?;
        writeln!(
            out,
            "  {} DOT output: {}",
            "✓".green(),
            dir.join("topology.dot").display().to_string().bright_cyan()
        )?;
    }

    if json {
        let document = report.to_json().context("Failed to serialize report")?;
        match &out_dir {
            Some(dir) => {
                let path = dir.join("report.json");
                std::fs::write(&path, document).context("Failed to write report")?;
                writeln!(
                    out,
                    "  {} JSON report: {}",
                    "✓".green(),
                    path.display().to_string().bright_cyan()
                )?;
            }
            None => println!("{}", document),
        }
    }

    Ok(())
}

fn print_summary(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Hidden Elements:".bold())?;

    let nodes: Vec<String> = report.hidden_nodes.iter().map(|n| n.to_string()).collect();
    let edges: Vec<String> = report.hidden_edges.iter().map(|e| e.to_string()).collect();
    writeln!(out, "  Nodes ({}): {}", nodes.len(), nodes.join(", ").bright_red())?;
    writeln!(out, "  Edges ({}): {}", edges.len(), edges.join(", ").bright_red())?;
    if !report.detached_edges.is_empty() {
        writeln!(
            out,
            "  Edges dropped with hidden nodes: {}",
            report.detached_edges.len()
        )?;
    }
    writeln!(out)?;

    if report.restored_matches_original() {
        writeln!(out, "  {} Restored topology matches the original", "✓".green())?;
    } else {
        writeln!(out, "  {} Restored topology differs from the original", "✗".red())?;
    }
    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = config::Config::load()?;

    match action {
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{} {} = {}", "✓".green(), key.bright_cyan(), value.bright_yellow());
        }
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => println!("{} {} is not set", "✗".red(), key),
        },
        ConfigAction::List => {
            println!("{}", "Configuration".bold());
            for (key, value) in config.list() {
                println!("  {:<12} {}", key.bright_cyan(), value);
            }
        }
        ConfigAction::Path => {
            println!("{}", config::Config::config_file()?.display());
        }
    }

    Ok(())
}
