//! float-toc: print the floating outline each markdown document would get.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use float_toc::config::Config;
use float_toc::formats::markdown::MarkdownFormat;
use float_toc::input;
use float_toc::metadata::{load_document, MetadataCache, PaneId};
use float_toc::registry::{HostEvent, OutlineInstance, OutlineRegistry, OutlineSurface};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "float-toc")]
#[command(about = "Floating table of contents for markdown documents", long_about = None)]
struct Args {
    /// Files or directories to open
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Configuration file (defaults to ./float-toc.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra excluded path prefixes, one per line
    #[arg(long, value_name = "FILE")]
    exclude_file: Option<PathBuf>,

    /// Replay host events from a JSON file instead of opening one pane per document
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Jump every open outline to the heading enclosing this line
    #[arg(long, value_name = "LINE")]
    select: Option<u32>,

    /// Emit outlines as JSON lines
    #[arg(long)]
    json: bool,

    /// Log registry activity to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Writes each panel to stdout as the registry mounts, redraws, and removes it.
struct PrintSurface {
    json: bool,
}

fn emit(json: bool, action: &str, instance: &OutlineInstance) {
    if json {
        let line = serde_json::json!({ "action": action, "instance": instance });
        println!("{line}");
    } else if action == "unmount" {
        println!("── {} closed in {} ──", instance.document(), instance.pane());
    } else {
        println!("── {} ({}) [{action}] ──", instance.document(), instance.pane());
        print!("{}", instance.tree().render_text());
    }
}

impl OutlineSurface for PrintSurface {
    fn mount(&mut self, instance: &OutlineInstance) {
        emit(self.json, "mount", instance);
    }

    fn redraw(&mut self, instance: &OutlineInstance) {
        emit(self.json, "redraw", instance);
    }

    fn unmount(&mut self, instance: &OutlineInstance) {
        emit(self.json, "unmount", instance);
    }

    fn navigate(&mut self, pane: PaneId, line: u32) {
        info!(%pane, line, "navigate");
        if self.json {
            let line = serde_json::json!({ "action": "navigate", "pane": pane, "line": line });
            println!("{line}");
        } else {
            println!("── {pane} scrolled to line {} ──", line + 1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "float_toc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut cfg = match &args.config {
        Some(path) => Config::load_from(path).map_err(io::Error::other)?,
        None => Config::load(),
    };

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(path) = &args.exclude_file {
        let text = std::fs::read_to_string(path)?;
        cfg.exclude_paths.extend(Config::parse_exclude_paths(&text));
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let format = MarkdownFormat;
    let mut cache = MetadataCache::new();
    let mut ids = Vec::new();
    for path in &documents {
        match load_document(path, &format) {
            Ok(metadata) => {
                let id = input::document_id(path);
                cache.insert(id.clone(), metadata);
                ids.push(id);
            }
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }

    let mut registry =
        OutlineRegistry::new(cache, cfg).with_surface(PrintSurface { json: args.json });

    let events = match &args.events {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str::<Vec<HostEvent>>(&contents)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => (0u64..)
            .zip(ids)
            .map(|(pane, document)| HostEvent::DocumentChanged {
                pane: PaneId(pane),
                document: Some(document),
            })
            .collect(),
    };

    let replayed = args.events.is_some();
    for event in events {
        registry.handle(event);
    }

    if let Some(line) = args.select {
        let targets: Vec<_> = registry
            .instances()
            .filter_map(|instance| {
                let node = instance.tree().find_line(line)?;
                Some((instance.pane(), node.line))
            })
            .collect();
        for (pane, heading) in targets {
            registry.select_heading(pane, heading);
        }
    }

    if replayed {
        for instance in registry.instances() {
            emit(args.json, "final", instance);
        }
    }

    info!(
        panes = registry.pane_count(),
        documents = registry.document_count(),
        "done"
    );
    Ok(())
}
