// src/main.rs

use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use routes_auto_loader::model::PageManifestEntry;
use routes_auto_loader::resolver::PAGE_EXTENSIONS;
use routes_auto_loader::transform_detailed;

/// CLI argument definition
#[derive(Parser, Debug)]
#[command(
    name = "routes-auto-loader",
    version = "0.1.0",
    about = "Rewrites page references in routing files into lazy-loader declarations"
)]
struct Cli {
    /// Project root to search recursively for routing files
    /// (any `Routes.js` / `Routes.jsx` / `Routes.ts` / `Routes.tsx`).
    #[arg(short = 'r', long = "project-root", value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Transform exactly this routing file instead of walking a project.
    #[arg(long = "routes-file", value_name = "FILE", conflicts_with = "project_root")]
    routes_file: Option<PathBuf>,

    /// Pages directory; defaults to `pages` next to each routing file.
    #[arg(long = "pages-dir", value_name = "DIR")]
    pages_dir: Option<PathBuf>,

    /// Rewrite the routing files in place instead of printing to stdout.
    #[arg(long)]
    write: bool,

    /// Print a JSON summary of the generated loaders instead of the source.
    #[arg(long)]
    json: bool,
}

/// What happened to one routing file, for `--json` output.
#[derive(Debug, Serialize)]
struct FileSummary {
    file: PathBuf,
    generated: Vec<PageManifestEntry>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1) Collect the routing files to transform.
    let mut routing_paths: Vec<PathBuf> = Vec::new();
    if let Some(file) = &cli.routes_file {
        routing_paths.push(file.clone());
    } else if let Some(root) = &cli.project_root {
        let project_dir = root.canonicalize()?;
        for entry in WalkDir::new(&project_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let stem_ok = path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s == "Routes");
            let ext_ok = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| PAGE_EXTENSIONS.contains(&e));
            if stem_ok && ext_ok {
                routing_paths.push(path.to_path_buf());
            }
        }
        routing_paths.sort();
        routing_paths.dedup();
    } else {
        eprintln!("Error: pass either --project-root or --routes-file.");
        std::process::exit(1);
    }

    if routing_paths.is_empty() {
        eprintln!("Error: no routing file found.");
        std::process::exit(1);
    }

    // 2) Transform each file against its pages directory.
    let mut summaries: Vec<FileSummary> = Vec::new();
    for routing_path in routing_paths {
        let pages_dir = match &cli.pages_dir {
            Some(dir) => dir.clone(),
            None => routing_path
                .parent()
                .map(|p| p.join("pages"))
                .unwrap_or_else(|| PathBuf::from("pages")),
        };

        let source = fs::read_to_string(&routing_path)?;
        let output = transform_detailed(&source, &routing_path, &pages_dir)?;

        if cli.write {
            fs::write(&routing_path, &output.code)?;
        } else if !cli.json {
            print!("{}", output.code);
        }
        summaries.push(FileSummary {
            file: routing_path,
            generated: output.loaders,
        });
    }

    // 3) Optional JSON report of everything that was generated.
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    Ok(())
}
