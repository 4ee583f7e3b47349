use clap::{Parser, Subcommand};
use simple_docs::manifest::Manifest;
use simple_docs::site::{self, Site};
use simple_docs::{check, config, generate, nav, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-docs")]
#[command(about = "Static site generator for documentation sites")]
#[command(long_about = "\
Static site generator for documentation sites

Markdown pages are rendered with a tabbed sidebar, an \"On this page\" list
and prev/next links, all driven by one navigation manifest.

Content structure:

  content/
  ├── config.toml          # Site config (optional)
  ├── nav.toml             # Navigation manifest
  ├── assets/              # Copied to the output root
  ├── en/
  │   ├── index.md         # Landing page  → /en/
  │   ├── intro.md         # → /en/intro/
  │   └── guides/
  │       └── deploy.md    # → /en/guides/deploy/
  └── fr/
      └── ...

Navigation manifest (nav.toml):

  [[entries]]
  type = \"learn\"          # Section header: type picks the sidebar tab
  label = \"Guides\"

  [[entries]]
  text = \"Introduction\"   # Link: belongs to the header above it
  slug = \"intro\"

Run 'simple-docs gen-config' to generate a documented config.toml.
Set RUST_LOG=debug for detailed diagnostics.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate content and report pages missing from either side of the manifest
    Check,
    /// Print the grouped navigation, or the navigation state of one page
    Nav {
        /// Only show sections of this type
        #[arg(long = "type")]
        kind: Option<String>,
        /// Show the open tab and prev/next links for this page path (e.g. /en/intro/)
        #[arg(long)]
        page: Option<String>,
        /// Print the grouped sections as JSON
        #[arg(long, conflicts_with = "page")]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&site, &cli.output)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            let report = check::check(&site);
            output::print_check_output(&report);
            println!("==> Check complete");
        }
        Command::Nav { kind, page, json } => {
            let config = config::load_config(&cli.source)?;
            let manifest = Manifest::load(&cli.source)?;
            site::check_section_tabs(&config, &manifest)?;
            let sections = manifest.sections()?;
            match page {
                Some(path) => {
                    let context = generate::page_context(&config, &manifest, &sections, &path);
                    output::print_page_context(&context);
                }
                None if json => {
                    let shown: Vec<_> = match kind.as_deref() {
                        Some(kind) => nav::sections_of_type(&sections, kind).collect(),
                        None => sections.iter().collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                }
                None => output::print_nav(&sections, kind.as_deref()),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
