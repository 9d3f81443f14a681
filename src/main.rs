use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitae::{config, generate, index, load, output, search};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vitae")]
#[command(about = "Static site generator for academic portfolios")]
#[command(long_about = "\
Static site generator for academic portfolios

Your content is authored data: TOML records for publications, teaching,
experience, and news, plus markdown pages. Everything is validated once at
build time and rendered to plain HTML with a small client-side search.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── profile.toml                 # Researcher identity (required)
  ├── publications.toml            # [[publications]] records
  ├── teaching.toml                # [[courses]] records
  ├── experience.toml              # [[experience]] records
  ├── news.toml                    # [[news]] records
  ├── 040-research.md              # Page (numbered = shown in nav)
  ├── 050-scholar.md               # Link page (URL-only .md → external nav link)
  └── assets/                      # Static assets (photo, PDFs) → copied to output root

Validation happens at load time: every malformed record field is reported
at once with its path (e.g. publications[3].year), and nothing is generated
from invalid content.

Run 'vitae gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest, search index)
    #[arg(long, default_value = ".vitae-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate the content directory into a manifest
    Load,
    /// Build the search index from the manifest
    Index,
    /// Produce the final HTML site from manifest and search index
    Generate,
    /// Run the full pipeline: load → index → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Query the built search index from the command line
    Search {
        /// Query text (joined with spaces)
        query: Vec<String>,
        /// Restrict to content kinds (publication, course, experience, news)
        #[arg(long = "kind")]
        kinds: Vec<String>,
        /// Restrict to a single year
        #[arg(long)]
        year: Option<u16>,
        /// Truncate to at most this many results
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Load => {
            let manifest = load::load(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_load_output(&manifest);
        }
        Command::Index => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest: load::Manifest =
                serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)?;
            let search_index = index::build_index(&manifest);
            let index_path = cli.temp_dir.join("search-index.json");
            let json = serde_json::to_string_pretty(&search_index)?;
            std::fs::write(&index_path, json)?;
            output::print_index_output(&search_index);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let index_path = cli.temp_dir.join("search-index.json");
            let manifest: load::Manifest =
                serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)?;
            init_thread_pool(&manifest.config.processing);
            let summary =
                generate::generate(&manifest_path, &index_path, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);
        }
        Command::Build => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Loading {}", cli.source.display());
            let manifest = load::load(&cli.source)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_load_output(&manifest);

            println!("==> Stage 2: Indexing");
            let search_index = index::build_index(&manifest);
            let index_path = cli.temp_dir.join("search-index.json");
            let json = serde_json::to_string_pretty(&search_index)?;
            std::fs::write(&index_path, json)?;
            output::print_index_output(&search_index);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let summary =
                generate::generate(&manifest_path, &index_path, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = load::load(&cli.source)?;
            output::print_load_output(&manifest);
            println!("==> Content is valid");
        }
        Command::Search {
            query,
            kinds,
            year,
            max_results,
        } => {
            let index_path = cli.temp_dir.join("search-index.json");
            if !index_path.exists() {
                return Err(format!(
                    "{} not found - run 'vitae index' (or 'vitae build') first",
                    index_path.display()
                )
                .into());
            }
            let search_index: index::SearchIndex =
                serde_json::from_str(&std::fs::read_to_string(&index_path)?)?;

            let kinds = kinds
                .iter()
                .map(|tag| {
                    search::ContentKind::from_tag(tag).ok_or_else(|| {
                        format!("unknown kind {tag:?} (publication, course, experience, news)")
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let state = search::FilterState {
                query: query.join(" "),
                kinds,
                year,
                max_results: max_results.unwrap_or(search::DEFAULT_MAX_RESULTS),
            };
            let mut cache = search::FilterCache::new(search_index.entries);
            let results = cache.results(&state);
            output::print_search_results(&results);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
