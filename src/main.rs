use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use graph_insight::metrics::RankedNode;
use graph_insight::{data, pipeline, storage, AnalysisConfig, Metric};

#[derive(Parser, Debug)]
#[clap(
    name = "graph-insight",
    about = "Connectivity, centrality, community and diffusion analysis of an undirected edge list"
)]
struct Cli {
    /// Path to input edge list (one "u v" pair per line, '#' comments)
    #[clap(long)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: PathBuf,

    /// JSON file with analysis settings; flags below override it
    #[clap(long)]
    config: Option<PathBuf>,

    /// Number of highest-degree nodes in the analysed subgraph
    #[clap(long)]
    subgraph_size: Option<usize>,

    /// Pivot nodes for approximate betweenness
    #[clap(long)]
    betweenness_samples: Option<usize>,

    /// Per-edge infection probability for the SI simulation
    #[clap(long)]
    diffusion_probability: Option<f64>,

    /// Number of SI steps
    #[clap(long)]
    diffusion_steps: Option<usize>,

    /// Seed for sampling, Louvain ordering and diffusion
    #[clap(long)]
    seed: Option<u64>,

    /// Skip writing CSV/JSON/GEXF files
    #[clap(long)]
    skip_export: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    /// Merge the optional config file with command line overrides
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => AnalysisConfig::default(),
        };

        if let Some(size) = self.subgraph_size {
            config.subgraph_size = size;
        }
        if let Some(samples) = self.betweenness_samples {
            config.betweenness.samples = samples;
        }
        if let Some(probability) = self.diffusion_probability {
            config.diffusion.probability = probability;
        }
        if let Some(steps) = self.diffusion_steps {
            config.diffusion.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        Ok(config)
    }
}

fn log_ranking(title: &str, ranking: &[RankedNode]) {
    log::info!("Top {} by {}:", ranking.len(), title);
    for ranked in ranking {
        log::info!("  {} {:.6}", ranked.node, ranked.score);
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = args.analysis_config()?;

    log::info!("Starting graph analysis");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir.display());

    // 1. Load data
    let graph = data::load_edge_list(&args.input)?;

    // 2. Run every analysis stage
    let analysis = pipeline::run(&graph, &config)?;
    let report = &analysis.report;

    log::info!("Density: {:.8}", report.graph.density);
    log::info!("Average degree: {:.4}", report.graph.average_degree);
    log::info!("Largest connected component: {} nodes", report.graph.largest_component);
    if let Metric::Computed { value } = &report.graph.approximate_diameter {
        log::info!("Approximate diameter: {}", value);
    }
    log_ranking("degree centrality", &report.top_degree);
    log_ranking("PageRank", &report.top_pagerank);
    log_ranking("eigenvector centrality", &report.top_eigenvector);
    log::info!(
        "Communities: {}, modularity {:.6}",
        report.community_count,
        report.modularity
    );
    log::info!("Diffusion reached {} node(s)", report.diffusion_infected);

    // 3. Save results
    if !args.skip_export {
        storage::save_results(&analysis, &args.output_dir)?;
    }

    log::info!("Analysis complete");

    Ok(())
}
