//! repeat: conflict-aware profile query on a safe-interval graph.
//!
//! Loads a graph file (or builds the built-in corridor), resolves the
//! source location to its safe interval, runs RePEAT and prints the
//! resulting profile as CSV followed by a few random lookups.
//!
//! ```text
//! cargo run -p repeat -- --start-time 10 --lookups 5
//! RUST_LOG=rp_search=debug cargo run -p repeat -- --graph g.txt --start A --goal B
//! ```

mod corridor;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rp_core::{Location, QueryRng, Time};
use rp_graph::{Graph, load_graph};
use rp_search::{Plan, Query, RepeatPlanner, SearchConfig, TracingObserver};

use corridor::build_corridor;

#[derive(Parser)]
#[command(name = "repeat", version, about = "Arrival-time profile between two locations")]
struct Cli {
    /// Graph file.  Without it the built-in corridor is used.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Source location.
    #[arg(long, default_value = corridor::SOURCE)]
    start: String,

    /// Goal location.
    #[arg(long, default_value = corridor::GOAL)]
    goal: String,

    /// Earliest departure time.
    #[arg(long, default_value_t = 0.0)]
    start_time: Time,

    /// Random departure times to look up in the finished profile.
    #[arg(long, default_value_t = 5)]
    lookups: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with search settings; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    // 1. Graph.
    let graph = match &cli.graph {
        Some(path) => load_graph(path).with_context(|| format!("loading {}", path.display()))?,
        None => build_corridor()?,
    };
    info!(nodes = graph.node_count(), edges = graph.edge_count(), agents = graph.agent_count(), "graph ready");

    // 2. Settings.
    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<SearchConfig>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    let planner = RepeatPlanner::new(config)?;

    // 3. Query.
    let query = Query::resolve(&graph, &Location::from(cli.start.as_str()), cli.goal.as_str(), cli.start_time)?;
    println!(
        "Query: {} {} -> {} departing from t={}",
        cli.start,
        graph.node(query.source).state.interval,
        cli.goal,
        cli.start_time
    );

    // 4. Plan.
    let t0 = Instant::now();
    let plan = planner.plan_observed(&graph, &query, &mut TracingObserver)?;
    let elapsed = t0.elapsed();

    println!("Profile complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  {}", plan.stats);
    println!("  reference times : {:?}", plan.reference_times);
    println!("  buffer snapshots: {}", plan.history.len());
    println!();

    // 5. Profile.
    write_profile(&graph, &plan)?;
    println!();

    // 6. Lookups.
    let mut rng = QueryRng::new(cli.seed, 0);
    let samples = plan.profile.sample_departure_times(cli.lookups, &mut rng);
    if samples.is_empty() && cli.lookups > 0 {
        println!("No lookups: the departure window {} is unbounded", plan.profile.window());
    }
    println!("{:<12} {:<12}", "Depart", "Arrive");
    println!("{}", "-".repeat(24));
    for (depart, arrive) in samples {
        println!("{:<12.3} {:<12.3}", depart, arrive);
    }

    Ok(())
}

/// One CSV row per profile segment, with the path it follows.
fn write_profile(graph: &Graph, plan: &Plan) -> Result<()> {
    let mut out = csv::Writer::from_writer(io::stdout().lock());
    out.write_record(["depart_from", "depart_to", "arrive_from", "arrive_to", "alpha", "beta", "delta", "path"])?;
    for seg in plan.profile.segments() {
        let atf = plan.profile.atf(seg.owner);
        let path = plan.profile.payload(seg.owner);
        let route = if path.is_empty() {
            "unreachable".to_owned()
        } else {
            path.iter()
                .map(|&n| graph.node(n).state.location.as_str())
                .collect::<Vec<_>>()
                .join(">")
        };
        out.write_record([
            seg.x0.to_string(),
            seg.x1.to_string(),
            seg.y0.to_string(),
            seg.y1.to_string(),
            atf.alpha().to_string(),
            atf.beta().to_string(),
            atf.delta().to_string(),
            route,
        ])?;
    }
    out.flush()?;
    Ok(())
}
