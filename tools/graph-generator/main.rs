use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use torchwright::catalog::{LEARNABLE_TYPES, OPERATOR_TYPES, STATELESS_TYPES};
use torchwright::graph::{Graph, Position};

/// A CLI tool to generate random layer graphs for the torchwright generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated graph JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// The number of input nodes
    #[arg(long, default_value_t = 1)]
    inputs: usize,

    /// The number of layer and operator nodes between inputs and the output
    #[arg(long, default_value_t = 12)]
    layers: usize,

    /// Probability that a step merges two branches with an operator node
    #[arg(long, default_value_t = 0.25)]
    merge_chance: f64,

    /// Seed for reproducible graphs
    #[arg(long)]
    seed: Option<u64>,
}

/// One planned node: its type and the planned nodes feeding it, in port order.
struct Step {
    node_type: &'static str,
    sources: Vec<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.inputs == 0 {
        eprintln!("Error: --inputs must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.merge_chance) {
        eprintln!(
            "Error: --merge-chance ({}) must lie between 0 and 1",
            cli.merge_chance
        );
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating graph with {} input(s) and {} layer(s)...",
        cli.inputs, cli.layers
    );

    let steps = plan_steps(&mut rng, cli.inputs, cli.layers, cli.merge_chance);
    let graph = build_graph(&steps)?;

    let json_output = graph.to_document().to_json()?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} nodes and {} links, saved to '{}'",
        graph.len(),
        graph.link_count(),
        cli.output
    );

    Ok(())
}

/// Plans a random DAG. Inputs come first, the single output last; every other
/// step only reads from steps planned before it, so the plan is acyclic.
fn plan_steps(rng: &mut StdRng, inputs: usize, layers: usize, merge_chance: f64) -> Vec<Step> {
    let mut steps: Vec<Step> = (0..inputs)
        .map(|_| Step {
            node_type: "Input",
            sources: vec![],
        })
        .collect();
    let layer_types: Vec<&'static str> = LEARNABLE_TYPES
        .iter()
        .chain(STATELESS_TYPES.iter())
        .copied()
        .collect();

    for _ in 0..layers {
        let newest = steps.len() - 1;
        let step = if steps.len() >= 2 && rng.random_bool(merge_chance) {
            let other = rng.random_range(0..newest);
            Step {
                node_type: OPERATOR_TYPES.choose(rng).copied().unwrap_or("Add"),
                sources: vec![newest, other],
            }
        } else {
            // Mostly extend the newest branch, sometimes fork an older one.
            let source = if rng.random_bool(0.7) {
                newest
            } else {
                rng.random_range(0..=newest)
            };
            Step {
                node_type: layer_types.choose(rng).copied().unwrap_or("Identity"),
                sources: vec![source],
            }
        };
        steps.push(step);
    }

    let last = steps.len() - 1;
    steps.push(Step {
        node_type: "Output",
        sources: vec![last],
    });
    steps
}

fn build_graph(steps: &[Step]) -> Result<Graph, Box<dyn std::error::Error>> {
    let mut consumers = vec![0u32; steps.len()];
    for step in steps {
        for &source in &step.sources {
            consumers[source] += 1;
        }
    }

    let mut graph = Graph::new();
    let mut ids = Vec::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        let n_out = if step.node_type == "Output" {
            0
        } else {
            consumers[i].max(1)
        };
        let id = graph.add_node(step.node_type, step.sources.len() as u32, n_out);
        graph.move_node(id, Position::new(i as f64 * 160.0, 0.0))?;
        ids.push(id);
    }

    let mut next_out_port = vec![0u32; steps.len()];
    for (i, step) in steps.iter().enumerate() {
        for (target_port, &source) in step.sources.iter().enumerate() {
            graph.connect(ids[source], next_out_port[source], ids[i], target_port as u32)?;
            next_out_port[source] += 1;
        }
    }
    Ok(graph)
}
