use clap::Parser;
use std::fs;
use std::time::Instant;
use torchwright::prelude::*;
use tracing_subscriber::EnvFilter;

/// Generates PyTorch module source from a saved layer graph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the graph JSON file
    graph_path: String,

    /// Write the generated source here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Name of the generated class
    #[arg(long, default_value = "MyModel")]
    class_name: String,

    /// Base class of the generated class, e.g. `nn.Module`
    #[arg(long)]
    super_class: Option<String>,

    /// Type annotation for forward-method parameters
    #[arg(long, default_value = "torch.Tensor")]
    input_dtype: String,

    /// Declare learnable sub-modules in the initializer
    #[arg(long)]
    declare_submodules: bool,

    /// Map a custom node type onto a known one, as `Custom=Known`
    #[arg(long = "map", value_name = "CUSTOM=KNOWN")]
    mappings: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let total_start = Instant::now();

    // --- 1. File Loading ---
    let json = fs::read_to_string(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            cli.graph_path, e
        ))
    });

    // --- 2. Parsing and Conversion ---
    let graph = Graph::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load graph: {}", e)));
    eprintln!(
        "Loaded graph: {} nodes, {} links, {} input(s), {} output(s)",
        graph.len(),
        graph.link_count(),
        graph.input_nodes().len(),
        graph.output_nodes().len()
    );

    // --- 3. Configuration ---
    let mut builder = Codegen::builder(&graph)
        .with_class_name(&cli.class_name)
        .with_input_dtype(&cli.input_dtype)
        .with_submodule_declarations(cli.declare_submodules);
    if let Some(super_class) = &cli.super_class {
        builder = builder.with_super_class(super_class);
    }
    for mapping in &cli.mappings {
        let (custom, known) = mapping.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!(
                "Invalid mapping '{}', expected CUSTOM=KNOWN",
                mapping
            ))
        });
        builder = builder.with_type_mapping(custom.trim(), known.trim());
    }

    // --- 4. Generation ---
    let generate_start = Instant::now();
    let code = builder
        .build()
        .generate()
        .unwrap_or_else(|e| exit_with_error(&format!("Code generation failed: {}", e)));
    let generate_duration = generate_start.elapsed();

    // --- 5. Output ---
    match &cli.output {
        Some(path) => {
            fs::write(path, &code).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            eprintln!("  -> Wrote generated source to '{}'", path);
        }
        None => print!("{}", code),
    }

    eprintln!("Generation:           {:?}", generate_duration);
    eprintln!("Total Execution:      {:?}", total_start.elapsed());
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("torchwright={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
