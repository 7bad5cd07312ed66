//! Trigon CLI - Delaunay triangulation and mesh analysis tool.
//!
//! Usage: trigon <COMMAND> [OPTIONS]
//!
//! Run `trigon --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use trigon::algo::curvature;
use trigon::algo::delaunay::DelaunayBuilder;
use trigon::io;
use trigon::mesh::{trace_boundary, HalfEdgeMesh};

/// Corners of the bounding triangle every triangulation starts from.
const CORNERS: [Point2<f64>; 3] = [
    Point2::new(0.0, 0.0),
    Point2::new(50.0, 100.0),
    Point2::new(100.0, 0.0),
];
const CENTER: Point2<f64> = Point2::new(50.0, 50.0);

#[derive(Parser)]
#[command(name = "trigon")]
#[command(author, version, about = "Delaunay triangulation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Delaunay triangulation of random points
    Triangulate {
        /// Output mesh file (.m)
        output: PathBuf,

        /// Number of random points to insert
        #[arg(short, long, default_value = "25")]
        points: usize,

        /// Seed for the random number generator (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Left edge of the sampling rectangle
        #[arg(long, default_value = "30.0")]
        min_x: f64,

        /// Bottom edge of the sampling rectangle
        #[arg(long, default_value = "5.0")]
        min_y: f64,

        /// Right edge of the sampling rectangle
        #[arg(long, default_value = "70.0")]
        max_x: f64,

        /// Top edge of the sampling rectangle
        #[arg(long, default_value = "40.0")]
        max_y: f64,
    },

    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Show Gauss curvature statistics
        #[arg(long)]
        curvature: bool,
    },

    /// Trace boundary loops and write them to files
    Trace {
        /// Input mesh file
        input: PathBuf,

        /// Output file prefix; loops land in <PREFIX>_<N>.loop
        prefix: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Triangulate {
            output,
            points,
            seed,
            min_x,
            min_y,
            max_x,
            max_y,
        } => {
            cmd_triangulate(&output, points, seed, (min_x, min_y), (max_x, max_y))?;
        }

        Commands::Info { input, curvature: show_curvature } => {
            cmd_info(&input, show_curvature)?;
        }

        Commands::Trace { input, prefix } => {
            cmd_trace(&input, &prefix)?;
        }
    }

    Ok(())
}

fn cmd_triangulate(
    output: &PathBuf,
    points: usize,
    seed: Option<u64>,
    min: (f64, f64),
    max: (f64, f64),
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut mesh = HalfEdgeMesh::new();
    let mut builder = DelaunayBuilder::seed(&mut mesh, CORNERS, CENTER)?;

    println!("Inserting {} random points...", points);
    let start = Instant::now();
    for _ in 0..points {
        let x = rng.gen_range(min.0..max.0);
        let y = rng.gen_range(min.1..max.1);
        builder.insert(&mut mesh, Point2::new(x, y))?;
    }
    let elapsed = start.elapsed();

    println!(
        "Result: {} vertices, {} edges, {} faces ({:.2?})",
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces(),
        elapsed
    );

    io::save(&mesh, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}

fn cmd_info(input: &PathBuf, show_curvature: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", mesh.num_edges());
    println!("Faces: {}", mesh.num_faces());
    println!("Half-edges: {}", mesh.num_halfedges());

    let euler = curvature::euler_characteristic(&mesh);
    println!("Euler characteristic: {}", euler);

    let loops = trace_boundary(&mesh)?;
    if loops.is_empty() {
        println!("Topology: closed (no boundary)");
    } else {
        println!("Topology: open ({} boundary loops)", loops.len());
        for (i, l) in loops.iter().enumerate() {
            println!("  Loop {}: {} half-edges, length {:.6}", i, l.len(), l.length());
        }
    }
    println!("Genus: {}", curvature::genus(&mesh)?);

    if show_curvature {
        println!("\nCurvature:");
        let total = curvature::gauss_curvature(&mut mesh);
        let values: Vec<f64> = mesh
            .vertex_ids()
            .map(|v| mesh.vertex(v).curvature)
            .collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        println!("  Per vertex: min={:.4}, max={:.4}", min, max);
        println!(
            "  Total: {:.6} ({:.4} pi)",
            total,
            total / std::f64::consts::PI
        );
    }

    Ok(())
}

fn cmd_trace(input: &PathBuf, prefix: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    let loops = trace_boundary(&mesh)?;
    if loops.is_empty() {
        println!("Mesh is closed; no boundary loops to write");
        return Ok(());
    }

    for (i, l) in loops.iter().enumerate() {
        let path = PathBuf::from(format!("{}_{}.loop", prefix, i));
        io::loops::save(&mesh, l, &path)?;
        println!(
            "Loop {}: {} half-edges, length {:.6} -> {}",
            i,
            l.len(),
            l.length(),
            path.display()
        );
    }

    Ok(())
}
