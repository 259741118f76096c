use clap::{Parser, Subcommand};
use std::path::PathBuf;

use simplexcalc_session::{ModelDocument, Session};
use simplexcalc_solver::SolveError;

#[derive(Parser)]
#[command(name = "simplexcalc")]
#[command(about = "A simplex calculator for small linear programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the model and the stored solution history
    Show {
        /// The model file to print
        file: PathBuf,
    },
    /// Solve the model and print the optimal assignment
    Solve {
        /// The model file to solve
        file: PathBuf,
        /// Write the updated document (solution history included) here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a model file for errors
    Check {
        /// The model file to check
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file } => {
            let session = match Session::load(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error loading model: {}", e);
                    std::process::exit(1);
                }
            };

            print!("{}", session.model());
            println!("Solutions:");
            println!("{}", session.history());
        }
        Commands::Solve { file, output } => {
            let mut session = match Session::load(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error loading model: {}", e);
                    std::process::exit(1);
                }
            };

            match session.solve() {
                Ok(solution) => {
                    println!("Status: OPTIMAL");
                    println!("{}", solution);
                }
                Err(SolveError::Unbounded) => {
                    println!("Status: UNBOUNDED");
                    println!("The problem has no finite optimal solution.");
                    std::process::exit(1);
                }
                Err(SolveError::Infeasible) => {
                    println!("Status: INFEASIBLE");
                    println!("No solution exists that satisfies all constraints.");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }

            if let Some(path) = output {
                if let Err(e) = session.save(&path) {
                    eprintln!("Error saving model: {}", e);
                    std::process::exit(1);
                }
                println!();
                println!("Saved to {}", path.display());
            }
        }
        Commands::Check { file } => {
            let document = match ModelDocument::load(&file) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            };

            match document.to_model() {
                Ok(model) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", model.num_variables());
                    println!("  {} constraints", model.num_constraints());
                    println!("  {} solutions", document.solutions.len());
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
