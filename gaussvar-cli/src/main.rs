use std::io;

use clap::{Parser, Subcommand, ValueEnum};
use gaussvar_core::{
    basis::{CartesianPWaveBasis, DirectionConfig, GaussianBasis, SWaveBasis},
    eigen::SolverKind,
    energy::EnergyFunctional,
    optim::{minimize, MinimizerConfig},
};
use serde::Serialize;

mod prompt;
mod report;

/// Starting widths of the three gaussian s-wave basis
const DEFAULT_WIDTHS: [f64; 3] = [0.109818, 0.405771, 2.22776];

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log the progress of the calculation to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Optimize the widths of a basis of plain gaussians
    #[command(name = "s-wave")]
    SWave {
        /// Initial gaussian widths
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_WIDTHS)]
        alphas: Vec<f64>,
        #[command(flatten)]
        minimizer: MinimizerArgs,
    },
    /// Optimize the widths of a basis of cartesian p-waves. Asks for the basis layout and
    /// the initial widths unless they are given as arguments
    #[command(name = "p-wave")]
    PWave {
        /// Number of basis functions along each cartesian direction used
        #[arg(long, value_delimiter = ',')]
        counts: Option<Vec<usize>>,
        /// Initial gaussian widths, direction by direction
        #[arg(long, value_delimiter = ',')]
        alphas: Option<Vec<f64>>,
        #[command(flatten)]
        minimizer: MinimizerArgs,
    },
    /// Solve the generalized eigenproblem of a plain gaussian basis once and print all
    /// eigenvalues and eigenvectors
    #[command(name = "diagonalize")]
    Diagonalize {
        /// Gaussian widths
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_WIDTHS)]
        alphas: Vec<f64>,
        #[arg(long, value_enum, default_value_t = SolverArg::Lowdin)]
        solver: SolverArg,
    },
}

#[derive(clap::Args, Debug)]
struct MinimizerArgs {
    /// The maximum number of simplex iterations before giving up
    #[arg(long)]
    max_iterations: Option<usize>,
    /// The search has converged when the simplex size drops below this
    #[arg(long)]
    tolerance: Option<f64>,
    /// Initial simplex step along every width
    #[arg(long)]
    step: Option<f64>,
    /// How to solve the generalized eigenproblem
    #[arg(long, value_enum, default_value_t = SolverArg::Cholesky)]
    solver: SolverArg,
    /// Only evaluate the energy at the initial widths
    #[arg(long)]
    single_point: bool,
    /// Also print the result as json
    #[arg(long)]
    json: bool,
}

impl MinimizerArgs {
    fn config(&self, preset: MinimizerConfig) -> MinimizerConfig {
        MinimizerConfig {
            max_iterations: self.max_iterations.unwrap_or(preset.max_iterations),
            tolerance: self.tolerance.unwrap_or(preset.tolerance),
            initial_step: self.step.unwrap_or(preset.initial_step),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SolverArg {
    /// Reduce to a standard eigenproblem with the cholesky factor of the overlap
    Cholesky,
    /// Orthogonalize the basis through the eigenvectors of the overlap
    Lowdin,
}

impl From<SolverArg> for SolverKind {
    fn from(value: SolverArg) -> Self {
        match value {
            SolverArg::Cholesky => SolverKind::Cholesky,
            SolverArg::Lowdin => SolverKind::Lowdin,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();

    pretty_env_logger::formatted_builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_env("RUST_LOG")
        .init();

    match args.command {
        Command::SWave { alphas, minimizer } => optimize(
            SWaveBasis::new(alphas.len()),
            &alphas,
            &minimizer,
            MinimizerConfig::s_wave(),
            report::S_WAVE_PRECISION,
        ),
        Command::PWave {
            counts,
            alphas,
            minimizer,
        } => {
            let mut prompter = prompt::Prompter::new(io::stdin().lock(), io::stdout());

            let directions = match counts {
                Some(counts) => DirectionConfig::new(counts)?,
                None => prompt::read_direction_config(&mut prompter)?,
            };
            let alphas = match alphas {
                Some(alphas) => alphas,
                None => prompt::read_widths(&mut prompter, directions.n_basis())?,
            };
            println!("Dimension N {}", alphas.len());

            optimize(
                CartesianPWaveBasis::new(directions),
                &alphas,
                &minimizer,
                MinimizerConfig::p_wave(),
                report::P_WAVE_PRECISION,
            )
        }
        Command::Diagonalize { alphas, solver } => {
            let functional =
                EnergyFunctional::new(SWaveBasis::new(alphas.len()), SolverKind::from(solver));
            let spectrum = functional.spectrum(&alphas)?;
            log::debug!("ground state coefficients {}", spectrum.ground_state());

            for line in report::spectrum_lines(&spectrum) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn optimize<B: GaussianBasis + Serialize>(
    basis: B,
    alphas: &[f64],
    args: &MinimizerArgs,
    preset: MinimizerConfig,
    precision: usize,
) -> anyhow::Result<()> {
    let config = args.config(preset);
    let functional = EnergyFunctional::new(basis, SolverKind::from(args.solver));

    if args.single_point {
        let energy = functional.evaluate(alphas)?;
        println!("{energy:.8}");

        if args.json {
            let summary = report::SinglePointSummary {
                basis: functional.basis(),
                widths: alphas,
                energy,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        return Ok(());
    }

    let minimum = minimize(&functional, alphas, &config, |iteration| {
        report::print_iteration(iteration, precision)
    })?;
    println!("{}", report::outcome_line(&minimum));

    if args.json {
        let summary = report::OptimizationSummary {
            basis: functional.basis(),
            config: &config,
            minimum: &minimum,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
