/*
cli_options.rs

Copyright 2026 The Gridstroke Authors

This file is part of Gridstroke.

Gridstroke is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Gridstroke is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Gridstroke. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers tuning the generator.
//! The tool generates puzzles and prints them as JSON.
//!
//! # Examples
//!
//! List the symbol kinds:
//!
//! ```text
//! $ gridstroke --ls
//! gap                          edge
//! crystals                     cell
//! ghosts                       cell
//! ...
//! ```
//!
//! Generate three puzzles with stars and color squares, solve them, and print some statistics:
//!
//! ```text
//! $ gridstroke -k stars,color-squares -c 3 --seed 12 --solve -s
//! ```
//!
//! The `--config` option loads the generator settings from a JSON file. Missing fields keep
//! their default value:
//!
//! ```text
//! $ cat config.json
//! { "implicit_gaps": false, "attempts": { "max": 400 } }
//! $ gridstroke -k negator,triangles --config config.json
//! ```

use clap::Parser;
use log::debug;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

use gridstroke::generator::config::{self, ConfigError, GeneratorConfig};
use gridstroke::generator::puzzles::{PuzzleGenerator, PuzzleOverrides};
use gridstroke::grid::path::Path;
use gridstroke::grid::point::GridPoint;
use gridstroke::puzzle::Puzzle;
use gridstroke::solver::evaluation::{self, ConstraintEvaluation};
use gridstroke::solver::path_solver::{PathSolver, SolveMode};
use gridstroke::symbols::kind::{Anchor, Kind};

const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nLicense GPL-3.0-or-later <https://gnu.org/licenses/gpl.html>"
);

/// Generate Gridstroke puzzles for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the symbol kinds
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Kinds of symbols to place, separated by commas
    #[arg(value_enum, short, long, value_delimiter = ',', group = "generate")]
    kinds: Vec<Kind>,

    /// Seed of the first puzzle. The next puzzles use the following seeds. Defaults to the
    /// current time
    #[arg(long)]
    seed: Option<i32>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// JSON file with the generator settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with forced edges, start, end, or symbols
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Search for the simplest solution of every puzzle
    #[arg(long, default_value_t = false)]
    solve: bool,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Generated puzzle, as printed.
#[derive(Serialize)]
struct Output<'a> {
    seed: i32,
    puzzle: &'a Puzzle,

    /// Path stored by the generator.
    hint: Option<&'a Path>,

    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Solution>,
}

#[derive(Serialize)]
struct Solution {
    path: Vec<GridPoint>,
    evaluation: ConstraintEvaluation,
    visits: usize,
}

/// Seed derived from the current time.
fn time_seed() -> i32 {
    (chrono::Local::now().timestamp() % i64::from(i32::MAX)) as i32
}

/// Load the optional settings and overrides.
fn load(args: &Args) -> Result<(GeneratorConfig, Option<PuzzleOverrides>), ConfigError> {
    let config: GeneratorConfig = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    let overrides: Option<PuzzleOverrides> = match &args.overrides {
        Some(path) => Some(config::load_json(path)?),
        None => None,
    };
    Ok((config, overrides))
}

/// Search for the simplest solution of the puzzle.
fn solve(puzzle: &Puzzle, config: &GeneratorConfig) -> Option<Solution> {
    let mut solver: PathSolver = PathSolver::new(puzzle, config.solver.fallback)
        .with_mode(SolveMode::Simplest)
        .with_limits(config.limits);
    let path: Path = solver.solve()?;
    Some(Solution {
        evaluation: evaluation::check_path_with(puzzle, &path, &config.limits),
        path: path.into(),
        visits: solver.visits,
    })
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the kinds
    //
    if args.ls {
        for kind in Kind::all() {
            let anchor: &str = match kind.anchor() {
                Anchor::Edge => "edge",
                Anchor::Cell => "cell",
                Anchor::Site => "node or edge",
            };
            println!("{:<28} {anchor}", kind.to_string());
        }
        return 0;
    }

    let (config, overrides) = match load(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    let forced_symbols: bool = overrides
        .as_ref()
        .is_some_and(|o| o.forced_symbol_targets.is_some());
    if args.kinds.is_empty() && !forced_symbols {
        eprintln!("No kind given. Use --ls to list the available kinds.");
        return 1;
    }

    let first_seed: i32 = args.seed.unwrap_or_else(time_seed);
    let mut generator: PuzzleGenerator = PuzzleGenerator::new(config.clone());

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut fallbacks: usize = 0;
    let mut errors: usize = 0;
    let mut unsolved: usize = 0;
    for i in 0..args.count {
        let seed: i32 = first_seed.wrapping_add(i as i32);
        debug!("Puzzle {i}, seed {seed}");

        let puzzle: Puzzle = match generator.generate(seed, &args.kinds, overrides.as_ref()) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Seed {seed}: {e}");
                errors += 1;
                continue;
            }
        };
        total += generator.stats.duration;
        max = max.max(generator.stats.duration);
        attempts += generator.stats.attempts;
        if generator.stats.fallback_tier.is_some() {
            fallbacks += 1;
        }

        let solution: Option<Solution> = if args.solve {
            let s: Option<Solution> = solve(&puzzle, &config);
            if s.is_none() {
                unsolved += 1;
            }
            s
        } else {
            None
        };
        let output: Output = Output {
            seed,
            puzzle: &puzzle,
            hint: puzzle.solution_hint.as_ref(),
            solution,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Seed {seed}: cannot serialize the puzzle: {e}");
                return 1;
            }
        }
    }

    // Print some stats
    if args.summary {
        let generated: usize = args.count - errors;
        let average: f32 = if generated > 0 {
            total / generated as f32
        } else {
            0.0
        };
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
         fallbacks = {}
            errors = {}",
            total,
            average,
            max,
            attempts / generated.max(1),
            fallbacks,
            errors
        );
        if args.solve {
            println!(
                "          unsolved = {unsolved} (solver budget {})",
                config.solver.fallback
            );
        }
    }
    if errors > 0 { 1 } else { 0 }
}
