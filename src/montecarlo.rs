//! Sampling-based move selection with a hand-off to exact search.

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::GameError;
use crate::game::{Game, Role};
use crate::minimax::Minimax;
use crate::rollout::simulate;

/// Default number of play-outs per candidate move
pub const DEFAULT_ITERATIONS: usize = 300;

/// Default open-cell average at which sampling gives way to exact search
pub const DEFAULT_SWITCH_THRESHOLD: f64 = 18.0;

// spreads consecutive rollout indices across the seed space
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A move selector that scores candidates by repeated random play-outs.
///
/// Every legal move is scored by summing the outcomes of independent
/// rollouts. Rollouts also report how many open cells the position had
/// left; once that average falls to [`Self::with_switch_threshold`] the game
/// tree is small enough to search exhaustively, so the whole decision is
/// handed to [`Minimax`] instead of trusting the noisier sampled ranking.
/// A decision is always entirely sampled or entirely exact, never a mix.
///
/// Play-outs for one candidate are independent of each other and of the
/// shared starting position, so they fan out across a rayon thread pool.
/// Each rollout draws from its own seeded RNG stream, making the selection
/// reproducible for a given seed under any thread scheduling.
pub struct MonteCarlo {
    role: Role,
    iterations: usize,
    switch_threshold: f64,
    seed: u64,
}

impl MonteCarlo {
    /// Creates a selector for `role` with default settings and a seed drawn
    /// from the thread RNG
    pub fn new(role: Role) -> Self {
        Self {
            role,
            iterations: DEFAULT_ITERATIONS,
            switch_threshold: DEFAULT_SWITCH_THRESHOLD,
            seed: rand::rng().random(),
        }
    }

    /// Sets the number of play-outs per candidate move
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the open-cell average at which exact search takes over
    pub fn with_switch_threshold(mut self, switch_threshold: f64) -> Self {
        self.switch_threshold = switch_threshold;
        self
    }

    /// Fixes the RNG seed, making every selection reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Picks a move for the acting player.
    ///
    /// Candidates are scored in enumeration order; when two candidates tie
    /// on cumulative score the later one is kept. If the average remaining
    /// space for any candidate is at or below the switch threshold, the
    /// sampled scores are discarded and the exact engine's move for the
    /// current position is returned instead.
    pub fn choose_move<G>(&self, game: &G) -> Result<G::Move, GameError>
    where
        G: Game + Sync,
        G::Move: Send + Sync,
    {
        self.select(game, true)
    }

    /// [`Self::choose_move`], reporting per-candidate progress to the
    /// terminal while it works
    pub fn choose_move_verbose<G>(&self, game: &G) -> Result<G::Move, GameError>
    where
        G: Game + Sync,
        G::Move: Send + Sync,
    {
        self.select(game, false)
    }

    fn select<G>(&self, game: &G, silent: bool) -> Result<G::Move, GameError>
    where
        G: Game + Sync,
        G::Move: Send + Sync,
    {
        let moves = game.moves();

        let progress = if silent {
            None
        } else {
            let progress = ProgressBar::new(moves.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("Scoring candidates: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                    .progress_chars("█▓▒░  "),
            );
            Some(progress)
        };

        let mut best_total = i64::MIN;
        let mut best_move = None;

        for (candidate_index, &mv) in moves.iter().enumerate() {
            let (total, size_total) = self.sample(game, mv, candidate_index)?;
            let avg_open_cells = size_total as f64 / self.iterations as f64;

            // a small remaining space is cheaper to solve than to sample;
            // the exact answer supersedes every sampled score
            if avg_open_cells <= self.switch_threshold {
                if let Some(progress) = &progress {
                    progress.finish_and_clear();
                    println!(
                        "{:.1} open cells left on average, solving exactly",
                        avg_open_cells
                    );
                }
                return Minimax::new(self.role).choose_move(game);
            }

            if total >= best_total {
                best_total = total;
                best_move = Some(mv);
            }
            if let Some(progress) = &progress {
                progress.inc(1);
            }
        }

        if let Some(progress) = &progress {
            progress.finish_and_clear();
        }
        best_move.ok_or(GameError::NoMovesAvailable)
    }

    // sums rollout scores and open-cell counts for one candidate
    fn sample<G>(
        &self,
        game: &G,
        candidate: G::Move,
        candidate_index: usize,
    ) -> Result<(i64, u64), GameError>
    where
        G: Game + Sync,
        G::Move: Send + Sync,
    {
        (0..self.iterations)
            .into_par_iter()
            .map(move |iteration| {
                // one deterministic RNG stream per rollout, so the sum does
                // not depend on which worker ran which iteration
                let stream = (candidate_index * self.iterations + iteration) as u64;
                let mut rng =
                    StdRng::seed_from_u64(self.seed.wrapping_add(stream.wrapping_mul(SEED_STRIDE)));
                simulate(game, candidate, self.role, &mut rng)
                    .map(|outcome| (outcome.score as i64, outcome.open_cells as u64))
            })
            .try_reduce(|| (0, 0), |a, b| Ok((a.0 + b.0, a.1 + b.1)))
    }
}
