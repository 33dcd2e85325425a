//! Biased-random play-outs used to estimate the value of a candidate move.

use rand::Rng;

use crate::error::GameError;
use crate::game::{Game, Role, Utility};

/// Result of a single play-out, in the acting player's frame.
#[derive(Copy, Clone, Debug)]
pub struct RolloutOutcome {
    /// +1 the actor won, 0 draw, -1 the opponent won
    pub score: i32,
    /// Open cells left immediately after the candidate move was applied
    pub open_cells: usize,
}

/// Plays one game to completion from `candidate`, applied by `actor`.
///
/// After the candidate move the opponent moves first and turns alternate
/// until the game is decided. Each ply the current mover sorts its legal
/// moves into four buckets by the utility of its own child — an immediate
/// win, a draw, a still-open game, or an immediate opponent win — and picks
/// uniformly at random from the best non-empty bucket. A losing move is only
/// ever picked when nothing better exists.
///
/// Pure uniform play under-samples forced wins and blocks; greedy-random
/// play stays cheap and stochastic while approximating sensible play.
pub fn simulate<G: Game>(
    game: &G,
    candidate: G::Move,
    actor: Role,
    rng: &mut impl Rng,
) -> Result<RolloutOutcome, GameError> {
    let mut state = game.child(candidate, actor)?;
    let open_cells = state.open_cells();
    let mut mover = actor.opponent();

    let final_utility = loop {
        if let Some(utility) = state.utility() {
            break utility;
        }

        let mut winning = Vec::new();
        let mut tying = Vec::new();
        let mut neutral = Vec::new();
        let mut losing = Vec::new();

        // buckets are judged from the current mover's own perspective
        for mv in state.moves() {
            let child = state.child(mv, mover)?;
            match child.utility() {
                Some(utility) if utility == mover.win_utility() => winning.push(mv),
                Some(Utility::Draw) => tying.push(mv),
                None => neutral.push(mv),
                Some(_) => losing.push(mv),
            }
        }

        let bucket = [winning, tying, neutral, losing]
            .into_iter()
            .find(|bucket| !bucket.is_empty())
            .expect("a non-terminal position has at least one legal move");
        let mv = bucket[rng.random_range(0..bucket.len())];

        state = state.child(mv, mover)?;
        mover = mover.opponent();
    };

    let score = match final_utility {
        utility if utility == actor.win_utility() => 1,
        Utility::Draw => 0,
        _ => -1,
    };
    Ok(RolloutOutcome { score, open_cells })
}
