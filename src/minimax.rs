//! Exhaustive adversarial search: minimax with alpha-beta pruning.

use crate::error::GameError;
use crate::game::{Game, Role};

/// An agent that plays a position out to the end of the game tree.
///
/// # Notes
/// Both sides of the classical maximizer/minimizer pair run through one
/// search function; the role tag picks the comparison direction and the
/// extremum the running best starts from. Pruning only skips subtrees that
/// cannot influence the final value, so the result is identical to an
/// unpruned minimax.
///
/// Cost is exponential in the number of open cells, which is why the hybrid
/// selector only hands positions over once the remaining space is small.
pub struct Minimax {
    role: Role,

    /// The number of nodes searched by this agent so far (for diagnostics only)
    pub node_count: usize,
}

impl Minimax {
    /// Creates a new exact-search agent playing `role`
    pub fn new(role: Role) -> Self {
        Self {
            role,
            node_count: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The game-theoretic value of the position with this agent to move, and
    /// an optimal move reaching it.
    ///
    /// A terminal position yields `(utility, None)`. Otherwise the move is
    /// the first one in enumeration order achieving the optimal value —
    /// repeated calls on equal positions return the same pair.
    pub fn value<G: Game>(&mut self, game: &G) -> Result<(i32, Option<G::Move>), GameError> {
        self.search(game, self.role, i32::MIN, i32::MAX)
    }

    /// Picks an optimal move for this agent's role.
    ///
    /// By contract the position must still have moves left; a terminal
    /// position yields [`GameError::NoMovesAvailable`].
    pub fn choose_move<G: Game>(&mut self, game: &G) -> Result<G::Move, GameError> {
        let (_, best_move) = self.value(game)?;
        best_move.ok_or(GameError::NoMovesAvailable)
    }

    fn search<G: Game>(
        &mut self,
        game: &G,
        role: Role,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<(i32, Option<G::Move>), GameError> {
        self.node_count += 1;

        // Is the game over?
        if let Some(utility) = game.utility() {
            return Ok((utility.score(), None));
        }

        // Which move leads to the best outcome for the mover?
        let mut best_value = match role {
            Role::Maximizer => i32::MIN,
            Role::Minimizer => i32::MAX,
        };
        let mut best_move = None;

        for mv in game.moves() {
            let child = game.child(mv, role)?;
            let (value, _) = self.search(&child, role.opponent(), alpha, beta)?;

            // strict comparison: ties keep the first move reaching the value
            let improves = match role {
                Role::Maximizer => value > best_value,
                Role::Minimizer => value < best_value,
            };
            if best_move.is_none() || improves {
                best_value = value;
                best_move = Some(mv);
            }

            match role {
                Role::Maximizer => alpha = alpha.max(best_value),
                Role::Minimizer => beta = beta.min(best_value),
            }
            // the rest of the subtree cannot change the result
            if beta <= alpha {
                break;
            }
        }

        Ok((best_value, best_move))
    }
}
