use anyhow::anyhow;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::{parse_move, Bot, InvokeError};
use crate::model::{choose_target, parse_board, Fleet};

/// In-process bot driven by a closure that maps the board view to the
/// text a bot program would print.
pub struct FnBot<F> {
    name: String,
    respond: F,
}

impl<F> FnBot<F>
where
    F: FnMut(&str) -> String + Send + 'static,
{
    pub fn new(name: impl Into<String>, respond: F) -> Self {
        Self {
            name: name.into(),
            respond,
        }
    }
}

#[async_trait::async_trait]
impl<F> Bot for FnBot<F>
where
    F: FnMut(&str) -> String + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn select_move(&mut self, board: &str) -> Result<u8, InvokeError> {
        let output = (self.respond)(board);
        Ok(parse_move(&output)?)
    }
}

/// Probability-density bot. Assumes the opponent fleet has the given
/// composition and never targets a resolved cell.
pub struct AiBot {
    fleet: Fleet,
    rng: SmallRng,
}

impl AiBot {
    pub fn new(fleet: Fleet, rng: SmallRng) -> Self {
        Self { fleet, rng }
    }

    pub fn from_seed(fleet: Fleet, seed: u64) -> Self {
        Self::new(fleet, SmallRng::seed_from_u64(seed))
    }

    /// Choose a move for a serialized board.
    pub fn pick(&mut self, board: &str) -> anyhow::Result<u8> {
        let cells = parse_board(board).map_err(|e| anyhow!("unreadable board: {}", e))?;
        let index = choose_target(&cells, self.fleet.lengths(), &mut self.rng)
            .ok_or_else(|| anyhow!("no unknown cell left to target"))?;
        Ok(index as u8)
    }
}

#[async_trait::async_trait]
impl Bot for AiBot {
    fn name(&self) -> &str {
        "sample-ai"
    }

    async fn select_move(&mut self, board: &str) -> Result<u8, InvokeError> {
        self.pick(board).map_err(InvokeError::Host)
    }
}
