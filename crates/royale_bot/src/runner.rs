//! Turn loop.

use std::io::{BufRead, Write};

use royale_core::planner::Planner;
use royale_core::policy::Policy;
use tracing::{debug, info};

use crate::protocol::{read_layout, read_turn, Result, TokenReader};

/// Drives one game: reads the layout, then plans every turn until input ends.
pub struct BotRunner<R, W> {
    reader: TokenReader<R>,
    output: W,
    planner: Planner,
}

impl<R: BufRead, W: Write> BotRunner<R, W> {
    /// Create a runner over the given streams.
    pub fn new(input: R, output: W, policy: Policy) -> Self {
        Self {
            reader: TokenReader::new(input),
            output,
            planner: Planner::new(policy),
        }
    }

    /// Play until input ends. Returns the number of turns answered.
    ///
    /// # Errors
    ///
    /// Any malformed input or failed write ends the game.
    pub fn run(mut self) -> Result<u32> {
        let layout = read_layout(&mut self.reader)?;
        info!(
            sites = layout.len(),
            policy = %self.planner.policy().name,
            "Game started"
        );

        let mut turns = 0u32;
        while let Some(turn) = read_turn(&mut self.reader, &layout)? {
            turns += 1;
            let orders = self.planner.plan_turn(&turn);

            writeln!(self.output, "{}", orders.queen)?;
            writeln!(self.output, "{}", orders.training)?;
            self.output.flush()?;

            debug!(
                turn = turns,
                gold = turn.gold,
                queen = %orders.queen,
                training = %orders.training,
                "Orders sent"
            );
        }

        info!(turns, "Input closed");
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolError;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<u32>, String) {
        let mut output = Vec::new();
        let result = BotRunner::new(Cursor::new(input), &mut output, Policy::default()).run();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_layout_only_plays_no_turns() {
        let (result, output) = run("1\n0 500 500 60\n");
        assert_eq!(result.unwrap(), 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_two_lines_per_turn() {
        let turn = "0 -1\n0 -1 -1 -1 -1 -1 -1\n2\n100 100 0 -1 200\n1800 900 1 -1 200\n";
        let input = format!("1\n0 500 500 60\n{turn}{turn}");

        let (result, output) = run(&input);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(output, "BUILD 0 MINE\nTRAIN\nBUILD 0 MINE\nTRAIN\n");
    }

    #[test]
    fn test_truncated_turn_is_fatal() {
        let input = "1\n0 500 500 60\n0 -1\n0 -1 -1";
        let (result, output) = run(input);
        assert!(matches!(result, Err(ProtocolError::UnexpectedEof { .. })));
        assert!(output.is_empty());
    }
}
