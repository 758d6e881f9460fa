//! Line-based terminal harness: prompts for picks, shows the board, reports scores.
//!
//! The game core never blocks on input. This harness owns the retry loop:
//! unparseable input and rejected picks both lead back to the prompt.

use crate::render::{display_position, render_board, render_final_scores};
use anyhow::{Result, bail};
use derive_more::Display;
use std::io::{BufRead, Write};
use strictly_memory::{Dimensions, GameSession, Outcome, PickError, PickOutcome, Player, Position};
use tracing::{debug, instrument, warn};

/// Why a position could not be read.
#[derive(Debug, Display)]
pub enum InputError {
    /// The line was not a whole number.
    #[display("Not an integer: {:?}", _0)]
    NotAnInteger(String),
    /// Rows and columns are numbered from 1.
    #[display("Numbers start at 1")]
    BelowOne,
    /// Input reached end of file.
    #[display("Input closed")]
    Closed,
    /// Reading input failed.
    #[display("Input error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for InputError {}

/// Terminal front end over any reader and writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal over the given input and output.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Plays the game to the end and returns the outcome.
    #[instrument(skip_all)]
    pub fn play(&mut self, game: &mut GameSession) -> Result<Outcome> {
        while !game.is_over() {
            self.show(game)?;
            match self.pick_until_accepted(game)? {
                PickOutcome::FirstRevealed { position, symbol } => {
                    writeln!(self.output, "Revealed {} at {}", symbol, display_position(position))?;
                }
                PickOutcome::TurnCompleted(report) => {
                    let (first, second) = *report.symbols();
                    writeln!(
                        self.output,
                        "Revealed {} at {}",
                        second,
                        display_position(report.played().second())
                    )?;
                    if report.played().is_match() {
                        writeln!(self.output, "Match found! ({} and {})", first, second)?;
                    } else {
                        writeln!(self.output, "No match. ({} and {})", first, second)?;
                    }
                }
            }
        }

        self.show(game)?;
        writeln!(self.output, "{}", render_final_scores(game.scores()))?;
        match game.outcome() {
            Some(outcome) => Ok(outcome),
            None => bail!("Game loop ended before the game was over"),
        }
    }

    /// Prompts until the session accepts a pick.
    #[instrument(skip_all, fields(player = %game.current_player()))]
    pub fn pick_until_accepted(&mut self, game: &mut GameSession) -> Result<PickOutcome> {
        loop {
            let position = match self.read_position(game.current_player(), game.board().dimensions()) {
                Ok(position) => position,
                Err(InputError::NotAnInteger(text)) => {
                    debug!(text, "Unparseable input");
                    writeln!(self.output, "Invalid input. Please enter integers.")?;
                    continue;
                }
                Err(InputError::BelowOne) => {
                    writeln!(self.output, "Invalid input. Try again.")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            match game.pick(position) {
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_recoverable() => {
                    debug!(%err, "Pick rejected");
                    let message = match err.as_pick() {
                        Some(PickError::AlreadyRevealedOrMatched(_)) => {
                            "Card already revealed. Choose another card."
                        }
                        Some(PickError::DuplicatePick(_)) => {
                            "You already picked that card this turn. Choose another card."
                        }
                        _ => "Invalid input. Try again.",
                    };
                    writeln!(self.output, "{}", message)?;
                }
                Err(err) => {
                    warn!(%err, "Unrecoverable turn error");
                    return Err(err.into());
                }
            }
        }
    }

    /// Reads a 1-based row and column and returns the zero-based position.
    ///
    /// Both numbers are read before either is range checked. Range checks
    /// beyond "at least 1" are left to the game.
    pub fn read_position(&mut self, player: Player, dims: Dimensions) -> Result<Position, InputError> {
        let row = self.read_number(&format!(
            "Player {}, enter the row number (1-{}): ",
            player.number(),
            dims.rows()
        ))?;
        let column = self.read_number(&format!(
            "Player {}, enter the column number (1-{}): ",
            player.number(),
            dims.columns()
        ))?;
        match (usize::try_from(row), usize::try_from(column)) {
            (Ok(row), Ok(column)) if row >= 1 && column >= 1 => Ok(Position::new(row - 1, column - 1)),
            _ => Err(InputError::BelowOne),
        }
    }

    fn read_number(&mut self, prompt: &str) -> Result<i64, InputError> {
        write!(self.output, "{}", prompt).map_err(InputError::Io)?;
        self.output.flush().map_err(InputError::Io)?;

        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(InputError::Io)? == 0 {
            return Err(InputError::Closed);
        }
        let text = line.trim();
        text.parse::<i64>().map_err(|_| InputError::NotAnInteger(text.to_string()))
    }

    fn show(&mut self, game: &GameSession) -> Result<()> {
        write!(self.output, "\n{}", render_board(&game.snapshot()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use strictly_memory::{Board, Symbol};

    fn game() -> GameSession {
        GameSession::new(Board::construct(2, 2, "ABAB".chars().map(Symbol::new).collect()).unwrap())
    }

    fn run(script: &str) -> (Result<Outcome>, String, GameSession) {
        let mut game = game();
        let mut output = Vec::new();
        let result = Terminal::new(Cursor::new(script.as_bytes().to_vec()), &mut output).play(&mut game);
        let output = String::from_utf8(output).unwrap();
        (result, output, game)
    }

    #[test]
    fn test_scripted_game() {
        // P1: (1,1) A + (2,1) A; P2: (1,2) B + (2,2) B
        let (result, output, game) = run("1\n1\n2\n1\n1\n2\n2\n2\n");
        assert_eq!(result.unwrap(), Outcome::Draw);
        assert!(game.is_over());
        assert_eq!(output.matches("Match found!").count(), 2);
        assert!(output.contains("Game Over! Final scores: Player 1 - 1, Player 2 - 1"));
        assert!(output.contains("Player 2, enter the row number (1-2): "));
    }

    #[test]
    fn test_retries_bad_input() {
        let script = concat!(
            "x\n",       // not a number
            "0\n1\n",    // row below one
            "1\n1\n",    // (1,1) A
            "1\n1\n",    // duplicate
            "3\n1\n",    // off the board
            "1\n2\n",    // (1,2) B: no match
            "1\n1\n2\n1\n", // P2 matches A
            "1\n2\n2\n2\n", // P1 matches B
        );
        let (result, output, game) = run(script);
        assert_eq!(result.unwrap(), Outcome::Draw);
        assert!(output.contains("Invalid input. Please enter integers."));
        assert!(output.contains("You already picked that card this turn."));
        assert!(output.contains("Invalid input. Try again."));
        assert!(output.contains("No match. (A and B)"));
        assert_eq!(game.move_history().len(), 3);
    }

    #[test]
    fn test_row_below_one_still_asks_for_column() {
        let mut output = Vec::new();
        let position = Terminal::new(Cursor::new(b"0\n2\n".to_vec()), &mut output)
            .read_position(Player::One, Dimensions::new(2, 2));
        assert!(matches!(position, Err(InputError::BelowOne)));

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "Player 1, enter the row number (1-2): Player 1, enter the column number (1-2): "
        );
    }

    #[test]
    fn test_column_below_one_is_rejected() {
        let mut output = Vec::new();
        let position = Terminal::new(Cursor::new(b"1\n-3\n".to_vec()), &mut output)
            .read_position(Player::Two, Dimensions::new(2, 2));
        assert!(matches!(position, Err(InputError::BelowOne)));
    }

    #[test]
    fn test_already_revealed_message() {
        // P1 matches A, then P2 tries the matched card
        let (result, output, _) = run("1\n1\n2\n1\n1\n1\n1\n2\n2\n2\n");
        assert!(result.is_ok());
        assert!(output.contains("Card already revealed. Choose another card."));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _, game) = run("1\n1\n");
        assert!(result.is_err());
        assert!(!game.is_over());
        assert_eq!(game.pending_pick(), Some(Position::new(0, 0)));
    }
}
