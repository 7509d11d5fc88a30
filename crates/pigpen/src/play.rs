//! Text-mode play: the human places blocks, the pig answers.

use anyhow::Result;
use derive_more::{Display, Error};
use pigpen_board::{AdviceResolution, Advisor, Coord, Game, Phase, TokenStep};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// `<col> <row>`: block a cell.
    Place(Coord),
    /// `hint`: let the advisor place this turn's block.
    Hint,
    /// `reset`: new obstacles, pig back to the start.
    Reset,
    /// `help`: list commands.
    Help,
    /// `quit`: leave.
    Quit,
}

/// Unrecognised input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognised command '{}'; type 'help'", input)]
pub struct CommandError {
    /// What was typed.
    pub input: String,
}

impl FromStr for PlayCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let err = || CommandError {
            input: line.to_string(),
        };
        match line.to_ascii_lowercase().as_str() {
            "hint" | "h" => return Ok(PlayCommand::Hint),
            "reset" | "r" => return Ok(PlayCommand::Reset),
            "help" | "?" => return Ok(PlayCommand::Help),
            "quit" | "q" | "exit" => return Ok(PlayCommand::Quit),
            _ => {}
        }
        let mut parts = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty());
        let (Some(col), Some(row), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };
        let col = col.parse().map_err(|_| err())?;
        let row = row.parse().map_err(|_| err())?;
        Ok(PlayCommand::Place(Coord::new(col, row)))
    }
}

const HELP: &str = "Commands: <col> <row> to block a cell, hint, reset, quit";

/// Runs the text loop until `quit` or end of input.
///
/// Pig turns run automatically after each placement. A board that is
/// already decided, at startup or after a reset, is reported right away.
#[instrument(skip_all)]
pub async fn run_text<R: AsyncBufRead + Unpin, W: Write>(
    game: &mut Game,
    advisor: &dyn Advisor,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{HELP}")?;
    game.check_termination();
    render(game, out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            debug!("End of input");
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        debug!(?command, "Player command");

        match command {
            PlayCommand::Quit => break,
            PlayCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            PlayCommand::Reset => {
                game.reset();
                writeln!(out, "New board.")?;
            }
            PlayCommand::Place(cell) => match game.place_block(cell) {
                Ok(_) => writeln!(out, "Blocked {cell}.")?,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            },
            PlayCommand::Hint => match game.request_advice(advisor).await {
                Ok(AdviceResolution::Applied {
                    cell, rationale, ..
                }) => {
                    for thought in &rationale {
                        writeln!(out, "  {thought}")?;
                    }
                    writeln!(out, "{} blocked {cell}.", advisor.name())?;
                }
                Ok(AdviceResolution::Discarded) => continue,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            },
        }

        if game.phase() == Phase::TokenMove {
            pig_turn(game, out)?;
        }
        game.check_termination();
        render(game, out)?;
    }
    Ok(())
}

fn pig_turn<W: Write>(game: &mut Game, out: &mut W) -> Result<()> {
    let turn = game.token_turn()?;
    match turn.step {
        TokenStep::Pursuit(to) | TokenStep::Wander(to) => {
            writeln!(out, "The pig runs {} -> {to}.", turn.from)?
        }
        TokenStep::Stall => writeln!(out, "The pig cannot move.")?,
    }
    Ok(())
}

fn render<W: Write>(game: &Game, out: &mut W) -> std::io::Result<()> {
    write!(out, "{}", game.board().display())?;
    match game.phase() {
        Phase::OpeningBlock(_) => writeln!(
            out,
            "Opening: {} block(s) before the pig moves.",
            game.opening_remaining()
        )?,
        Phase::MainBlock => writeln!(out, "Your turn: block a cell.")?,
        Phase::TokenMove => writeln!(out, "The pig is moving.")?,
        Phase::Terminal(outcome) => {
            let verdict = if outcome.blocker_won() {
                "You win"
            } else {
                "You lose"
            };
            writeln!(out, "{outcome}. {verdict}! Type 'reset' or 'quit'.")?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("2 4".parse(), Ok(PlayCommand::Place(Coord::new(2, 4))));
        assert_eq!(" 3,7 \n".parse(), Ok(PlayCommand::Place(Coord::new(3, 7))));
        assert_eq!("-1 0".parse(), Ok(PlayCommand::Place(Coord::new(-1, 0))));
        assert_eq!("HINT".parse(), Ok(PlayCommand::Hint));
        assert_eq!("reset".parse(), Ok(PlayCommand::Reset));
        assert_eq!("q".parse(), Ok(PlayCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<PlayCommand>().is_err());
        assert!("1".parse::<PlayCommand>().is_err());
        assert!("1 2 3".parse::<PlayCommand>().is_err());
        assert!("a b".parse::<PlayCommand>().is_err());
    }
}
