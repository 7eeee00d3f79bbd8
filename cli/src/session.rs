use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use sweeper_core::{CellCount, Command, Game, GameStatus, MineGenerator};

use crate::render::render_to_string;

pub const WINNING_SPEECH: &str = "Congratulations! You found all the mines!";
pub const LOSING_SPEECH: &str = "You stepped on a mine and failed!";

const MINES_PROMPT: &str = "How many mines do you want on the field?";
const COMMAND_PROMPT: &str = "Set/unset mines marks or claim a cell as free:";

/// Asks for the mine count until a number is entered.
pub fn ask_mines(input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<CellCount> {
    let mut line = String::new();
    loop {
        writeln!(output, "{MINES_PROMPT}")?;
        line.clear();
        if input.read_line(&mut line).context("reading mine count")? == 0 {
            bail!("input closed before a mine count was given");
        }
        match line.trim().parse() {
            Ok(mines) => return Ok(mines),
            Err(err) => writeln!(output, "Not a mine count: {err}")?,
        }
    }
}

/// Runs the command loop until the game ends or input runs out.
///
/// Rejected commands are reported and the player is asked again.
pub fn play<G: MineGenerator>(
    game: &mut Game<G>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<GameStatus> {
    let mut line = String::new();

    while !game.is_finished() {
        let snapshot = game.snapshot();
        output.write_all(render_to_string(&snapshot).as_bytes())?;
        writeln!(output, "Mines left: {}", snapshot.mines_left)?;
        writeln!(output, "{COMMAND_PROMPT}")?;

        line.clear();
        if input.read_line(&mut line).context("reading command")? == 0 {
            log::info!("Input closed with the game {:?}", game.status());
            return Ok(game.status());
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>().and_then(|command| game.apply(command)) {
            Ok(status) => log::debug!("{:?} -> {:?}", line.trim(), status),
            Err(err) => {
                log::debug!("Rejected {:?}: {}", line.trim(), err);
                writeln!(output, "{err}")?;
            }
        }
    }

    output.write_all(render_to_string(&game.snapshot()).as_bytes())?;
    match game.status() {
        GameStatus::Won => writeln!(output, "{WINNING_SPEECH}")?,
        GameStatus::Lost => writeln!(output, "{LOSING_SPEECH}")?,
        GameStatus::NotStarted | GameStatus::InProgress => {}
    }
    output.flush()?;
    Ok(game.status())
}
