//! Human player reading algebraic notation from a line-based terminal.

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};
use strictly_othello::{Color, MoveError, Othello, Player, PlayerError, Square};
use tracing::{debug, instrument};

/// Human player that types squares such as `d3`.
///
/// The board is printed when the turn begins. Malformed notation and
/// squares that are not legal moves are rejected locally with a new prompt,
/// so the orchestrator only ever sees legal squares from this player.
pub struct TerminalPlayer<R, W> {
    name: String,
    color: Color,
    input: R,
    output: W,
}

impl TerminalPlayer<BufReader<Stdin>, Stdout> {
    /// Human player on standard input and output.
    pub fn stdio(color: Color) -> Self {
        Self::new(color, BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPlayer<R, W> {
    /// Human player on arbitrary streams.
    pub fn new(color: Color, input: R, output: W) -> Self {
        Self {
            name: format!("human ({})", color),
            color,
            input,
            output,
        }
    }

    /// Returns the output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn prompt(&mut self, game: &Othello) -> std::io::Result<()> {
        write!(
            self.output,
            "Ply {} >> {} to move: ",
            game.turn_number(),
            self.color
        )?;
        self.output.flush()
    }

    fn read_token(&mut self) -> Result<String, PlayerError> {
        // Bytes, so a non-UTF-8 line is rejected as bad notation instead of an I/O error
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(PlayerError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }
}

impl<R, W> Player for TerminalPlayer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(color = %self.color))]
    fn get_move(&mut self, game: &Othello) -> Result<Square, PlayerError> {
        self.prompt(game)?;
        loop {
            let token = self.read_token()?;
            let square = match Square::from_algebraic(&token) {
                Ok(square) => square,
                Err(error) => {
                    debug!(%error, "Unreadable square");
                    write!(self.output, "{}. Try again: ", error)?;
                    self.output.flush()?;
                    continue;
                }
            };

            if game.board().is_legal_move(square, self.color) {
                return Ok(square);
            }

            debug!(square = %square, "Square is not a legal move");
            write!(self.output, "Illegal move! Try again: ")?;
            self.output.flush()?;
        }
    }

    fn begin(&mut self, game: &Othello) {
        if let Err(error) = writeln!(self.output, "\n{}", game.board().pretty()) {
            debug!(%error, "Could not print board");
        }
    }

    fn fail(&mut self, _game: &Othello, error: &MoveError) {
        if let Err(io_error) = writeln!(self.output, "Illegal move! ({})", error) {
            debug!(error = %io_error, "Could not report illegal move");
        }
    }
}
