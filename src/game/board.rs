use std::str::FromStr;

use chess::{Board, ChessMove, Color, Game, Piece, Square};
use log::debug;

use crate::error::SessionError;

/// Sentinel the platform sends in place of a FEN for the standard start.
const STARTPOS: &str = "startpos";

/// Canonical board for the active session.
///
/// Kept in lockstep with the ordered move list arriving on the game event
/// stream; legality and move application are delegated to the rules engine.
/// One synchronizer lives and dies with one session.
pub struct BoardSynchronizer {
    game: Game,
    applied: usize,
}

impl BoardSynchronizer {
    pub fn new() -> Self {
        BoardSynchronizer {
            game: Game::new(),
            applied: 0,
        }
    }

    /// Reset to the given position, or the standard start when the platform
    /// supplies none. Safe to call again at the start of every session.
    pub fn initialize(&mut self, fen: Option<&str>) -> Result<(), SessionError> {
        self.game = match fen {
            None => Game::new(),
            Some(STARTPOS) => Game::new(),
            Some(fen) => {
                let board = Board::from_str(fen).map_err(|e| SessionError::InvalidPosition {
                    fen: fen.to_string(),
                    reason: e.to_string(),
                })?;
                Game::new_with_board(board)
            }
        };
        self.applied = 0;
        Ok(())
    }

    /// Apply one move in coordinate notation.
    pub fn apply_move(&mut self, uci: &str) -> Result<(), SessionError> {
        let chess_move = parse_coordinate(uci)?;
        if !self.game.make_move(chess_move) {
            return Err(SessionError::IllegalMove {
                uci: uci.to_string(),
            });
        }
        self.applied += 1;
        Ok(())
    }

    /// Apply the not-yet-applied suffix of an ordered move list. Returns how
    /// many moves were appended; a list no longer than what is already on
    /// the board appends nothing.
    pub fn catch_up<'a>(
        &mut self,
        moves: impl Iterator<Item = &'a str>,
    ) -> Result<usize, SessionError> {
        let mut appended = 0;
        for (index, uci) in moves.enumerate() {
            if index < self.applied {
                continue;
            }
            self.apply_move(uci)?;
            appended += 1;
        }
        if appended > 0 {
            debug!("applied {} new move(s), {} on the board", appended, self.applied);
        }
        Ok(appended)
    }

    /// Colour to act next.
    pub fn side_to_move(&self) -> Color {
        self.game.side_to_move()
    }

    /// How many moves from the stream are on the board.
    pub fn moves_applied(&self) -> usize {
        self.applied
    }

    /// Position notation for the current board.
    pub fn position(&self) -> String {
        self.game.current_position().to_string()
    }
}

impl Default for BoardSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse source-square/destination-square text such as "e2e4" or "e7e8q".
fn parse_coordinate(uci: &str) -> Result<ChessMove, SessionError> {
    let malformed = || SessionError::MalformedMove(uci.to_string());
    if uci.len() < 4 || uci.len() > 5 {
        return Err(malformed());
    }
    let source = uci
        .get(0..2)
        .and_then(|s| Square::from_str(s).ok())
        .ok_or_else(malformed)?;
    let dest = uci
        .get(2..4)
        .and_then(|s| Square::from_str(s).ok())
        .ok_or_else(malformed)?;
    let promotion = match uci.get(4..5) {
        None => None,
        Some("q") => Some(Piece::Queen),
        Some("r") => Some(Piece::Rook),
        Some("b") => Some(Piece::Bishop),
        Some("n") => Some(Piece::Knight),
        Some(_) => return Err(malformed()),
    };
    Ok(ChessMove::new(source, dest, promotion))
}
