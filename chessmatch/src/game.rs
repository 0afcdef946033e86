use std::fmt;

use anyhow::{bail, Result};
use arrayvec::ArrayVec;
use log::{debug, trace, warn};

use super::{
    has_possible_move, possible_moves, Board, ChessError, ChessPiece, ChessPosition, Color, Grid,
    MoveContext, MoveMask, Piece, PieceId, PieceKind, Position, BACK_RANK, MAX_PIECES,
};

/// Everything needed to take back one executed move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct MoveRecord {
    mover: PieceId,
    from: Position,
    to: Position,
    /// The captured piece and the cell it was captured on. For en passant, that is not `to`.
    captured: Option<(PieceId, Position)>,
    /// The Rook that moved alongside a castling King, with its origin and destination.
    castled_rook: Option<(PieceId, Position, Position)>,
}

/// A game of chess between two players, from the opening position to checkmate.
///
/// All changes to the board go through [`ChessMatch::perform_chess_move`] and
/// [`ChessMatch::replace_promoted_piece`]. Everything else is a read-only query.
///
/// # Example
/// ```
/// # use chessmatch::{ChessMatch, ChessPosition, Color};
/// let mut game = ChessMatch::new();
/// let e2 = ChessPosition::from_algebraic("e2").unwrap();
/// let e4 = ChessPosition::from_algebraic("e4").unwrap();
///
/// let captured = game.perform_chess_move(e2, e4).unwrap();
/// assert!(captured.is_none());
/// assert_eq!(game.turn(), 2);
/// assert_eq!(game.current_player(), Color::Black);
/// assert!(!game.check());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ChessMatch {
    board: Board,

    /// Starts at 1 and goes up by one after every completed move.
    turn: u32,

    current_player: Color,

    /// Whether `current_player` is in check.
    check: bool,

    checkmate: bool,

    /// The pawn that advanced two rows on the previous move.
    en_passant_vulnerable: Option<PieceId>,

    /// The pawn that reached the last row and waits to be replaced.
    promoted: Option<PieceId>,

    /// Captured pieces, in the order they were captured.
    captured: ArrayVec<PieceId, MAX_PIECES>,
}

impl ChessMatch {
    /// Creates a new match from the standard starting position, with White to move on turn 1.
    pub fn new() -> Self {
        let mut placements = Vec::with_capacity(32);
        for color in Color::iter() {
            for (column, kind) in BACK_RANK.into_iter().enumerate() {
                let column = column as i32;
                placements.push((
                    Position::new(color.back_row(), column),
                    Piece::new(color, kind),
                ));
                placements.push((
                    Position::new(color.pawn_row(), column),
                    Piece::new(color, PieceKind::Pawn),
                ));
            }
        }

        // Safe unwrap because the standard setup always has both kings on distinct cells
        Self::from_placements(Color::White, placements).unwrap()
    }

    /// Creates a match from an arbitrary set of pieces, with `to_move` to play on turn 1.
    ///
    /// Every piece starts with a move count of zero. `check` and `checkmate` are computed for
    /// `to_move`. Fails if two pieces share a cell or if either side has no King.
    ///
    /// # Example
    /// ```
    /// # use chessmatch::{ChessMatch, ChessPosition, Color, Piece};
    /// let at = |s: &str| ChessPosition::from_algebraic(s).unwrap();
    /// let game = ChessMatch::with_pieces(
    ///     Color::Black,
    ///     [
    ///         (at("h8"), Piece::BLACK_KING),
    ///         (at("a8"), Piece::WHITE_ROOK),
    ///         (at("g6"), Piece::WHITE_KING),
    ///     ],
    /// )
    /// .unwrap();
    /// assert!(game.check());
    /// assert!(game.checkmate());
    /// ```
    pub fn with_pieces(
        to_move: Color,
        placements: impl IntoIterator<Item = (ChessPosition, Piece)>,
    ) -> Result<Self> {
        Self::from_placements(
            to_move,
            placements
                .into_iter()
                .map(|(square, piece)| (square.to_position(), piece)),
        )
    }

    fn from_placements(
        to_move: Color,
        placements: impl IntoIterator<Item = (Position, Piece)>,
    ) -> Result<Self> {
        let mut board = Board::new();
        for (position, piece) in placements {
            board.add(piece, position)?;
        }

        for color in Color::iter() {
            if board.king(color).is_none() {
                bail!(ChessError::MissingKing(color));
            }
        }

        let mut game = Self {
            board,
            turn: 1,
            current_player: to_move,
            check: false,
            checkmate: false,
            en_passant_vulnerable: None,
            promoted: None,
            captured: ArrayVec::new(),
        };

        game.check = game.in_check(to_move)?;
        game.checkmate = game.check && game.is_checkmate(to_move)?;

        Ok(game)
    }

    /// The current turn number, starting at 1.
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The [`Color`] of the player whose move it is.
    pub const fn current_player(&self) -> Color {
        self.current_player
    }

    /// Returns `true` if the player to move is in check.
    pub const fn check(&self) -> bool {
        self.check
    }

    /// Returns `true` if the game is over. No further moves should be submitted.
    pub const fn checkmate(&self) -> bool {
        self.checkmate
    }

    /// The pawn that may be captured en passant on this move, if any.
    pub fn en_passant_vulnerable(&self) -> Option<&ChessPiece> {
        self.en_passant_vulnerable.map(|id| self.board.get(id))
    }

    /// The pawn awaiting promotion, if any. See [`ChessMatch::replace_promoted_piece`].
    pub fn promoted(&self) -> Option<&ChessPiece> {
        self.promoted.map(|id| self.board.get(id))
    }

    /// An iterator over every piece still on the board.
    pub fn pieces_on_board(&self) -> impl Iterator<Item = &ChessPiece> {
        self.board.pieces_on_board().map(|(_, piece)| piece)
    }

    /// An iterator over every captured piece, in the order they were captured.
    pub fn captured_pieces(&self) -> impl Iterator<Item = &ChessPiece> {
        self.captured.iter().map(|&id| self.board.get(id))
    }

    /// A read-only snapshot of the board, for rendering.
    pub fn pieces(&self) -> Grid<Piece> {
        self.board.snapshot()
    }

    /// Fetches the piece standing on `square`, if any.
    pub fn piece_at(&self, square: ChessPosition) -> Option<Piece> {
        self.board
            .occupant(square.to_position())
            .map(|piece| piece.piece())
    }

    /// The underlying [`Board`].
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Every cell the piece on `source` could move to, for hinting.
    ///
    /// Fails unless `source` holds a piece of the player to move that has at least one
    /// possible move, or while a promotion is pending. The result does not exclude moves that
    /// would leave the King in check.
    pub fn possible_moves(&self, source: ChessPosition) -> Result<MoveMask> {
        if self.promoted.is_some() {
            bail!(ChessError::PromotionPending);
        }

        let id = self.validate_source_position(source.to_position())?;
        Ok(self.moves_of(id))
    }

    /// Moves the piece on `source` to `target`, returning the captured piece, if any.
    ///
    /// On any error the match is left exactly as it was.
    ///
    /// If the move brings a pawn to the last row, the turn is not complete until
    /// [`ChessMatch::replace_promoted_piece`] is called; until then [`ChessMatch::promoted`]
    /// holds the pawn and further moves are refused.
    pub fn perform_chess_move(
        &mut self,
        source: ChessPosition,
        target: ChessPosition,
    ) -> Result<Option<Piece>> {
        if self.promoted.is_some() {
            bail!(ChessError::PromotionPending);
        }

        let from = source.to_position();
        let to = target.to_position();
        let mover = self.validate_source_position(from)?;
        self.validate_target_position(mover, to)?;

        let record = self.make_move(from, to)?;

        if self.in_check(self.current_player)? {
            trace!("{source}{target} would expose the {} king", self.current_player);
            self.undo_move(record)?;
            bail!(ChessError::SelfCheck);
        }

        let moved = *self.board.get(mover);
        let captured = record
            .captured
            .map(|(id, _)| self.board.get(id).piece());
        debug!("{:?} {source}{target} captures {captured:?}", moved.piece());

        let mut en_passant = None;
        if moved.kind() == PieceKind::Pawn {
            if to.row() == moved.color().promotion_row() {
                debug!("{:?} on {target} awaits promotion", moved.piece());
                self.promoted = Some(mover);
                return Ok(captured);
            }

            if (to.row() - from.row()).abs() == 2 {
                en_passant = Some(mover);
            }
        }

        self.end_turn(en_passant)?;

        Ok(captured)
    }

    /// Replaces the pawn awaiting promotion with a piece of kind `code` (`B`, `N`, `R` or `Q`,
    /// case-insensitive) and completes the turn.
    ///
    /// Any other code changes nothing and returns the still-pending pawn. Fails if no
    /// promotion is pending.
    pub fn replace_promoted_piece(&mut self, code: char) -> Result<Piece> {
        let Some(pawn) = self.promoted else {
            bail!(ChessError::NoPendingPromotion);
        };
        let pawn = *self.board.get(pawn);

        let Some(kind) = PieceKind::from_promotion_code(code) else {
            warn!("Ignoring invalid promotion code {code:?}");
            return Ok(pawn.piece());
        };

        let Some(position) = pawn.position() else {
            bail!(ChessError::NoPendingPromotion);
        };

        let promoted = pawn.piece().promoted(kind);
        self.board.remove(position)?;
        self.board.add(promoted, position)?;
        self.promoted = None;
        debug!("{:?} promoted to {promoted:?}", pawn.piece());

        self.end_turn(None)?;

        Ok(promoted)
    }

    /// Returns `true` if any piece of `by` could move onto `square`.
    pub fn is_attacked(&self, square: Position, by: Color) -> bool {
        let context = MoveContext {
            castling_allowed: false,
            en_passant: self.en_passant_vulnerable,
        };

        self.board
            .ids_for(by)
            .into_iter()
            .any(|id| possible_moves(&self.board, id, &context).get(square))
    }

    /// Returns `true` if `color`'s King is attacked.
    ///
    /// Fails if `color` has no King, which means the match is corrupt.
    pub fn in_check(&self, color: Color) -> Result<bool> {
        let Some(king) = self.board.king(color) else {
            bail!(ChessError::MissingKing(color));
        };

        Ok(self.is_attacked(king, color.opponent()))
    }

    /// Returns `true` if `color` is in check and no move of theirs gets them out of it.
    ///
    /// Every candidate move is tried on the board and taken back right after, so the match
    /// is unchanged when this returns.
    pub fn is_checkmate(&mut self, color: Color) -> Result<bool> {
        if !self.in_check(color)? {
            return Ok(false);
        }

        let context = MoveContext {
            castling_allowed: false,
            en_passant: self.en_passant_vulnerable,
        };

        for id in self.board.ids_for(color) {
            let Some(from) = self.board.get(id).position() else {
                continue;
            };

            for to in possible_moves(&self.board, id, &context).iter() {
                let record = self.make_move(from, to)?;
                let still_in_check = self.in_check(color);
                self.undo_move(record)?;

                if !still_in_check? {
                    trace!("{color} escapes check with {from:?} -> {to:?}");
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Move generation context as seen by the player to move.
    fn context(&self) -> MoveContext {
        MoveContext {
            castling_allowed: !self.check,
            en_passant: self.en_passant_vulnerable,
        }
    }

    fn moves_of(&self, id: PieceId) -> MoveMask {
        possible_moves(&self.board, id, &self.context())
    }

    fn validate_source_position(&self, position: Position) -> Result<PieceId> {
        let Some(id) = self.board.id_at(position)? else {
            bail!(ChessError::EmptySource);
        };

        if self.board.get(id).color() != self.current_player {
            bail!(ChessError::NotYourPiece);
        }

        if !has_possible_move(&self.board, id, &self.context()) {
            bail!(ChessError::NoPossibleMoves);
        }

        Ok(id)
    }

    fn validate_target_position(&self, mover: PieceId, target: Position) -> Result<()> {
        if !self.moves_of(mover).get(target) {
            bail!(ChessError::IllegalTarget);
        }

        Ok(())
    }

    /// Executes a move with all of its side effects, without any legality checks.
    fn make_move(&mut self, from: Position, to: Position) -> Result<MoveRecord> {
        let Some(mover) = self.board.remove(from)? else {
            bail!(ChessError::EmptySource);
        };
        self.board.increase_move_count(mover);
        let piece = self.board.get(mover).piece();

        let mut captured = self.board.remove(to)?.map(|id| (id, to));

        // A pawn moving diagonally onto an empty cell captures en passant
        if piece.is_pawn() && from.column() != to.column() && captured.is_none() {
            let beside = Position::new(from.row(), to.column());
            captured = self.board.remove(beside)?.map(|id| (id, beside));
        }

        self.board.place(mover, to)?;

        if let Some((id, _)) = captured {
            self.captured.push(id);
        }

        let mut castled_rook = None;
        if piece.is_king() && (to.column() - from.column()).abs() == 2 {
            let (rook_from, rook_to) = if to.column() > from.column() {
                (from.offset(0, 3), from.offset(0, 1))
            } else {
                (from.offset(0, -4), from.offset(0, -1))
            };

            if let Some(rook) = self.board.remove(rook_from)? {
                self.board.place(rook, rook_to)?;
                self.board.increase_move_count(rook);
                castled_rook = Some((rook, rook_from, rook_to));
            }
        }

        Ok(MoveRecord {
            mover,
            from,
            to,
            captured,
            castled_rook,
        })
    }

    /// Takes back a move executed by [`ChessMatch::make_move`].
    fn undo_move(&mut self, record: MoveRecord) -> Result<()> {
        self.board.remove(record.to)?;
        self.board.place(record.mover, record.from)?;
        self.board.decrease_move_count(record.mover);

        if let Some((id, square)) = record.captured {
            self.board.place(id, square)?;
            self.captured.pop();
        }

        if let Some((rook, rook_from, rook_to)) = record.castled_rook {
            self.board.remove(rook_to)?;
            self.board.place(rook, rook_from)?;
            self.board.decrease_move_count(rook);
        }

        Ok(())
    }

    /// Completes a move: records the en passant candidate, looks for check and checkmate on
    /// the opponent, and hands the turn over.
    fn end_turn(&mut self, en_passant: Option<PieceId>) -> Result<()> {
        let opponent = self.current_player.opponent();
        self.en_passant_vulnerable = en_passant;

        self.check = self.in_check(opponent)?;
        self.checkmate = self.check && self.is_checkmate(opponent)?;

        if self.checkmate {
            debug!("{opponent} is checkmated on turn {}", self.turn);
        } else if self.check {
            debug!("{opponent} is in check on turn {}", self.turn);
        }

        self.turn += 1;
        self.current_player = opponent;

        Ok(())
    }
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChessMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f, "Turn: {}", self.turn)?;
        write!(f, "Waiting player: {}", self.current_player)?;
        if self.checkmate {
            write!(f, "\nCHECKMATE!")?;
        } else if self.check {
            write!(f, "\nCHECK!")?;
        }
        Ok(())
    }
}
