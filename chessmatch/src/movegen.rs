use super::{
    Board, ChessPiece, Color, MoveMask, PieceId, PieceKind, Position, DIAGONALS, KNIGHT_JUMPS,
    ORTHOGONALS,
};

/// Match state that move generation depends on, besides the board itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MoveContext {
    /// Whether a King that has never moved may be offered castling targets.
    ///
    /// Castling is never allowed out of check.
    pub castling_allowed: bool,

    /// The pawn that just advanced two rows, if any, and may therefore be captured en passant.
    pub en_passant: Option<PieceId>,
}

/// Computes every cell the piece known by `id` could move to next.
///
/// These are pseudo-legal moves: whether a move would leave the mover's own King in check is
/// not considered here. A piece that is not on the board has no moves.
pub fn possible_moves(board: &Board, id: PieceId, context: &MoveContext) -> MoveMask {
    let piece = board.get(id);
    let Some(from) = piece.position() else {
        return MoveMask::new(board.rows(), board.columns());
    };
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, color, context.en_passant),
        PieceKind::Knight => knight_moves(board, from, color),
        PieceKind::Bishop => sliding_moves(board, from, color, &DIAGONALS),
        PieceKind::Rook => sliding_moves(board, from, color, &ORTHOGONALS),
        PieceKind::Queen => {
            sliding_moves(board, from, color, &ORTHOGONALS)
                | &sliding_moves(board, from, color, &DIAGONALS)
        }
        PieceKind::King => king_moves(board, piece, from, context.castling_allowed),
    }
}

/// Returns `true` if the piece known by `id` has at least one possible move.
pub fn has_possible_move(board: &Board, id: PieceId, context: &MoveContext) -> bool {
    possible_moves(board, id, context).is_nonempty()
}

/// Casts a ray from `from` along every direction until it leaves the board or hits a piece.
///
/// A friendly piece stops the ray on the previous cell; an enemy piece stops it on its own
/// cell, which is marked as a capture.
pub fn sliding_moves(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i32, i32)],
) -> MoveMask {
    let mut moves = MoveMask::new(board.rows(), board.columns());

    for &(rows, columns) in directions {
        let mut to = from.offset(rows, columns);
        while board.is_vacant(to) {
            moves.set(to);
            to = to.offset(rows, columns);
        }

        if board.is_opponent_at(to, color) {
            moves.set(to);
        }
    }

    moves
}

/// The eight Knight jumps, onto empty or enemy-occupied cells.
pub fn knight_moves(board: &Board, from: Position, color: Color) -> MoveMask {
    let mut moves = MoveMask::new(board.rows(), board.columns());

    for (rows, columns) in KNIGHT_JUMPS {
        let to = from.offset(rows, columns);
        if board.can_land(to, color) {
            moves.set(to);
        }
    }

    moves
}

/// The eight adjacent cells, plus castling.
///
/// Castling is offered when the King has never moved, `castling_allowed` is set, a never-moved
/// Rook of the same color stands three columns to the right (kingside) or four to the left
/// (queenside), and every cell in between is empty. The King's target is two columns towards
/// that Rook.
pub fn king_moves(
    board: &Board,
    king: &ChessPiece,
    from: Position,
    castling_allowed: bool,
) -> MoveMask {
    let mut moves = MoveMask::new(board.rows(), board.columns());
    let color = king.color();

    for (rows, columns) in ORTHOGONALS.into_iter().chain(DIAGONALS) {
        let to = from.offset(rows, columns);
        if board.can_land(to, color) {
            moves.set(to);
        }
    }

    if king.move_count() == 0 && castling_allowed {
        // Kingside
        if is_castling_rook(board, from.offset(0, 3), color)
            && (1..=2).all(|i| board.is_vacant(from.offset(0, i)))
        {
            moves.set(from.offset(0, 2));
        }

        // Queenside
        if is_castling_rook(board, from.offset(0, -4), color)
            && (1..=3).all(|i| board.is_vacant(from.offset(0, -i)))
        {
            moves.set(from.offset(0, -2));
        }
    }

    moves
}

fn is_castling_rook(board: &Board, position: Position, color: Color) -> bool {
    board.occupant(position).is_some_and(|piece| {
        piece.kind() == PieceKind::Rook && piece.color() == color && piece.move_count() == 0
    })
}

/// Pawn pushes and captures, including en passant.
///
/// * One step forward onto an empty cell.
/// * Two steps forward from the starting row, if both cells are empty.
/// * One step diagonally forward onto an enemy piece.
/// * One step diagonally forward onto the empty cell behind `en_passant`, if that pawn is an
///   enemy standing right beside this one on the en passant row.
pub fn pawn_moves(
    board: &Board,
    from: Position,
    color: Color,
    en_passant: Option<PieceId>,
) -> MoveMask {
    let mut moves = MoveMask::new(board.rows(), board.columns());
    let forward = color.forward();

    let one = from.offset(forward, 0);
    if board.is_vacant(one) {
        moves.set(one);

        let two = from.offset(2 * forward, 0);
        if from.row() == color.pawn_row() && board.is_vacant(two) {
            moves.set(two);
        }
    }

    for side in [-1, 1] {
        let diagonal = from.offset(forward, side);
        if board.is_opponent_at(diagonal, color) {
            moves.set(diagonal);
        }
    }

    if from.row() == color.en_passant_row() {
        if let Some(victim) = en_passant.map(|id| board.get(id)) {
            let is_enemy_pawn = victim.kind() == PieceKind::Pawn && victim.color() != color;

            for side in [-1, 1] {
                if is_enemy_pawn && victim.position() == Some(from.offset(0, side)) {
                    moves.set(from.offset(forward, side));
                }
            }
        }
    }

    moves
}
