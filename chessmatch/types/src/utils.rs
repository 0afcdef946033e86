use super::PieceKind;

/// Number of rows on a chess board.
pub const BOARD_ROWS: usize = 8;

/// Number of columns on a chess board.
pub const BOARD_COLUMNS: usize = 8;

/// Number of cells on a chess board.
pub const BOARD_CELLS: usize = BOARD_ROWS * BOARD_COLUMNS;

/// Highest number of pieces that can ever be on a chess board at once.
pub const MAX_PIECES: usize = BOARD_CELLS;

/// Piece kinds of a back rank in the standard starting position, from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; BOARD_COLUMNS] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Offsets a Knight can jump by, as `(rows, columns)`.
pub const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Orthogonal ray directions, as `(rows, columns)`.
pub const ORTHOGONALS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions, as `(rows, columns)`.
pub const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
