use chessmatch::{ChessError, ChessMatch, ChessPosition, Color, MoveMask, Piece};

fn at(square: &str) -> ChessPosition {
    ChessPosition::from_algebraic(square).unwrap()
}

/// Sets up a match from `(square, piece)` pairs, with `to_move` to play.
fn setup_game(to_move: Color, placements: &[(&str, Piece)]) -> ChessMatch {
    ChessMatch::with_pieces(
        to_move,
        placements.iter().map(|&(square, piece)| (at(square), piece)),
    )
    .unwrap()
}

/// Checks that `mask` marks exactly the squares in `expected`, ignoring order.
fn lists_match(game: &ChessMatch, mask: &MoveMask, expected: &[&str]) {
    let mut moves = mask
        .iter()
        .map(|position| ChessPosition::from_position(position).unwrap().to_string())
        .collect::<Vec<_>>();
    let mut expected = expected.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    moves.sort();
    expected.sort();

    assert_eq!(moves, expected, "\nPosition:\n{game}");
}

fn moves_from(game: &ChessMatch, square: &str) -> MoveMask {
    game.possible_moves(at(square)).unwrap()
}

fn source_error(game: &ChessMatch, square: &str) -> ChessError {
    game.possible_moves(at(square))
        .unwrap_err()
        .downcast::<ChessError>()
        .unwrap()
}

#[test]
fn opening_moves() {
    let game = ChessMatch::new();

    lists_match(&game, &moves_from(&game, "e2"), &["e3", "e4"]);
    lists_match(&game, &moves_from(&game, "b1"), &["a3", "c3"]);
    lists_match(&game, &moves_from(&game, "g1"), &["f3", "h3"]);

    let total: usize = game
        .pieces_on_board()
        .filter(|piece| piece.color() == Color::White)
        .filter_map(|piece| game.possible_moves(piece.chess_position().unwrap()).ok())
        .map(|mask| mask.population())
        .sum();
    assert_eq!(total, 20);
}

#[test]
fn hint_requires_a_movable_piece_of_the_player_to_move() {
    let game = ChessMatch::new();

    assert_eq!(source_error(&game, "e4"), ChessError::EmptySource);
    assert_eq!(source_error(&game, "e7"), ChessError::NotYourPiece);
    assert_eq!(source_error(&game, "a1"), ChessError::NoPossibleMoves);
    assert_eq!(source_error(&game, "d1"), ChessError::NoPossibleMoves);
}

#[test]
fn rook_stops_before_friends_and_on_enemies() {
    let game = setup_game(
        Color::White,
        &[
            ("d4", Piece::WHITE_ROOK),
            ("d6", Piece::WHITE_PAWN),
            ("f4", Piece::BLACK_PAWN),
            ("h1", Piece::WHITE_KING),
            ("h8", Piece::BLACK_KING),
        ],
    );

    lists_match(
        &game,
        &moves_from(&game, "d4"),
        &["d5", "d3", "d2", "d1", "c4", "b4", "a4", "e4", "f4"],
    );
}

#[test]
fn bishop_rays() {
    let game = setup_game(
        Color::White,
        &[
            ("c1", Piece::WHITE_BISHOP),
            ("b2", Piece::WHITE_PAWN),
            ("e3", Piece::BLACK_PAWN),
            ("h1", Piece::WHITE_KING),
            ("h8", Piece::BLACK_KING),
        ],
    );

    lists_match(&game, &moves_from(&game, "c1"), &["d2", "e3"]);
}

#[test]
fn queen_on_open_board() {
    let game = setup_game(
        Color::White,
        &[
            ("d4", Piece::WHITE_QUEEN),
            ("a2", Piece::WHITE_KING),
            ("h7", Piece::BLACK_KING),
        ],
    );

    assert_eq!(moves_from(&game, "d4").population(), 27);
}

#[test]
fn knight_in_the_corner() {
    let game = setup_game(
        Color::White,
        &[
            ("a1", Piece::WHITE_KNIGHT),
            ("c2", Piece::WHITE_PAWN),
            ("e1", Piece::WHITE_KING),
            ("e8", Piece::BLACK_KING),
        ],
    );

    lists_match(&game, &moves_from(&game, "a1"), &["b3"]);
}

#[test]
fn knight_captures_enemies() {
    let game = setup_game(
        Color::Black,
        &[
            ("d5", Piece::BLACK_KNIGHT),
            ("c3", Piece::WHITE_PAWN),
            ("e3", Piece::BLACK_PAWN),
            ("h1", Piece::WHITE_KING),
            ("h8", Piece::BLACK_KING),
        ],
    );

    lists_match(
        &game,
        &moves_from(&game, "d5"),
        &["b6", "b4", "c7", "e7", "f6", "f4", "c3"],
    );
}

#[test]
fn king_offers_castling_on_both_sides() {
    let game = setup_game(
        Color::White,
        &[
            ("e1", Piece::WHITE_KING),
            ("a1", Piece::WHITE_ROOK),
            ("h1", Piece::WHITE_ROOK),
            ("e8", Piece::BLACK_KING),
        ],
    );

    lists_match(
        &game,
        &moves_from(&game, "e1"),
        &["d1", "f1", "d2", "e2", "f2", "g1", "c1"],
    );
}

#[test]
fn castling_needs_empty_cells_between_king_and_rook() {
    let game = setup_game(
        Color::White,
        &[
            ("e1", Piece::WHITE_KING),
            ("a1", Piece::WHITE_ROOK),
            ("b1", Piece::WHITE_KNIGHT),
            ("h1", Piece::WHITE_ROOK),
            ("e8", Piece::BLACK_KING),
        ],
    );

    lists_match(
        &game,
        &moves_from(&game, "e1"),
        &["d1", "f1", "d2", "e2", "f2", "g1"],
    );
}

#[test]
fn pawn_pushes_and_captures() {
    let game = setup_game(
        Color::White,
        &[
            ("e2", Piece::WHITE_PAWN),
            ("d3", Piece::BLACK_KNIGHT),
            ("f3", Piece::WHITE_KNIGHT),
            ("b2", Piece::WHITE_PAWN),
            ("b4", Piece::BLACK_PAWN),
            ("g3", Piece::WHITE_PAWN),
            ("h1", Piece::WHITE_KING),
            ("h8", Piece::BLACK_KING),
        ],
    );

    lists_match(&game, &moves_from(&game, "e2"), &["e3", "e4", "d3"]);
    // Double step is only blocked on its landing cell
    lists_match(&game, &moves_from(&game, "b2"), &["b3"]);
    // Off the starting row there is only a single step
    lists_match(&game, &moves_from(&game, "g3"), &["g4"]);
}

#[test]
fn black_pawns_walk_down_the_board() {
    let game = ChessMatch::with_pieces(
        Color::Black,
        [
            (at("d7"), Piece::BLACK_PAWN),
            (at("c6"), Piece::WHITE_BISHOP),
            (at("a1"), Piece::WHITE_KING),
            (at("h8"), Piece::BLACK_KING),
        ],
    )
    .unwrap();

    lists_match(&game, &moves_from(&game, "d7"), &["d6", "d5", "c6"]);
}

#[test]
fn pawn_blocked_by_any_piece_in_front() {
    let game = setup_game(
        Color::White,
        &[
            ("e2", Piece::WHITE_PAWN),
            ("e3", Piece::BLACK_PAWN),
            ("h1", Piece::WHITE_KING),
            ("h8", Piece::BLACK_KING),
        ],
    );

    assert_eq!(source_error(&game, "e2"), ChessError::NoPossibleMoves);
}

#[test]
fn en_passant_target_is_offered_right_after_a_double_step() {
    let mut game = ChessMatch::new();
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        game.perform_chess_move(at(from), at(to)).unwrap();
    }

    lists_match(&game, &moves_from(&game, "e5"), &["e6", "d6"]);
}
