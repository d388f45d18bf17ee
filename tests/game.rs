use lib::chess::{Color, Move, MoveError, Outcome, Position, Square};

fn played(pos: &mut Position, moves: &[&str]) {
    for s in moves {
        let m: Move = s.parse().expect(s);
        assert_eq!(pos.play(m), Ok(()), "{s}");
    }
}

#[test]
fn a_pawn_trade_detonates_both_pawns() {
    let mut pos = Position::default();

    played(&mut pos, &["d2d4", "e7e5", "d4e5"]);

    assert_eq!(
        pos.to_string(),
        "rnbqkbnr/pppp1ppp/8/8/8/8/PPP1PPPP/RNBQKBNR b"
    );

    assert_eq!(pos.outcome(), Outcome::InProgress);
}

#[test]
fn a_game_ends_when_an_explosion_takes_a_king() {
    let mut pos = Position::default();

    played(&mut pos, &["d2d4", "e7e5", "d4e5", "f8c5", "b1c3", "c5f2"]);

    assert_eq!(
        pos.to_string(),
        "rnbqk1nr/pppp1ppp/8/8/8/2N5/PPP1P1PP/R1BQ3R w"
    );

    // The blast on f2 took the king and its neighbors, but not the pawns.
    assert_eq!(pos.king(Color::White), None);
    assert_ne!(pos[Square::E2], None);
    assert_ne!(pos[Square::G2], None);
    assert_eq!(pos.outcome(), Outcome::Won(Color::Black));

    assert_eq!(
        pos.play("d1d2".parse().unwrap()),
        Err(MoveError::GameAlreadyOver)
    );
}

#[test]
fn rejected_moves_never_change_the_game() {
    let mut pos = Position::default();

    played(&mut pos, &["e2e4", "d7d5"]);
    let before = pos.clone();

    for s in ["e4e3", "e4d5x", "d1d5", "e1e3", "a7a5", "e4e4"] {
        if let Ok(m) = s.parse::<Move>() {
            let _ = pos.play(m);
        }

        assert_eq!(pos, before);
    }

    assert_eq!(pos.play("e4d5".parse().unwrap()), Ok(()));
    assert_ne!(pos, before);
}
