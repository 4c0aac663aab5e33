#[macro_use]
extern crate bencher;
extern crate chess_referee;

use bencher::Bencher;
use chess_referee::{Color, Game, MoveGen, Square};

// f3, e5, g4, Qh4
const FOOLS_MATE: [((i8, i8), (i8, i8)); 4] = [
    ((1, 5), (2, 5)),
    ((6, 4), (4, 4)),
    ((1, 6), (3, 6)),
    ((7, 3), (3, 7)),
];

fn play_all(moves: &[((i8, i8), (i8, i8))]) -> Game {
    let mut game = Game::new();
    for ((sr, sc), (er, ec)) in moves.iter() {
        game.play(Square::new(*sr, *sc), Square::new(*er, *ec))
            .expect("valid move");
    }
    game
}

fn game_make_move(bench: &mut Bencher) {
    let pos = Game::new();
    bench.iter(|| {
        let mut after = pos.clone();
        after
            .make_move(Color::White, Square::new(1, 4), Square::new(3, 4))
            .expect("valid move");
        assert_eq!(after.side_to_move(), Color::Black);
    });
}

fn game_refuse_move(bench: &mut Bencher) {
    let mut pos = Game::new();
    bench.iter(|| {
        assert!(pos
            .make_move(Color::White, Square::new(0, 0), Square::new(5, 0))
            .is_err());
    });
}

fn movegen_enumerate_moves(bench: &mut Bencher) {
    let pos = play_all(&FOOLS_MATE[..2]);
    bench.iter(|| assert_eq!(MoveGen::new_legal(&pos, Color::White).len(), 19));
}

fn game_is_checkmate(bench: &mut Bencher) {
    let pos = play_all(&FOOLS_MATE);
    bench.iter(|| assert!(pos.is_checkmate(Color::White)));
}

fn game_is_not_checkmate(bench: &mut Bencher) {
    let pos = play_all(&FOOLS_MATE[..3]);
    bench.iter(|| assert!(!pos.is_checkmate(Color::White)));
}

benchmark_group!(
    benches,
    game_make_move,
    game_refuse_move,
    movegen_enumerate_moves,
    game_is_checkmate,
    game_is_not_checkmate
);

benchmark_main!(benches);
