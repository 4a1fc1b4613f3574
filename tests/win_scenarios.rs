//! End-to-end win checks on raw hands.

use mahjong_hand::{MeldType, Tile, evaluate, is_won, parse_hand};

fn hand(input: &str) -> Vec<Tile> {
    parse_hand(input).unwrap()
}

fn tile(s: &str) -> Tile {
    s.parse().unwrap()
}

#[test]
fn triplets_across_categories_with_honor_pair() {
    assert!(is_won(&hand("p1 p1 p1 p3 p3 p3 m2 m2 m2 s2 s2 s2 we we")));
}

#[test]
fn run_and_triplets_with_honor_pair() {
    let evaluation = evaluate(&hand("p1 p2 p3 p4 p4 p4 m2 m2 m2 s2 s2 s2 we we"));
    let decomposition = evaluation.decomposition.unwrap();

    assert_eq!(decomposition.pair, tile("we"));
    assert_eq!(
        decomposition
            .melds
            .iter()
            .filter(|m| m.meld_type == MeldType::Run)
            .count(),
        1
    );
}

#[test]
fn single_tile_loses() {
    assert!(!is_won(&hand("p1")));
}

#[test]
fn mismatched_category_loses() {
    assert!(!is_won(&hand("m1 p1 p1 p3 p3 p3 m2 m2 m2 s2 s2 s2 we we")));
}

#[test]
fn four_melds_without_pair_loses() {
    assert!(!is_won(&hand("p1 p2 p3 p4 p4 p4 m2 m2 m2 s2 s2 s2 we")));
}

#[test]
fn declared_quad_is_set_aside() {
    let evaluation = evaluate(&hand("p1 p1 p1 p1 p3 p3 p3 m2 m2 m2 s2 s2 s2 we we"));

    assert!(evaluation.is_win());
    assert_eq!(evaluation.quads, vec![tile("p1")]);
}

#[test]
fn quad_does_not_lend_tiles_to_runs() {
    // p3 x4 is extracted whole, so p1 p2 cannot borrow a p3
    assert!(!is_won(&hand("p1 p2 p3 p3 p3 p3 m2 m2 m2 s2 s2 s2 we we")));
}

#[test]
fn two_quads_and_bonus_tiles() {
    let evaluation = evaluate(&hand(
        "f2 q4 m5 m5 m5 m5 dg dg dg dg s1 s2 s3 p7 p8 p9 wn wn",
    ));

    assert!(evaluation.is_win());
    assert_eq!(evaluation.quads, vec![tile("m5"), tile("dg")]);
    assert_eq!(evaluation.bonus, vec![tile("f2"), tile("q4")]);
}

#[test]
fn backtracking_recovers_from_tempting_split() {
    let evaluation = evaluate(&hand("p2 p2 p1 p2 p3 p4 p5 p6 p7 p8 p9 p7 p8 p9"));
    let decomposition = evaluation.decomposition.unwrap();

    assert_eq!(decomposition.pair, tile("p2"));
    assert!(decomposition.melds.iter().all(|m| m.meld_type == MeldType::Run));
}

#[test]
fn nine_gates_shape_wins() {
    assert!(is_won(&hand("m1 m1 m1 m2 m3 m4 m5 m6 m7 m8 m9 m9 m9 m5")));
}

#[test]
fn honor_single_loses() {
    assert!(!is_won(&hand("p1 p2 p3 p4 p5 p6 p7 p8 p9 m1 m1 m1 s5 dw")));
}

#[test]
fn bonus_tiles_do_not_count_towards_size() {
    // 13 structural tiles plus a flower is still one short
    assert!(!is_won(&hand("p1 p2 p3 p4 p4 p4 m2 m2 m2 s2 s2 s2 we f1")));
}

#[test]
fn extra_tile_loses() {
    assert!(!is_won(&hand("p1 p1 p1 p3 p3 p3 m2 m2 m2 s2 s2 s2 we we we")));
}

#[test]
fn input_order_does_not_matter() {
    let mut tiles = hand("s7 we p4 s9 p4 m2 we p4 s8 m3 m4 dr dr dr");
    assert!(is_won(&tiles));
    tiles.reverse();
    assert!(is_won(&tiles));
}
