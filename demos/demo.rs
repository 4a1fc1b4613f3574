use mahjong_hand::{MeldType, evaluate, parse_hand};

fn main() {
    println!("Mahjong Hand Checker\n");

    let hands = [
        // Runs and triplets with an honor pair
        "p1 p2 p3 p4 p4 p4 m2 m2 m2 s2 s2 s2 we we",
        // Declared quad plus a flower
        "f1 p1 p1 p1 p1 p3 p3 p3 m2 m2 m2 s2 s2 s2 dr dr",
        // Overlapping runs that need backtracking
        "p2 p2 p1 p2 p3 p4 p5 p6 p7 p8 p9 p7 p8 p9",
        // One tile short
        "p1 p2 p3 p4 p4 p4 m2 m2 m2 s2 s2 s2 we",
    ];

    for input in hands {
        let hand = match parse_hand(input) {
            Ok(hand) => hand,
            Err(e) => {
                eprintln!("ERROR: could not parse '{}': {}", input, e);
                continue;
            }
        };

        println!("Hand: {}", input);
        let evaluation = evaluate(&hand);

        if !evaluation.bonus.is_empty() {
            let bonus: Vec<String> = evaluation.bonus.iter().map(|t| t.to_string()).collect();
            println!("  Bonus: {}", bonus.join(" "));
        }
        if !evaluation.quads.is_empty() {
            let quads: Vec<String> = evaluation.quads.iter().map(|t| t.to_string()).collect();
            println!("  Quads: {}", quads.join(" "));
        }

        match evaluation.decomposition {
            Some(decomposition) => {
                println!("  Winning hand!");
                println!("  Pair: {0} {0}", decomposition.pair);
                for (i, meld) in decomposition.melds.iter().enumerate() {
                    let kind = match meld.meld_type {
                        MeldType::Triplet => "Triplet",
                        MeldType::Run => "Run",
                    };
                    let tiles: Vec<String> = meld.tiles.iter().map(|t| t.to_string()).collect();
                    println!("  Meld {}: {} [{}]", i + 1, kind, tiles.join(", "));
                }
            }
            None => println!("  Not a winning hand."),
        }
        println!();
    }
}
