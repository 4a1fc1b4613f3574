use crate::{Decomposition, Meld, MeldType, Tile, evaluate};
use serde::{Deserialize, Serialize};

/// JSON-serializable representation of a meld
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum MeldJson {
    #[serde(rename = "triplet")]
    Triplet { tiles: Vec<String> },
    #[serde(rename = "run")]
    Run { tiles: Vec<String> },
}

/// JSON-serializable representation of a winning decomposition
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecompositionJson {
    pub pair: String,
    pub melds: Vec<MeldJson>,
}

/// Result of evaluating a hand
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EvaluationJson {
    /// False only when the input could not be parsed
    pub success: bool,
    pub is_win: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decomposition: Option<DecompositionJson>,
    pub bonus: Vec<String>,
    pub quads: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationJson {
    fn failure(error: String) -> Self {
        EvaluationJson {
            success: false,
            is_win: false,
            decomposition: None,
            bonus: Vec::new(),
            quads: Vec::new(),
            error: Some(error),
        }
    }
}

/// Evaluate a hand given as a JSON array of tile strings and always answer
/// with a JSON document, errors included
pub fn check_hand_json(hand_tiles: &str) -> String {
    let result = evaluate_json(hand_tiles).unwrap_or_else(EvaluationJson::failure);
    serde_json::to_string(&result).unwrap_or_else(|e| {
        serde_json::to_string(&EvaluationJson::failure(format!("Serialization error: {}", e)))
            .unwrap_or_else(|_| r#"{"success":false,"error":"Serialization error"}"#.to_string())
    })
}

/// Evaluate a hand given as a JSON array of tile strings (e.g. `["m1", "we"]`)
pub fn evaluate_json(hand_tiles: &str) -> Result<EvaluationJson, String> {
    let tile_strs: Vec<String> =
        serde_json::from_str(hand_tiles).map_err(|e| format!("Invalid hand JSON: {}", e))?;

    let hand = tile_strs
        .iter()
        .map(|s| s.parse::<Tile>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let evaluation = evaluate(&hand);

    Ok(EvaluationJson {
        success: true,
        is_win: evaluation.is_win(),
        decomposition: evaluation.decomposition.as_ref().map(decomposition_to_json),
        bonus: tiles_to_strings(&evaluation.bonus),
        quads: tiles_to_strings(&evaluation.quads),
        error: None,
    })
}

fn tiles_to_strings(tiles: &[Tile]) -> Vec<String> {
    tiles.iter().map(|t| t.to_string()).collect()
}

fn meld_to_json(meld: &Meld) -> MeldJson {
    let tiles = tiles_to_strings(&meld.tiles);

    match meld.meld_type {
        MeldType::Triplet => MeldJson::Triplet { tiles },
        MeldType::Run => MeldJson::Run { tiles },
    }
}

fn decomposition_to_json(decomposition: &Decomposition) -> DecompositionJson {
    DecompositionJson {
        pair: decomposition.pair.to_string(),
        melds: decomposition.melds.iter().map(meld_to_json).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_json_win() {
        let input = r#"["p1","p2","p3","p4","p4","p4","m2","m2","m2","s2","s2","s2","we","we","f2"]"#;
        let result = evaluate_json(input).unwrap();

        assert!(result.success);
        assert!(result.is_win);
        assert_eq!(result.bonus, vec!["f2".to_string()]);
        assert!(result.quads.is_empty());

        let decomposition = result.decomposition.unwrap();
        assert_eq!(decomposition.pair, "we");
        assert_eq!(decomposition.melds.len(), 4);
        assert!(decomposition.melds.contains(&MeldJson::Run {
            tiles: vec!["p1".into(), "p2".into(), "p3".into()],
        }));
    }

    #[test]
    fn test_evaluate_json_no_win() {
        let result = evaluate_json(r#"["p1"]"#).unwrap();
        assert!(result.success);
        assert!(!result.is_win);
        assert!(result.decomposition.is_none());
    }

    #[test]
    fn test_evaluate_json_bad_input() {
        assert!(evaluate_json("not json").unwrap_err().starts_with("Invalid hand JSON"));
        assert!(evaluate_json(r#"["p1","x9"]"#).is_err());
    }

    #[test]
    fn test_check_hand_json_shape() {
        let output = check_hand_json(r#"["p1","p1","p1","p1","p3","p3","p3","m2","m2","m2","s2","s2","s2","dr","dr"]"#);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["is_win"], true);
        assert_eq!(value["quads"][0], "p1");
        assert_eq!(value["decomposition"]["melds"][0]["type"], "triplet");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_with_quotes_stays_valid_json() {
        let output = check_hand_json(r#"["p\"1"]"#);
        let parsed: EvaluationJson = serde_json::from_str(&output).unwrap();

        assert!(!parsed.success);
        assert!(parsed.error.unwrap().contains(r#"p"1"#));
    }

    #[test]
    fn test_check_hand_json_reports_error() {
        let output = check_hand_json(r#"["m0"]"#);
        let parsed: EvaluationJson = serde_json::from_str(&output).unwrap();

        assert!(!parsed.success);
        assert!(parsed.error.unwrap().contains("out of range"));
    }
}
