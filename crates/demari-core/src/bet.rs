// Bet and draw result types exchanged with the betting backend.
//
// Fields serialize with the backend's camelCase names. Deserialization also
// accepts the older snake_case payload (`idUnico`, `user_name`, `user_cpf`,
// `surprise`, `sortedNumbers`) so the client works against either revision.

use serde::{Deserialize, Serialize};

/// Backend-assigned bet identifier.
pub type BetId = u64;

/// Smallest number a bet may contain.
pub const MIN_NUMBER: u8 = 1;

/// Largest number a bet may contain.
pub const MAX_NUMBER: u8 = 50;

/// How many numbers make up a manual bet.
pub const NUMBERS_PER_BET: usize = 5;

/// A bet as submitted to `POST /bets`, before the backend assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBet {
    #[serde(alias = "user_name")]
    pub bettor_name: String,
    #[serde(alias = "user_cpf")]
    pub tax_id: String,
    #[serde(default)]
    pub numbers: Vec<u8>,
    #[serde(alias = "surprise", default)]
    pub is_surprise: bool,
}

impl NewBet {
    /// Attach the id returned by the backend, producing the authoritative bet.
    pub fn with_id(self, id: BetId) -> Bet {
        Bet {
            id,
            bettor_name: self.bettor_name,
            tax_id: self.tax_id,
            numbers: self.numbers,
            is_surprise: self.is_surprise,
        }
    }
}

/// A bet acknowledged by the backend. Never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    #[serde(alias = "idUnico")]
    pub id: BetId,
    #[serde(alias = "user_name")]
    pub bettor_name: String,
    #[serde(alias = "user_cpf")]
    pub tax_id: String,
    #[serde(default)]
    pub numbers: Vec<u8>,
    #[serde(alias = "surprise", default)]
    pub is_surprise: bool,
}

/// How many submitted bets included a given number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFrequency {
    pub number: u8,
    pub count: u32,
}

/// Outcome of `POST /numbers-draw`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    #[serde(alias = "sortedNumbers", default)]
    pub drawn_numbers: Vec<u8>,
    #[serde(default)]
    pub winners: Vec<Bet>,
    #[serde(default)]
    pub number_frequency: Vec<NumberFrequency>,
}

impl DrawResult {
    /// Order the frequency table by descending count. Ties keep the order
    /// the backend sent them in.
    pub fn sort_frequency_desc(&mut self) {
        self.number_frequency.sort_by(|a, b| b.count.cmp(&a.count));
    }

    /// True when the draw carries no data at all (e.g. the request failed).
    pub fn is_empty(&self) -> bool {
        self.drawn_numbers.is_empty() && self.winners.is_empty() && self.number_frequency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bet_serializes_camel_case() {
        let bet = NewBet {
            bettor_name: "Ana".into(),
            tax_id: "123.456.789-01".into(),
            numbers: vec![1, 2, 3, 4, 5],
            is_surprise: false,
        };
        let json = serde_json::to_value(&bet).unwrap();
        assert_eq!(json["bettorName"], "Ana");
        assert_eq!(json["taxId"], "123.456.789-01");
        assert_eq!(json["numbers"], serde_json::json!([1, 2, 3, 4, 5]));
        assert_eq!(json["isSurprise"], false);
    }

    #[test]
    fn bet_accepts_legacy_field_names() {
        let json = r#"{
            "idUnico": 1007,
            "user_name": "Bruno",
            "user_cpf": "111.222.333-44",
            "numbers": [7, 14, 21, 28, 35],
            "surprise": true
        }"#;
        let bet: Bet = serde_json::from_str(json).unwrap();
        assert_eq!(bet.id, 1007);
        assert_eq!(bet.bettor_name, "Bruno");
        assert_eq!(bet.tax_id, "111.222.333-44");
        assert_eq!(bet.numbers, vec![7, 14, 21, 28, 35]);
        assert!(bet.is_surprise);
    }

    #[test]
    fn with_id_keeps_submitted_fields() {
        let bet = NewBet {
            bettor_name: "Carla".into(),
            tax_id: "000.000.000-00".into(),
            numbers: vec![10, 20, 30, 40, 50],
            is_surprise: false,
        }
        .with_id(42);
        assert_eq!(bet.id, 42);
        assert_eq!(bet.bettor_name, "Carla");
        assert_eq!(bet.numbers, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn draw_result_missing_frequency_defaults_to_empty() {
        let json = r#"{ "sortedNumbers": [3, 9, 12, 40, 41], "winners": [] }"#;
        let draw: DrawResult = serde_json::from_str(json).unwrap();
        assert_eq!(draw.drawn_numbers, vec![3, 9, 12, 40, 41]);
        assert!(draw.winners.is_empty());
        assert!(draw.number_frequency.is_empty());
        assert!(!draw.is_empty());
    }

    #[test]
    fn frequency_sorts_descending_and_stable() {
        let mut draw = DrawResult {
            number_frequency: vec![
                NumberFrequency { number: 4, count: 1 },
                NumberFrequency { number: 9, count: 5 },
                NumberFrequency { number: 2, count: 1 },
                NumberFrequency { number: 30, count: 3 },
            ],
            ..DrawResult::default()
        };
        draw.sort_frequency_desc();
        let order: Vec<u8> = draw.number_frequency.iter().map(|f| f.number).collect();
        assert_eq!(order, vec![9, 30, 4, 2]);
    }

    #[test]
    fn default_draw_is_empty() {
        assert!(DrawResult::default().is_empty());
    }
}
