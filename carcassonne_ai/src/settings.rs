use serde::{Deserialize, Serialize};

/// Tunable parameters of the [`RuleBasedAi`](crate::RuleBasedAi).
///
/// Missing keys take their default value when deserializing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Number of players in the game.
    pub player_count: usize,
    /// Moves valued below this are never played.
    pub value_threshold: f64,
    /// Field moves valued below this are never played.
    pub field_value_threshold: f64,
    /// When a player is down to their last meeple, field moves are skipped
    /// while the draw stack holds more tiles than this.
    pub meeple_conservation: ConservationThreshold,
}

/// See [`RuleSettings::meeple_conservation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConservationThreshold {
    /// As many tiles as there are players, i.e. roughly one more round.
    PlayerCount,
    /// A fixed number of tiles.
    Tiles(usize),
}

impl RuleSettings {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// The stack size above which the last meeple is kept off fields.
    pub fn conservation_limit(&self) -> usize {
        match self.meeple_conservation {
            ConservationThreshold::PlayerCount => self.player_count,
            ConservationThreshold::Tiles(tiles) => tiles,
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        RuleSettings {
            player_count: 2,
            value_threshold: 0.0,
            field_value_threshold: 6.0,
            meeple_conservation: ConservationThreshold::PlayerCount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let settings: RuleSettings = serde_json::from_str(r#"{"player_count": 4}"#).unwrap();
        assert_eq!(settings, RuleSettings::new(4));
        assert_eq!(settings.conservation_limit(), 4);
    }

    #[test]
    fn fixed_conservation_threshold() {
        let settings: RuleSettings = serde_json::from_str(
            r#"{"field_value_threshold": 4.5, "meeple_conservation": {"tiles": 12}}"#,
        )
        .unwrap();
        assert_eq!(settings.player_count, 2);
        assert_eq!(settings.field_value_threshold, 4.5);
        assert_eq!(settings.conservation_limit(), 12);
    }
}
