use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::{GameError, SessionId, Variant};

/// Path parameters naming a variant and one of its sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePath {
    /// Variant name ("ttt" or "uttt")
    pub game_type: String,
    /// Session UUID
    pub game_id: String,
}

impl GamePath {
    /// Validate the raw path parameters
    ///
    /// # Errors
    ///
    /// `BadRequest` if the variant is unknown or the id is not a UUID
    pub fn parse(&self) -> Result<(Variant, SessionId), GameError> {
        let variant = parse_variant(&self.game_type)?;
        let game_id = self
            .game_id
            .parse()
            .map_err(|_| GameError::BadRequest("gameId is invalid".to_string()))?;
        Ok((variant, game_id))
    }
}

/// Validate a variant name from the URL
pub fn parse_variant(game_type: &str) -> Result<Variant, GameError> {
    game_type.parse()
}

/// Decode a move body for the variant it was posted to
///
/// # Errors
///
/// `BadRequest` with the decoder's message if the body does not fit the
/// variant's move shape
pub fn decode_move<M: DeserializeOwned>(body: serde_json::Value) -> Result<M, GameError> {
    serde_json::from_value(body).map_err(|e| GameError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridMove, MetaMove};
    use serde_json::json;

    fn path(game_type: &str, game_id: &str) -> GamePath {
        GamePath {
            game_type: game_type.to_string(),
            game_id: game_id.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_path() {
        let id = SessionId::new();
        let (variant, game_id) = path("uttt", &id.to_string()).parse().unwrap();

        assert_eq!(variant, Variant::Meta);
        assert_eq!(game_id, id);
    }

    #[test]
    fn test_parse_unknown_variant() {
        let result = path("chess", &SessionId::new().to_string()).parse();
        assert_eq!(
            result,
            Err(GameError::BadRequest("gameType is invalid".to_string()))
        );
    }

    #[test]
    fn test_parse_malformed_id() {
        let result = path("ttt", "12345").parse();
        assert_eq!(
            result,
            Err(GameError::BadRequest("gameId is invalid".to_string()))
        );
    }

    #[test]
    fn test_decode_grid_move() {
        let player_id = crate::core::PlayerId::new();
        let mv: GridMove = decode_move(json!({
            "playerId": player_id,
            "tile": 4,
            "symbol": "✕"
        }))
        .unwrap();

        assert_eq!(mv.player_id, player_id);
        assert_eq!(mv.tile, 4);
        assert_eq!(mv.symbol, "✕");
    }

    #[test]
    fn test_decode_negative_index() {
        let mv: MetaMove = decode_move(json!({
            "playerId": crate::core::PlayerId::new(),
            "board": -1,
            "tile": 0,
            "symbol": "◯"
        }))
        .unwrap();

        assert_eq!(mv.board, -1);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let result: Result<MetaMove, _> = decode_move(json!({
            "playerId": crate::core::PlayerId::new(),
            "tile": 0,
            "symbol": "◯"
        }));
        assert!(matches!(result, Err(GameError::BadRequest(_))));

        let result: Result<GridMove, _> = decode_move(json!({
            "playerId": "not-a-uuid",
            "tile": 0,
            "symbol": "✕"
        }));
        assert!(matches!(result, Err(GameError::BadRequest(_))));
    }
}
