//! Seated players and the tokens they own.

use crate::token::Token;
use crate::types::{Color, DieFace, PlayerId, TOKENS_PER_PLAYER, TokenId};
use serde::{Deserialize, Serialize};

/// A seated player with exactly four tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: Color,
    tokens: [Token; TOKENS_PER_PLAYER],
}

impl Player {
    /// Seats a player with all tokens in base.
    pub fn new(id: PlayerId, name: impl Into<String>, color: Color) -> Self {
        let tokens = std::array::from_fn(|slot| {
            // TOKENS_PER_PLAYER fits in u8
            Token::new(TokenId::new(id, slot as u8), color)
        });
        Self {
            id,
            name: name.into(),
            color,
            tokens,
        }
    }

    /// Returns the seat.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the seat color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns all four tokens.
    pub fn tokens(&self) -> &[Token; TOKENS_PER_PLAYER] {
        &self.tokens
    }

    /// Returns the token with the given id, if this player owns it.
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        if id.player != self.id {
            return None;
        }
        self.tokens.get(usize::from(id.slot))
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        if id.player != self.id {
            return None;
        }
        self.tokens.get_mut(usize::from(id.slot))
    }

    /// Counts tokens still waiting in base.
    pub fn tokens_in_base(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_in_base()).count()
    }

    /// Counts tokens that have finished.
    pub fn tokens_finished(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_finished()).count()
    }

    /// Returns the ids of tokens with a legal move for `roll`, in slot order.
    pub fn legal_tokens(&self, roll: DieFace) -> Vec<TokenId> {
        self.tokens
            .iter()
            .filter(|t| t.can_move(roll))
            .map(Token::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_has_four_base_tokens() {
        let player = Player::new(PlayerId(1), "Asha", Color::Green);
        assert_eq!(player.tokens().len(), TOKENS_PER_PLAYER);
        assert_eq!(player.tokens_in_base(), 4);
        assert_eq!(player.tokens_finished(), 0);
        for (slot, token) in player.tokens().iter().enumerate() {
            assert_eq!(token.id(), TokenId::new(PlayerId(1), slot as u8));
            assert_eq!(token.color(), Color::Green);
        }
    }

    #[test]
    fn test_token_lookup_checks_owner() {
        let player = Player::new(PlayerId(1), "Asha", Color::Green);
        assert!(player.token(TokenId::new(PlayerId(1), 3)).is_some());
        assert!(player.token(TokenId::new(PlayerId(1), 4)).is_none());
        assert!(player.token(TokenId::new(PlayerId(0), 0)).is_none());
    }

    #[test]
    fn test_legal_tokens_from_base() {
        let player = Player::new(PlayerId(0), "Ravi", Color::Red);
        assert!(player.legal_tokens(DieFace::try_from(3).unwrap()).is_empty());
        assert_eq!(player.legal_tokens(DieFace::SIX).len(), 4);
    }
}
