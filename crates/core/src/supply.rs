//! Piece supply - the current and following piece
//!
//! Each draw is an independent uniform pick over the whole catalog; there is
//! no bag and no repeat avoidance. A fixed seed gives a reproducible sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::GamePiece;
use crate::types::PIECE_COUNT;

/// Current/following piece slots plus the RNG that refills them
#[derive(Debug, Clone)]
pub struct PieceSupply {
    rng: StdRng,
    current: GamePiece,
    following: GamePiece,
}

impl PieceSupply {
    /// Create a supply; `None` seeds from the OS
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let current = Self::draw(&mut rng);
        let following = Self::draw(&mut rng);
        log::debug!("Piece supply ready. Current: {}, Following: {}", current, following);

        Self {
            rng,
            current,
            following,
        }
    }

    fn draw(rng: &mut StdRng) -> GamePiece {
        GamePiece::create(rng.random_range(0..PIECE_COUNT))
    }

    pub fn current(&self) -> &GamePiece {
        &self.current
    }

    pub fn following(&self) -> &GamePiece {
        &self.following
    }

    /// Promote the following piece and draw a new one.
    /// Returns the new (current, following) pair.
    pub fn advance(&mut self) -> (GamePiece, GamePiece) {
        self.current = self.following;
        self.following = Self::draw(&mut self.rng);
        log::debug!(
            "Next piece set. Current: {}, Following: {}",
            self.current,
            self.following
        );
        (self.current, self.following)
    }

    /// Exchange current and following
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.following);
    }

    /// Rotate the current piece a quarter turn clockwise
    pub fn rotate(&mut self) {
        self.current.rotate();
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: GamePiece) {
        self.current = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_supply_deterministic() {
        let mut a = PieceSupply::new(Some(12345));
        let mut b = PieceSupply::new(Some(12345));

        assert_eq!(a.current(), b.current());
        assert_eq!(a.following(), b.following());
        for _ in 0..100 {
            assert_eq!(a.advance(), b.advance());
        }
    }

    #[test]
    fn test_advance_promotes_following() {
        let mut supply = PieceSupply::new(Some(7));
        let following = *supply.following();

        let (current, _) = supply.advance();
        assert_eq!(current, following);
        assert_eq!(*supply.current(), following);
    }

    #[test]
    fn test_fresh_draws_are_unrotated() {
        let mut supply = PieceSupply::new(Some(3));
        supply.rotate();
        supply.advance();
        supply.advance();
        assert_eq!(supply.current().rotation(), crate::types::Rotation::North);
        assert_eq!(supply.following().rotation(), crate::types::Rotation::North);
    }

    #[test]
    fn test_draws_cover_whole_catalog() {
        let mut supply = PieceSupply::new(Some(42));
        let mut seen = [false; PIECE_COUNT];
        for _ in 0..2000 {
            let (current, _) = supply.advance();
            seen[current.kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "not every kind was drawn: {:?}", seen);
    }

    #[test]
    fn test_rotate_only_touches_current() {
        let mut supply = PieceSupply::new(Some(9));
        supply.set_current(GamePiece::new(PieceKind::L));
        let following = *supply.following();

        supply.rotate();
        assert_eq!(supply.current().rotation(), crate::types::Rotation::East);
        assert_eq!(*supply.following(), following);
    }
}
