//! RNG module - piece selection for spawning
//!
//! Pieces are either always the same kind (handy for debugging shapes) or
//! drawn uniformly from the seven kinds with a small seeded LCG, so a given
//! seed always replays the same sequence.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }
}

/// How the session picks the kind of each new piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Every piece has this kind
    Fixed(PieceKind),
    /// Uniformly random kinds from a seeded generator
    Random { seed: u32 },
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::Random { seed: 1 }
    }
}

/// Source of piece kinds for the session
#[derive(Debug, Clone)]
pub enum Spawner {
    Fixed(PieceKind),
    Random(SimpleRng),
}

impl Spawner {
    pub fn new(policy: SpawnPolicy) -> Self {
        match policy {
            SpawnPolicy::Fixed(kind) => Spawner::Fixed(kind),
            SpawnPolicy::Random { seed } => Spawner::Random(SimpleRng::new(seed)),
        }
    }

    /// Kind of the next piece
    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            Spawner::Fixed(kind) => *kind,
            Spawner::Random(rng) => PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_fixed_spawner_repeats_kind() {
        let mut spawner = Spawner::new(SpawnPolicy::Fixed(PieceKind::S));
        for _ in 0..10 {
            assert_eq!(spawner.next_kind(), PieceKind::S);
        }
    }

    #[test]
    fn test_random_spawner_covers_all_kinds() {
        let mut spawner = Spawner::new(SpawnPolicy::Random { seed: 42 });
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[spawner.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "kinds seen: {seen:?}");
    }

    #[test]
    fn test_random_spawner_replays_seed() {
        let mut a = Spawner::new(SpawnPolicy::Random { seed: 9 });
        let mut b = Spawner::new(SpawnPolicy::Random { seed: 9 });
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }
}
