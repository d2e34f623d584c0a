use rand::Rng;

/// Uniform source of randomness in `[0, 1)`.
///
/// Every stochastic decision in the engine (branch counts, heading
/// wiggle, split draws, leaf offsets, sprite variants) is derived from
/// this single primitive, threaded explicitly through the call sites.
/// There is no global generator.
///
/// Any [`rand::Rng`] satisfies the trait through the blanket impl below;
/// tests can substitute scripted sources for exact determinism.
pub trait UnitRng {
    /// Returns the next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

impl<R: Rng> UnitRng for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::UnitRng;

    /// Source that returns the same value for every draw.
    pub struct Fixed(pub f32);

    impl UnitRng for Fixed {
        fn next_unit(&mut self) -> f32 {
            self.0
        }
    }

    /// Source that plays back a scripted sequence, then repeats the
    /// last value forever.
    pub struct Script {
        values: Vec<f32>,
        next: usize,
    }

    impl Script {
        pub fn new(values: impl Into<Vec<f32>>) -> Self {
            let values = values.into();
            assert!(!values.is_empty(), "script needs at least one value");
            Self { values, next: 0 }
        }
    }

    impl UnitRng for Script {
        fn next_unit(&mut self) -> f32 {
            let v = self.values[self.next];
            if self.next + 1 < self.values.len() {
                self.next += 1;
            }
            v
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn fixed_returns_constant() {
            let mut rng = Fixed(0.25);
            assert_eq!(rng.next_unit(), 0.25);
            assert_eq!(rng.next_unit(), 0.25);
        }

        #[test]
        fn script_plays_sequence_then_repeats_last() {
            let mut rng = Script::new([0.1, 0.2, 0.3]);
            assert_eq!(rng.next_unit(), 0.1);
            assert_eq!(rng.next_unit(), 0.2);
            assert_eq!(rng.next_unit(), 0.3);
            assert_eq!(rng.next_unit(), 0.3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UnitRng;

    #[test]
    fn rand_generators_satisfy_unit_rng() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u), "sample out of range: {u}");
        }
    }
}
