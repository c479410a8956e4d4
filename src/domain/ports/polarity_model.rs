/// Scores free text on a continuous polarity scale, roughly [-1, 1].
///
/// Implementations must be deterministic and must not fail on empty or
/// symbol-only input.
pub trait PolarityModel: Send + Sync {
    fn name(&self) -> &str;

    fn polarity(&self, text: &str) -> f64;
}
