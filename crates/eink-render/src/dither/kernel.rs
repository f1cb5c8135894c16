//! Diffusion weights.

/// Weights for spreading one pixel's residual error.
///
/// Each entry is a `(dx, dy, weight)` offset to a not-yet-visited
/// neighbor. A neighbor receives `error * weight / divisor`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `dx` is flipped on reversed serpentine rows; `dy` is always `>= 0`.
    pub entries: &'static [(i32, i32, u8)],

    pub divisor: u8,

    /// Largest `dy` in `entries`; the error buffer keeps `max_dy + 1` rows.
    pub max_dy: usize,
}

/// Floyd-Steinberg: four neighbors, weights summing to the divisor.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (-1, 1, 3),
        (0, 1, 5),
        (1, 1, 1),
    ],
    divisor: 16,
    max_dy: 1,
};
