//! Pure calculation functions for output dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions for a pixel budget.
///
/// # Arguments
/// * `original` - Source dimensions as (width, height)
/// * `budget` - Maximum output pixel count; `None` keeps the original size
///
/// # Returns
/// * `(width, height)` - Output dimensions, never exceeding the budget
///
/// The image is never upscaled: a source already within the budget is
/// returned unchanged. When scaling is needed, both dimensions are
/// truncated (not rounded) so the result is guaranteed to stay under the
/// budget, at the cost of slightly undershooting it.
///
/// # Examples
/// ```
/// # use rawpress::imaging::calculate_budget_dimensions;
/// // 24 MP source against a 4 MP budget, 3:2 aspect preserved
/// assert_eq!(
///     calculate_budget_dimensions((6000, 4000), Some(4_000_000)),
///     (2448, 1632)
/// );
///
/// // Already small enough: unchanged
/// assert_eq!(
///     calculate_budget_dimensions((1200, 800), Some(2_000_000)),
///     (1200, 800)
/// );
/// ```
pub fn calculate_budget_dimensions(original: (u32, u32), budget: Option<u64>) -> (u32, u32) {
    let Some(budget) = budget else {
        return original;
    };

    let (width, height) = original;
    if u64::from(width) * u64::from(height) <= budget {
        return original;
    }

    let aspect = f64::from(width) / f64::from(height);
    let new_height = (budget as f64 / aspect).sqrt() as u32;
    let new_width = (f64::from(new_height) * aspect) as u32;
    (new_width, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_budget_keeps_original() {
        assert_eq!(calculate_budget_dimensions((6000, 4000), None), (6000, 4000));
        assert_eq!(calculate_budget_dimensions((1, 1), None), (1, 1));
    }

    #[test]
    fn within_budget_keeps_original() {
        // 6 MP source, 8 MP budget
        assert_eq!(
            calculate_budget_dimensions((3000, 2000), Some(8_000_000)),
            (3000, 2000)
        );
    }

    #[test]
    fn exact_budget_keeps_original() {
        assert_eq!(
            calculate_budget_dimensions((2000, 1000), Some(2_000_000)),
            (2000, 1000)
        );
    }

    #[test]
    fn never_upscales() {
        assert_eq!(
            calculate_budget_dimensions((800, 600), Some(16_000_000)),
            (800, 600)
        );
    }

    #[test]
    fn landscape_24mp_to_4mp() {
        // aspect 1.5: h = floor(sqrt(4e6 / 1.5)) = 1632, w = floor(1632 * 1.5) = 2448
        let (w, h) = calculate_budget_dimensions((6000, 4000), Some(4_000_000));
        assert_eq!((w, h), (2448, 1632));
        assert!(u64::from(w) * u64::from(h) <= 4_000_000);
    }

    #[test]
    fn portrait_mirrors_landscape_aspect() {
        let (w, h) = calculate_budget_dimensions((4000, 6000), Some(4_000_000));
        assert!(u64::from(w) * u64::from(h) <= 4_000_000);
        // aspect 2:3 preserved within truncation error
        let aspect = f64::from(w) / f64::from(h);
        assert!((aspect - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn truncation_never_exceeds_budget() {
        // Sweep awkward aspect ratios and budgets; the floor-based math
        // must always land at or under the budget.
        let sources = [(6000, 4000), (4032, 3024), (7952, 5304), (9999, 1234), (501, 500)];
        let budgets = [2_000_000u64, 4_000_000, 6_000_000, 100_000, 1_000];
        for &(w, h) in &sources {
            for &budget in &budgets {
                let (nw, nh) = calculate_budget_dimensions((w, h), Some(budget));
                assert!(
                    u64::from(nw) * u64::from(nh) <= budget.max(u64::from(w) * u64::from(h)),
                    "{w}x{h} @ {budget} -> {nw}x{nh}"
                );
            }
        }
    }

    #[test]
    fn deterministic_on_recomputation() {
        let first = calculate_budget_dimensions((7952, 5304), Some(6_000_000));
        let second = calculate_budget_dimensions((7952, 5304), Some(6_000_000));
        assert_eq!(first, second);
    }
}
