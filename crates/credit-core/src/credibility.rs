use crate::error::{CoreError, CoreResult};

/// Weight of the initial score, expressed as a number of imaginary readers
/// who already agreed with it.
pub const N_BASE: u32 = 100;

/// Decimal digits kept when a score is stored
pub const SCORE_DECIMALS: i32 = 4;

/// Recalculate an article's credibility from its initial score and vote counts
///
/// `(initial * N_BASE + up - down) / (N_BASE + up + down)`, clamped to
/// `[0, 1]` and rounded to [`SCORE_DECIMALS`] digits. The result depends only
/// on these three inputs.
///
/// # Examples
///
/// ```
/// use credit_core::credibility::recalculate_score;
///
/// assert_eq!(recalculate_score(0.5, 0, 0), 0.5);
/// assert_eq!(recalculate_score(0.5, 10, 0), 0.5455);
/// assert_eq!(recalculate_score(0.5, 9, 1), 0.5273);
/// assert_eq!(recalculate_score(0.1, 0, 50), 0.0);  // Clamped to 0
/// ```
pub fn recalculate_score(initial_score: f64, upvotes: u64, downvotes: u64) -> f64 {
    let base = f64::from(N_BASE);
    let total = (upvotes + downvotes) as f64;

    let raw = (initial_score * base + upvotes as f64 - downvotes as f64) / (base + total);

    round_score(raw.clamp(0.0, 1.0))
}

/// Round a score to [`SCORE_DECIMALS`] digits, halves away from zero
///
/// # Examples
///
/// ```
/// use credit_core::credibility::round_score;
///
/// assert_eq!(round_score(60.0 / 110.0), 0.5455);
/// assert_eq!(round_score(0.12344), 0.1234);
/// assert_eq!(round_score(1.0), 1.0);
/// ```
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

/// Check that a score is a finite number in `[0, 1]`
pub fn validate_score(score: f64) -> CoreResult<f64> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(CoreError::InvalidInput(format!(
            "credibility score must be between 0 and 1, got {}",
            score
        )))
    }
}
