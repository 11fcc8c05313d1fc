//! Parametric (variance-covariance) VaR.

/// Z-scores for common confidence levels.
pub const Z_SCORE_90: f64 = 1.282;
/// Z-score at 95% confidence.
pub const Z_SCORE_95: f64 = 1.645;
/// Z-score at 99% confidence.
pub const Z_SCORE_99: f64 = 2.326;

/// Parametric VaR as a loss magnitude, assuming returns ~ Normal(mu, sigma).
///
/// ## Formula
///
/// ```text
/// VaR = -(mu - z * sigma), clamped at 0
/// ```
#[must_use]
pub fn parametric_var(mean: f64, std_dev: f64, confidence: f64) -> f64 {
    let z = z_score_for_confidence(confidence);
    (z * std_dev - mean).max(0.0)
}

/// Z-score for a given confidence level.
///
/// Linear interpolation between the tabulated 90/95/99 points. Confidence
/// below 0.90 clamps to the 90% z-score rather than extrapolating off the
/// bottom segment.
#[must_use]
pub fn z_score_for_confidence(confidence: f64) -> f64 {
    match confidence {
        c if c <= 0.90 => Z_SCORE_90,
        c if (c - 0.95).abs() < 0.001 => Z_SCORE_95,
        c if (c - 0.99).abs() < 0.001 => Z_SCORE_99,
        c if c < 0.95 => Z_SCORE_90 + (c - 0.90) / (0.95 - 0.90) * (Z_SCORE_95 - Z_SCORE_90),
        c => Z_SCORE_95 + (c - 0.95) / (0.99 - 0.95) * (Z_SCORE_99 - Z_SCORE_95),
    }
}
