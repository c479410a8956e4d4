//! Relative strength oscillator over closing prices.

/// Default look-back for the oscillator.
pub const DEFAULT_WINDOW: usize = 14;

/// Value reported when there is not enough history to say anything.
pub const NEUTRAL: f64 = 50.0;

/// RSI series aligned with `closes`.
///
/// Gains and losses are averaged with a trailing simple moving average over
/// `window` changes, so the first `window` entries are NaN. A window with no
/// losses reads 100. Inputs shorter than `window + 1` yield a flat series of
/// [`NEUTRAL`] so callers can always index the tail.
pub fn rsi(closes: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || closes.len() < window + 1 {
        return vec![NEUTRAL; closes.len()];
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut out = vec![f64::NAN; window];
    for end in window..=gains.len() {
        let avg_gain = gains[end - window..end].iter().sum::<f64>() / window as f64;
        let avg_loss = losses[end - window..end].iter().sum::<f64>() / window as f64;
        out.push(oscillator(avg_gain, avg_loss));
    }
    out
}

/// Most recent oscillator reading, or [`NEUTRAL`] for an empty series.
pub fn latest_rsi(closes: &[f64], window: usize) -> f64 {
    rsi(closes, window)
        .last()
        .copied()
        .filter(|v| !v.is_nan())
        .unwrap_or(NEUTRAL)
}

fn oscillator(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
