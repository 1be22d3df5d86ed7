//! Pure statistics over the raw session counters. Nothing here is stored;
//! the engine and the UI call these on demand.

/// Standard "characters per word" convention for WPM.
const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute from correct characters and elapsed whole seconds.
///
/// Returns 0 before the first second has elapsed.
pub fn wpm(correct_chars: usize, elapsed_secs: u64) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let minutes = elapsed_secs as f64 / 60.0;
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Accuracy as a rounded percentage of correct characters over accepted
/// edit events (not characters typed; corrections make the two diverge).
///
/// Returns 100 when nothing has been typed yet.
pub fn accuracy(correct_chars: usize, total_keystrokes: u32) -> u32 {
    if total_keystrokes == 0 {
        return 100;
    }
    ((correct_chars as f64 / total_keystrokes as f64) * 100.0).round() as u32
}

/// Population standard deviation of live-WPM samples, shown on the
/// results screen as a consistency figure. Empty input yields 0.
pub fn consistency(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let variance = samples
        .iter()
        .map(|sample| {
            let diff = sample - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;
    variance.sqrt()
}
