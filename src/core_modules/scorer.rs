// THEORY:
// The scorer is the temporal debounce between raw motion and the wave
// decision. A single noisy frame must never fire the detector; only motion
// sustained across consecutive frames should. The rule is deliberately
// simple: every moving frame earns a point, every still frame costs one, and
// the balance never drops below zero. A brief occlusion or a missed frame
// therefore costs exactly one point of progress instead of restarting the
// gesture from scratch.

/// Advances the motion score by one observation.
///
/// The score saturates at zero on the way down, so a long still period can
/// never build up a deficit that a later gesture would have to pay off first.
pub fn next_score(score: u32, motion: bool) -> u32 {
    if motion {
        score.saturating_add(1)
    } else {
        score.saturating_sub(1)
    }
}
