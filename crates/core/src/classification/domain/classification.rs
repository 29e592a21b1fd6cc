/// The network's best guess for one input: arg-max index and its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub index: usize,
    pub confidence: f32,
}

impl Classification {
    /// Reduces an output vector to its arg-max.
    ///
    /// Ties keep the lowest index. NaN scores never win. Returns `None`
    /// when no score is comparable (empty or all-NaN output).
    pub fn from_scores(scores: &[f32]) -> Option<Self> {
        let mut best: Option<Self> = None;
        for (index, &confidence) in scores.iter().enumerate() {
            if confidence.is_nan() {
                continue;
            }
            if best.map_or(true, |b| confidence > b.confidence) {
                best = Some(Self { index, confidence });
            }
        }
        best
    }
}
