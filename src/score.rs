/// Running score for one session.  Points come from `ObstacleStream::advance`,
/// whose per-pair flags already guarantee one point per cleared pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    pub fn current_score(&self) -> u32 {
        self.score
    }
}
