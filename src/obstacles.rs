//! Scrolling stream of gapped obstacle pairs.
//!
//! Pairs enter at the spawn sentinel (the right edge of the play field), scroll
//! left at a fixed speed, and are recycled to the back once the lower
//! obstacle's right edge passes x = 0.  A later pair is held at the sentinel
//! until the pair ahead of it has crossed the middle of the field.

use std::collections::VecDeque;

use rand::Rng;

use crate::body::AxisAlignedBody;
use crate::config::GameConfig;
use crate::entities::{Rect, TextureTag};

/// Geometry shared by every pair in a stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamLayout {
    pub field_width: u32,
    pub field_height: u32,
    pub obstacle_width: u32,
    pub obstacle_height: u32,
    pub gap: u32,
    pub speed: i32,
}

impl StreamLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            field_width: config.field.width,
            field_height: config.field.height,
            obstacle_width: config.obstacles.width,
            obstacle_height: config.obstacles.height,
            gap: config.obstacles.gap,
            speed: config.obstacles.speed,
        }
    }

    pub fn spawn_sentinel(&self) -> i32 {
        self.field_width as i32
    }

    /// Inclusive range of valid lower-obstacle tops.
    pub fn lower_top_range(&self) -> (i32, i32) {
        let h = self.field_height as i32;
        (h - self.obstacle_height as i32, h - self.gap as i32)
    }
}

#[derive(Clone, Debug)]
pub struct ObstaclePair {
    pub lower: AxisAlignedBody,
    pub upper: AxisAlignedBody,
    /// Set once this pair has awarded its point.
    pub scored: bool,
}

impl ObstaclePair {
    /// Pair at `x` whose lower obstacle starts at `lower_top`; the upper
    /// obstacle's bottom sits exactly `gap` above it.
    pub fn new(layout: &StreamLayout, x: i32, lower_top: i32) -> Self {
        let upper_top = lower_top - layout.gap as i32 - layout.obstacle_height as i32;
        Self {
            lower: obstacle(layout, x, lower_top),
            upper: obstacle(layout, x, upper_top),
            scored: false,
        }
    }

    /// Freshly spawned pair at the sentinel, not yet given a random gap.
    pub fn fresh(layout: &StreamLayout) -> Self {
        let lower_top = layout.field_height as i32 - layout.obstacle_height as i32;
        Self {
            lower: obstacle(layout, layout.spawn_sentinel(), lower_top),
            upper: obstacle(layout, layout.spawn_sentinel(), 0),
            scored: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.lower.rect().left
    }

    fn scroll(&mut self, speed: i32) {
        let delta = (-(speed as f64), 0.0);
        self.lower.move_by(delta, &[]);
        self.upper.move_by(delta, &[]);
    }

    /// Awards the pair's point the first time its lower obstacle is fully
    /// left of `actor_left`.
    fn try_score(&mut self, actor_left: i32) -> bool {
        if !self.scored && self.lower.rect().right() < actor_left {
            self.scored = true;
            true
        } else {
            false
        }
    }
}

fn obstacle(layout: &StreamLayout, x: i32, top: i32) -> AxisAlignedBody {
    AxisAlignedBody::new(
        x as f64,
        top as f64,
        layout.obstacle_width,
        layout.obstacle_height,
    )
}

/// Result of one `advance` call.
#[derive(Clone, Debug, PartialEq)]
pub struct Advance {
    pub score_delta: u32,
    /// Every obstacle box, lower then upper for each pair, front to back.
    pub boxes: Vec<Rect>,
}

#[derive(Clone, Debug)]
pub struct ObstacleStream {
    layout: StreamLayout,
    pairs: VecDeque<ObstaclePair>,
}

impl ObstacleStream {
    pub fn new(layout: StreamLayout, pair_count: usize) -> Self {
        let pairs = (0..pair_count).map(|_| ObstaclePair::fresh(&layout)).collect();
        Self { layout, pairs }
    }

    /// Stream with explicitly placed pairs, front first.
    pub fn with_pairs(layout: StreamLayout, pairs: Vec<ObstaclePair>) -> Self {
        Self {
            layout,
            pairs: pairs.into(),
        }
    }

    pub fn layout(&self) -> &StreamLayout {
        &self.layout
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Give every pair sitting exactly at the spawn sentinel a new random gap.
    pub fn regenerate_if_at_spawn_sentinel(&mut self, rng: &mut impl Rng) {
        let sentinel = self.layout.spawn_sentinel();
        let (low, high) = self.layout.lower_top_range();
        for pair in self.pairs.iter_mut().filter(|p| p.x() == sentinel) {
            let lower_top = rng.gen_range(low..=high);
            *pair = ObstaclePair::new(&self.layout, sentinel, lower_top);
        }
    }

    /// Scroll, recycle and score one tick.
    pub fn advance(&mut self, actor_left: i32) -> Advance {
        let mut score_delta = 0;

        if let Some(front) = self.pairs.front_mut() {
            if front.try_score(actor_left) {
                score_delta += 1;
            }
        }

        let sentinel = self.layout.spawn_sentinel();
        let midpoint = self.layout.field_width as f64 / 2.0;
        for i in 0..self.pairs.len() {
            let release = i == 0
                || (self.pairs[i - 1].x() as f64) < midpoint
                || self.pairs[i].x() != sentinel;
            if release {
                self.pairs[i].scroll(self.layout.speed);
            }
        }

        let expired = self
            .pairs
            .front()
            .map_or(false, |front| front.lower.rect().right() < 0);
        if expired {
            self.pairs.pop_front();
            self.pairs.push_back(ObstaclePair::fresh(&self.layout));
            tracing::debug!("obstacle pair recycled");
        }

        for pair in self.pairs.iter_mut() {
            if pair.try_score(actor_left) {
                score_delta += 1;
            }
        }

        Advance {
            score_delta,
            boxes: self.boxes(),
        }
    }

    pub fn boxes(&self) -> Vec<Rect> {
        self.pairs
            .iter()
            .flat_map(|p| [p.lower.rect(), p.upper.rect()])
            .collect()
    }

    /// Boxes with the texture each is drawn with.
    pub fn textured_boxes(&self) -> Vec<(Rect, TextureTag)> {
        self.pairs
            .iter()
            .flat_map(|p| {
                [
                    (p.lower.rect(), TextureTag::Upright),
                    (p.upper.rect(), TextureTag::Flipped),
                ]
            })
            .collect()
    }
}
