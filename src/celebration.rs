use rand::seq::SliceRandom;
use rand::Rng;

use crate::scoring::MAX_SCORE;
use crate::world::Vec2;

const SPARK_SYMBOLS: [char; 5] = ['*', '+', '·', '✦', '♪'];

/// Downward pull on sparks, world units per second squared
const SPARK_GRAVITY: f64 = 400.0;

/// A single spark flying off the bell
#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Text sparks hold still and spell out a word
    pub is_text: bool,
}

impl Spark {
    fn new<R: Rng>(origin: Vec2, rng: &mut R) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(rng.gen_range(-250.0..250.0), rng.gen_range(-300.0..-50.0)),
            symbol: *SPARK_SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(0.8..1.6),
            is_text: false,
        }
    }

    fn text(pos: Vec2, symbol: char, color_index: usize) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            symbol,
            color_index,
            age: 0.0,
            max_age: 2.0,
            is_text: true,
        }
    }

    /// Advance by `dt` seconds; false once the spark has burnt out
    fn update(&mut self, dt: f64) -> bool {
        if !self.is_text {
            self.pos = self.pos + self.vel * dt;
            self.vel.y += SPARK_GRAVITY * dt;
        }

        self.age += dt;
        self.age < self.max_age
    }

    /// 1.0 when fresh, falling to 0.0 at the end of its life
    pub fn brightness(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Burst of sparks shown around the bell after an accepted hit
#[derive(Debug, Default)]
pub struct HitEffect {
    pub sparks: Vec<Spark>,
    pub is_active: bool,
}

impl HitEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, at: Vec2, score: u32) {
        self.start_with_rng(at, score, &mut rand::thread_rng());
    }

    pub fn start_with_rng<R: Rng>(&mut self, at: Vec2, score: u32, rng: &mut R) {
        self.sparks.clear();
        self.is_active = true;

        // more sparks the closer the hit was to zero
        let count = 8 + (score as usize * 24) / MAX_SCORE as usize;
        for _ in 0..count {
            self.sparks.push(Spark::new(at, rng));
        }

        if score == MAX_SCORE {
            self.spell("DING!", Vec2::new(at.x, at.y - 90.0), rng);
        }
    }

    fn spell<R: Rng>(&mut self, word: &str, center: Vec2, rng: &mut R) {
        let spacing = 20.0;
        let width = (word.chars().count() as f64 - 1.0) * spacing;
        let left = center.x - width / 2.0;
        let color = rng.gen_range(0..7);

        for (i, ch) in word.chars().enumerate() {
            let pos = Vec2::new(left + i as f64 * spacing, center.y);
            self.sparks.push(Spark::text(pos, ch, color));
        }
    }

    /// Advance all sparks by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        self.sparks.retain_mut(|spark| spark.update(dt));
        if self.sparks.is_empty() {
            self.is_active = false;
        }
    }

    pub fn stop(&mut self) {
        self.sparks.clear();
        self.is_active = false;
    }
}
