//! 乱数アダプタ（rand を委譲）

use crate::ports::outbound::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// thread_rng を使う RandomSource 実装
#[derive(Debug, Clone, Default)]
pub struct StdRandom;

impl RandomSource for StdRandom {
    fn pick_index(&self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }

    fn int_in_range(&self, lo: i64, hi: i64) -> i64 {
        rand::thread_rng().gen_range(lo..=hi)
    }
}

/// シード固定の RandomSource 実装（テスト用）
///
/// 同じシードなら同じ系列を返すため、抽選結果をテストで固定できる。
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, n: usize) -> usize {
        self.rng
            .lock()
            .expect("rng lock poisoned")
            .gen_range(0..n)
    }

    fn int_in_range(&self, lo: i64, hi: i64) -> i64 {
        self.rng
            .lock()
            .expect("rng lock poisoned")
            .gen_range(lo..=hi)
    }
}
