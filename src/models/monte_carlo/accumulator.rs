/// Streaming mean/variance of payoff samples (Welford's update).
///
/// Keeps the running mean rather than a raw sum, so 10^8 samples of similar
/// magnitude neither overflow nor lose the low digits of the average, and no
/// sample is ever stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayoffAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl PayoffAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.count += 1;
        let delta = sample - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (sample - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean, or `None` before the first sample.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased sample variance; zero with fewer than two samples.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).max(0.0)
        }
    }

    /// Standard error of the mean, σ̂/√n.
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sample_variance() / self.count as f64).sqrt()
    }
}

impl Extend<f64> for PayoffAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}
