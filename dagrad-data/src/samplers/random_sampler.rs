use super::traits::Sampler;
use dagrad_core::utils::random::{rng_from_seed, seeded_rng};
use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// A sampler that randomly samples indices from a dataset.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: StdRng,
}

impl RandomSampler {
    /// * `replacement`: if `true`, an index can be drawn several times.
    /// * `num_samples`: indices per epoch, defaulting to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        Self::with_rng(replacement, num_samples, seeded_rng())
    }

    /// Reproducible sampler: the same seed gives the same sequence of epochs.
    pub fn with_seed(replacement: bool, num_samples: Option<usize>, seed: u64) -> Self {
        Self::with_rng(replacement, num_samples, rng_from_seed(seed))
    }

    pub fn with_rng(replacement: bool, num_samples: Option<usize>, rng: StdRng) -> Self {
        RandomSampler { replacement, num_samples, rng }
    }
}

impl Sampler for RandomSampler {
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        let count = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            let indices: Vec<usize> = (0..count).map(|_| self.rng.gen_range(0..dataset_len)).collect();
            return Box::new(indices.into_iter());
        }
        if count > dataset_len {
            warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement, yielding nothing",
                count, dataset_len
            );
            return Box::new(std::iter::empty());
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut self.rng);
        indices.truncate(count);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.num_samples.unwrap_or(dataset_len)
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
