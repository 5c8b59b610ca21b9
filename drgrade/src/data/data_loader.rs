use std::ops::Range;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tracing::debug;

use super::{Batch, DataError, Dataset, Sample};
use crate::config::{LoaderConfig, ShuffleSeed};

/// Yields fixed-size batches from a dataset in a stable order per pass.
///
/// With `num_workers > 1` the samples of each batch are decoded on a
/// dedicated thread pool; batches are still produced one at a time, in order.
pub struct DataLoader<D: Dataset> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    pin_memory: bool,
    seed: ShuffleSeed,
    pool: Option<ThreadPool>,
}

impl<D: Dataset> DataLoader<D> {
    pub fn new(
        dataset: D,
        config: &LoaderConfig,
        shuffle: bool,
    ) -> Result<Self, DataError> {
        config.validate()?;

        let pool = if config.num_workers > 1 {
            Some(ThreadPoolBuilder::new().num_threads(config.num_workers).build()?)
        } else {
            None
        };

        Ok(Self {
            dataset,
            batch_size: config.batch_size,
            shuffle,
            pin_memory: config.pin_memory,
            seed: config.seed,
            pool,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_samples(&self) -> usize {
        self.dataset.len()
    }

    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// Advisory flag for device backends that stage host memory.
    pub fn pin_memory(&self) -> bool {
        self.pin_memory
    }

    /// Starts a pass over the dataset.
    ///
    /// Each call starts from [`ShuffleSeed::pass_rng`], so a default seed
    /// reshuffles every pass while a custom seed replays the same order.
    pub fn iter(&self) -> BatchIter<'_, D> {
        let mut rng = self.seed.pass_rng();
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            order.shuffle(&mut rng);
        }
        let sample_seeds = (0..order.len()).map(|_| rng.random::<u64>()).collect();

        debug!(
            samples = order.len(),
            batch_size = self.batch_size,
            shuffle = self.shuffle,
            pin_memory = self.pin_memory,
            "starting loader pass"
        );

        BatchIter {
            loader: self,
            order,
            sample_seeds,
            position: 0,
        }
    }

    fn load_range(
        &self,
        order: &[usize],
        seeds: &[u64],
        range: Range<usize>,
    ) -> Result<Vec<Sample>, DataError> {
        let load = |(&index, &seed): (&usize, &u64)| {
            let mut rng = StdRng::seed_from_u64(seed);
            self.dataset.get(index, &mut rng)
        };

        let indices = &order[range.clone()];
        let seeds = &seeds[range];
        match &self.pool {
            Some(pool) => pool.install(|| indices.par_iter().zip(seeds.par_iter()).map(load).collect()),
            None => indices.iter().zip(seeds.iter()).map(load).collect(),
        }
    }
}

pub struct BatchIter<'a, D: Dataset> {
    loader: &'a DataLoader<D>,
    order: Vec<usize>,
    sample_seeds: Vec<u64>,
    position: usize,
}

impl<D: Dataset> Iterator for BatchIter<'_, D> {
    type Item = Result<Batch, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.order.len() {
            return None;
        }

        let end = (self.position + self.loader.batch_size).min(self.order.len());
        let range = self.position..end;
        self.position = end;

        Some(self.loader.load_range(&self.order, &self.sample_seeds, range).and_then(Batch::collate))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.position).div_ceil(self.loader.batch_size);
        (remaining, Some(remaining))
    }
}

impl<'a, D: Dataset> IntoIterator for &'a DataLoader<D> {
    type Item = Result<Batch, DataError>;
    type IntoIter = BatchIter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
