use std::collections::VecDeque;

/// Rolling window of numeric samples for one metric, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl MetricSeries {
    /// A zero `capacity` is bumped to 1 so the series can hold its latest sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest once the window is over capacity.
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
