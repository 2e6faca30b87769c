use crate::series::MetricSeries;
use std::collections::{BTreeMap, HashSet};

/// One [`MetricSeries`] per entity (camera), keyed by name.
///
/// Iteration is in lexicographic key order, which is also the order chart
/// colours are assigned in.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRegistry {
    series:   BTreeMap<String, MetricSeries>,
    capacity: usize,
}

impl EntityRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            series: BTreeMap::new(),
            capacity,
        }
    }

    /// Append `value` to the series for `key`, creating it on first sight.
    pub fn push(&mut self, key: &str, value: f64) {
        match self.series.get_mut(key) {
            Some(series) => series.push(value),
            None => {
                let mut series = MetricSeries::new(self.capacity);
                series.push(value);
                self.series.insert(key.to_string(), series);
            }
        }
    }

    /// Drop every series whose key is not in `active`. Returns the removed keys.
    pub fn prune<'a, I>(&mut self, active: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let active: HashSet<&str> = active.into_iter().collect();
        let stale: Vec<String> = self
            .series
            .keys()
            .filter(|k| !active.contains(k.as_str()))
            .cloned()
            .collect();

        for key in &stale {
            self.series.remove(key);
        }
        stale
    }

    pub fn get(&self, key: &str) -> Option<&MetricSeries> {
        self.series.get(key)
    }

    /// Series in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSeries)> + '_ {
        self.series.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }
}
