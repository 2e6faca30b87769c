use std::collections::VecDeque;

/// Time labels shared by every series drawn on one chart.
///
/// Evicts with the same policy as [`MetricSeries`](crate::MetricSeries), so
/// series pushed once per label stay positionally aligned with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAxis {
    labels:   VecDeque<String>,
    capacity: usize,
}

impl LabelAxis {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push_back(label.into());
        if self.labels.len() > self.capacity {
            self.labels.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_label_is_evicted() {
        let mut axis = LabelAxis::new(3);
        for label in ["10:00:00", "10:00:03", "10:00:06", "10:00:09"] {
            axis.push(label);
        }
        assert_eq!(axis.to_vec(), vec!["10:00:03", "10:00:06", "10:00:09"]);
        assert_eq!(axis.len(), 3);
    }
}
