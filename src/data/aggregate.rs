/// Round to two decimal places, the precision every view displays.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running arithmetic mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` until at least one value was pushed.
    pub fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl FromIterator<f64> for Mean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut mean = Mean::default();
        for v in iter {
            mean.push(v);
        }
        mean
    }
}
