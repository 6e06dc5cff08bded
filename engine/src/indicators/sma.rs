// Simple Moving Average (SMA)
use super::IndicatorCalculator;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, values: &[f64]) -> Vec<Option<f64>> {
        if self.period == 0 || values.len() < self.period {
            return vec![None; values.len()];
        }

        let mut results = vec![None; self.period - 1];

        let mut sum: f64 = values.iter().take(self.period).sum();
        results.push(Some(sum / self.period as f64));

        // Slide the window
        for i in self.period..values.len() {
            sum = sum - values[i - self.period] + values[i];
            results.push(Some(sum / self.period as f64));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[Option<f64>], b: &[Option<f64>]) {
        assert_eq!(a.len(), b.len(), "Vectors differ in length");
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            match (x, y) {
                (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9, "Mismatch at index {}: {} != {}", i, x, y),
                (None, None) => {}
                _ => panic!("Mismatch at index {}: {:?} != {:?}", i, x, y),
            }
        }
    }

    #[test]
    fn test_sma_calculation() {
        let results = Sma::new(3).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_close(&results, &[None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert_close(&Sma::new(3).calculate(&[1.0, 2.0]), &[None, None]);
    }

    #[test]
    fn test_sma_period_one() {
        assert_close(&Sma::new(1).calculate(&[1.0, 2.0, 3.0]), &[Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_sma_empty_and_zero_period() {
        assert!(Sma::new(3).calculate(&[]).is_empty());
        assert_close(&Sma::new(0).calculate(&[1.0, 2.0]), &[None, None]);
    }
}
