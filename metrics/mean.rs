use super::StreamingMetric;
use num_traits::ToPrimitive;

/// The arithmetic mean of a stream of `f32` values, accumulated in `f64`.
#[derive(Debug, Clone, Default)]
pub struct Mean {
	n: u64,
	sum: f64,
}

impl StreamingMetric<'_> for Mean {
	type Input = f32;
	type Output = Option<f32>;

	fn update(&mut self, value: f32) {
		self.n += 1;
		self.sum += f64::from(value);
	}

	fn merge(&mut self, other: Self) {
		self.n += other.n;
		self.sum += other.sum;
	}

	fn finalize(self) -> Option<f32> {
		if self.n == 0 {
			None
		} else {
			(self.sum / self.n.to_f64()?).to_f32()
		}
	}
}

#[test]
fn test_mean() {
	let mut left = Mean::default();
	left.update(1.0);
	left.update(2.0);
	let mut right = Mean::default();
	right.update(6.0);
	left.merge(right);
	assert_eq!(left.finalize(), Some(3.0));
	assert_eq!(Mean::default().finalize(), None);
}
