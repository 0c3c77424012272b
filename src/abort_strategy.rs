/// Describes why a k-means calculation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
	/// The requested cluster count was degenerate (`k <= 1` or `k >= sample_cnt`), and the
	/// result was computed directly, without iterating.
	ClosedForm,
	/// The last iteration did not move any sample to another cluster.
	Converged,
	/// The iteration ceiling was hit while samples were still moving.
	/// The latest assignment is returned anyway, but it may be suboptimal.
	/// ## Fields:
	/// - **changed**: Amount of samples that changed their cluster in the last iteration
	IterationLimitReached { changed: usize }
}
impl Termination {
	/// `true` unless the iteration ceiling was hit. Closed-form results count as converged.
	pub fn is_converged(&self) -> bool {
		!matches!(self, Termination::IterationLimitReached{..})
	}
}

/// Decides after each iteration, whether the convergence loop continues.
/// The loop continues while samples still change clusters and the iteration ceiling was not hit.
pub(crate) struct AbortStrategyLogic {
	max_iter: usize,
	iteration: usize
}
impl AbortStrategyLogic {
	pub fn new(max_iter: usize) -> Self {
		Self { max_iter: max_iter.max(1), iteration: 0 }
	}

	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **changed**: Amount of samples that were moved into another cluster during the iteration
	/// ## Returns
	/// - **None** if the calculation should continue
	/// - **Some(termination)** if the calculation should stop
	pub fn next(&mut self, changed: usize) -> Option<Termination> {
		self.iteration += 1;
		if changed == 0 {
			Some(Termination::Converged)
		} else if self.iteration >= self.max_iter {
			Some(Termination::IterationLimitReached { changed })
		} else {
			None
		}
	}

	pub fn iterations(&self) -> usize { self.iteration }
}
