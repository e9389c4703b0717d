use crate::utils::default_parallel_min_width;
use crate::{IntervalEngine, IntervalProblem};

pub struct IntervalEngineBuilder<P: IntervalProblem> {
    problem: P,
    parallel_min_width: Option<usize>,
}

impl<P: IntervalProblem> IntervalEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            parallel_min_width: None,
        }
    }
    pub fn with_parallel_min_width(mut self, width: usize) -> Self {
        self.parallel_min_width = Some(width);
        self
    }
    /// Force every diagonal through the serial path.
    pub fn serial(self) -> Self {
        self.with_parallel_min_width(usize::MAX)
    }
    pub fn build(self) -> IntervalEngine<P> {
        match self.parallel_min_width {
            Some(w) => IntervalEngine::with_parallel_min_width(self.problem, w),
            None => {
                let w = default_parallel_min_width(self.problem.num_items());
                IntervalEngine::with_parallel_min_width(self.problem, w)
            }
        }
    }
}
