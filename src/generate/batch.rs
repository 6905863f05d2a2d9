use rayon::prelude::*;

use crate::foundation::core::MarkerSpec;
use crate::foundation::error::{LessonmarkError, LessonmarkResult};
use crate::generate::generator::{MarkerGenerator, MarkerOutcome};

/// How a batch is scheduled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOpts {
    /// Spread specs over a rayon pool instead of running them in order on the caller's thread.
    pub parallel: bool,
    /// Worker count for parallel mode; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl MarkerGenerator {
    /// Generate a marker for every spec.
    ///
    /// Returns one outcome per spec, in input order. Specs are independent: a failed spec is
    /// recorded in its own slot and the rest of the batch still runs. Only invalid `opts` make the
    /// whole call fail.
    #[tracing::instrument(skip_all, fields(specs = specs.len(), parallel = opts.parallel))]
    pub fn generate_all(
        &self,
        specs: &[MarkerSpec],
        opts: &BatchOpts,
    ) -> LessonmarkResult<Vec<MarkerOutcome>> {
        let outcomes: Vec<MarkerOutcome> = if opts.parallel {
            let pool = build_thread_pool(opts.threads)?;
            pool.install(|| specs.par_iter().map(|spec| self.generate(spec)).collect())
        } else {
            specs.iter().map(|spec| self.generate(spec)).collect()
        };

        let failed = outcomes.iter().filter(|o| !o.success).count();
        tracing::info!(total = outcomes.len(), failed, "batch finished");
        Ok(outcomes)
    }
}

fn build_thread_pool(threads: Option<usize>) -> LessonmarkResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LessonmarkError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LessonmarkError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/generate/batch.rs"]
mod tests;
