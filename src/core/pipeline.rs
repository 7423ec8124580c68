//! Full design evaluation: bounding box, DFM check, cost and comparison

use rayon::prelude::*;
use std::num::NonZeroU32;

use crate::core::cost::CostEstimator;
use crate::core::dfm::DfmValidator;
use crate::entities::{Design, DesignStatus, Evaluation};
use crate::reference::ReferenceTables;

/// Runs every engine over a design against one set of reference tables
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    validator: DfmValidator<'a>,
    estimator: CostEstimator<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self {
            validator: DfmValidator::new(tables),
            estimator: CostEstimator::new(tables),
        }
    }

    /// Evaluate one design at a production quantity
    pub fn evaluate(&self, design: &Design, quantity: NonZeroU32) -> Evaluation {
        let bounding_box = design.geometry.bounding_box();
        let validation = self.validator.validate(design);
        let cost_estimate = self.estimator.estimate(design, &bounding_box, quantity);
        let process_comparison = self.estimator.compare(design, &bounding_box, quantity);

        Evaluation {
            source: None,
            status: DesignStatus::from_validation(&validation),
            bounding_box,
            validation,
            cost_estimate,
            process_comparison,
        }
    }

    /// Evaluate many (design, quantity) jobs in parallel; results keep input order
    pub fn evaluate_batch(&self, jobs: &[(Design, NonZeroU32)]) -> Vec<Evaluation> {
        tracing::debug!(count = jobs.len(), "evaluating batch");
        jobs.par_iter()
            .map(|(design, quantity)| self.evaluate(design, *quantity))
            .collect()
    }
}
