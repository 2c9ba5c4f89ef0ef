//! Unit-at-a-time processing
//!
//! Every pipeline turns a unit (document or entity) into a [`UnitReport`]
//! through the same [`Stage`] interface, so the driver below only decides
//! ordering and pacing.

use crate::metrics::BatchReport;
use crate::types::UnitReport;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::info;

/// A step that turns one input into one output without failing
#[async_trait]
pub trait Stage<In, Out>: Send + Sync
where
    In: Send + 'static,
{
    /// Process one input
    async fn process(&self, input: In) -> Out;
}

/// Runs units one at a time, in order, with a fixed pause between them
#[derive(Debug, Clone, Copy)]
pub struct SequentialRunner {
    pause: Duration,
}

impl SequentialRunner {
    /// Create a runner pausing `pause` between units
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }

    /// Process every unit and collect the batch counters
    pub async fn run<S, In>(&self, pipeline: &str, stage: &S, units: Vec<In>) -> BatchReport
    where
        S: Stage<In, UnitReport> + ?Sized,
        In: Send + 'static,
    {
        let started = Instant::now();
        let total = units.len();
        let mut report = BatchReport::new(pipeline);

        info!("Starting {} run over {} unit(s)", pipeline, total);

        for (i, unit) in units.into_iter().enumerate() {
            if i > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let unit_report = stage.process(unit).await;
            info!(
                "[{}/{}] {}: {} confirmed, {} outcome(s){}",
                i + 1,
                total,
                unit_report.unit_id,
                unit_report.confirmed_count(),
                unit_report.outcomes.len(),
                if unit_report.archived { ", archived" } else { "" }
            );
            report.record_unit(&unit_report);
        }

        report.runtime_ms = started.elapsed().as_millis() as u64;
        info!("{}", report.summary());
        report
    }
}
