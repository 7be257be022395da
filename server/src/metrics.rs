use rocket_prometheus::prometheus::{IntCounterVec, Opts};
use rocket_prometheus::PrometheusMetrics;
use shared::Transition;

#[derive(Clone, Debug)]
pub struct StreakMetrics {
    completions: IntCounterVec,
}

impl StreakMetrics {
    pub fn register(prometheus: &PrometheusMetrics) -> anyhow::Result<Self> {
        let completions = IntCounterVec::new(
            Opts::new(
                "streak_completions_total",
                "Completion requests by what they did to the streak",
            ),
            &["outcome"],
        )?;
        prometheus
            .registry()
            .register(Box::new(completions.clone()))?;

        Ok(Self { completions })
    }

    pub fn record(&self, transition: Transition) {
        let outcome: &'static str = transition.into();
        self.completions.with_label_values(&[outcome]).inc();
    }
}
