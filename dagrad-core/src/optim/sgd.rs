use crate::autograd::{Executor, ExecutorOptions, Graph, NodeId};
use crate::error::DagradError;
use crate::optim::optimizer_trait::{trainable_nodes, Optimizer};
use crate::value::Scalar;
use log::debug;

/// Hyperparameters of [`SgdOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    /// Learning rate.
    pub rate: Scalar,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig { rate: 0.01 }
    }
}

impl SgdConfig {
    pub fn validate(&self) -> Result<(), DagradError> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(DagradError::ConfigurationError(format!(
                "Learning rate must be positive and finite, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}

/// Implements plain gradient descent: `delta = -rate · gradient`.
#[derive(Debug)]
pub struct SgdOptimizer {
    executor: Executor,
    config: SgdConfig,
}

impl SgdOptimizer {
    pub fn new(graph: &Graph, loss: NodeId, config: SgdConfig) -> Result<Self, DagradError> {
        Self::with_options(graph, loss, config, ExecutorOptions::default())
    }

    pub fn with_options(
        graph: &Graph,
        loss: NodeId,
        config: SgdConfig,
        options: ExecutorOptions,
    ) -> Result<Self, DagradError> {
        config.validate()?;
        Ok(SgdOptimizer {
            executor: Executor::with_options(graph, loss, options)?,
            config,
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    pub fn set_rate(&mut self, rate: Scalar) -> Result<(), DagradError> {
        let config = SgdConfig { rate };
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

impl Optimizer for SgdOptimizer {
    fn executor(&self) -> &Executor {
        &self.executor
    }

    fn executor_mut(&mut self) -> &mut Executor {
        &mut self.executor
    }

    fn update(&mut self, graph: &mut Graph) -> Result<(), DagradError> {
        let nodes = trainable_nodes(&self.executor, graph)?;
        for &id in &nodes {
            let delta = self.executor.gradient_of(id)?.scale(-self.config.rate);
            graph.node_mut(id)?.apply_update(&delta)?;
        }
        debug!("sgd: updated {} parameters (rate {})", nodes.len(), self.config.rate);
        Ok(())
    }
}
