use crate::autograd::{Executor, ExecutorOptions, Graph, NodeId};
use crate::error::DagradError;
use crate::optim::optimizer_trait::{trainable_nodes, Optimizer};
use crate::value::{Scalar, Value};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Hyperparameters of [`AdamOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    /// Step size.
    pub alpha: Scalar,
    /// Decay of the first-moment average.
    pub beta1: Scalar,
    /// Decay of the second-moment average.
    pub beta2: Scalar,
    pub epsilon: Scalar,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            alpha: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl AdamConfig {
    pub fn validate(&self) -> Result<(), DagradError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(DagradError::ConfigurationError(
                "Alpha must be positive and finite".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.beta1) {
            return Err(DagradError::ConfigurationError(
                "Beta1 must be in [0, 1)".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.beta2) {
            return Err(DagradError::ConfigurationError(
                "Beta2 must be in [0, 1)".to_string(),
            ));
        }
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return Err(DagradError::ConfigurationError(
                "Epsilon must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hyperparameters of [`AdamWOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamWConfig {
    pub adam: AdamConfig,
    /// Decoupled weight decay factor.
    pub lambda: Scalar,
}

impl Default for AdamWConfig {
    fn default() -> Self {
        AdamWConfig {
            adam: AdamConfig::default(),
            lambda: 0.01,
        }
    }
}

impl AdamWConfig {
    pub fn validate(&self) -> Result<(), DagradError> {
        self.adam.validate()?;
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return Err(DagradError::ConfigurationError(
                "Weight decay must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Represents the state for a single parameter in the Adam optimizer.
#[derive(Clone, Debug, PartialEq)]
pub struct AdamParamState {
    /// First moment (exponential moving average of gradients).
    pub m: Value,
    /// Second moment (exponential moving average of squared gradients).
    pub v: Value,
}

/// Adam optimizer.
///
/// Both moments are seeded from the first gradient a node receives,
/// `m = (1 - β1)·g` and `v = (1 - β2)·g²`, rather than from zero. The step
/// counter is global and advances once per [`Optimizer::update`]. The delta is
/// `-α · √(1 - β2ᵗ) / (1 - β1ᵗ) · m / (√v + ε)`, element-wise.
#[derive(Debug)]
pub struct AdamOptimizer {
    executor: Executor,
    config: AdamConfig,
    iterations: u64,
    state: HashMap<NodeId, AdamParamState>,
}

impl AdamOptimizer {
    pub fn new(graph: &Graph, loss: NodeId, config: AdamConfig) -> Result<Self, DagradError> {
        Self::with_options(graph, loss, config, ExecutorOptions::default())
    }

    pub fn with_options(
        graph: &Graph,
        loss: NodeId,
        config: AdamConfig,
        options: ExecutorOptions,
    ) -> Result<Self, DagradError> {
        config.validate()?;
        Ok(AdamOptimizer {
            executor: Executor::with_options(graph, loss, options)?,
            config,
            iterations: 0,
            state: HashMap::new(),
        })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Number of completed `update` calls.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn state_of(&self, id: NodeId) -> Option<&AdamParamState> {
        self.state.get(&id)
    }

    fn adaptive_step(&mut self, graph: &mut Graph, nodes: &[NodeId]) -> Result<(), DagradError> {
        let AdamConfig { alpha, beta1, beta2, epsilon } = self.config;
        self.iterations += 1;
        let t = self.iterations as f64;
        let correction = (1.0 - beta2.powf(t)).sqrt() / (1.0 - beta1.powf(t));

        for &id in nodes {
            let grad = self.executor.gradient_of(id)?;
            let state = match self.state.entry(id) {
                Entry::Occupied(slot) => {
                    let state = slot.into_mut();
                    state.m = state.m.zip_map(&grad, "adam first moment", |m, g| beta1 * m + (1.0 - beta1) * g)?;
                    state.v = state.v.zip_map(&grad, "adam second moment", |v, g| beta2 * v + (1.0 - beta2) * g * g)?;
                    state
                }
                Entry::Vacant(slot) => slot.insert(AdamParamState {
                    m: grad.scale(1.0 - beta1),
                    v: grad.map(|g| (1.0 - beta2) * g * g),
                }),
            };
            let delta = state.m.zip_map(&state.v, "adam", |m, v| -alpha * correction * m / (v.sqrt() + epsilon))?;
            graph.node_mut(id)?.apply_update(&delta)?;
        }
        debug!(
            "adam: step {} updated {} parameters (correction {:.6})",
            self.iterations,
            nodes.len(),
            correction
        );
        Ok(())
    }
}

impl Optimizer for AdamOptimizer {
    fn executor(&self) -> &Executor {
        &self.executor
    }

    fn executor_mut(&mut self) -> &mut Executor {
        &mut self.executor
    }

    fn update(&mut self, graph: &mut Graph) -> Result<(), DagradError> {
        let nodes = trainable_nodes(&self.executor, graph)?;
        if nodes.is_empty() {
            warn!("adam: no updatable node is reachable from the loss");
        }
        self.adaptive_step(graph, &nodes)
    }
}

/// Adam with decoupled weight decay.
///
/// Each update first pulls every parameter toward zero by `-λ · value`,
/// independently of its gradient, then applies the Adam step on top.
#[derive(Debug)]
pub struct AdamWOptimizer {
    adam: AdamOptimizer,
    lambda: Scalar,
}

impl AdamWOptimizer {
    pub fn new(graph: &Graph, loss: NodeId, config: AdamWConfig) -> Result<Self, DagradError> {
        Self::with_options(graph, loss, config, ExecutorOptions::default())
    }

    pub fn with_options(
        graph: &Graph,
        loss: NodeId,
        config: AdamWConfig,
        options: ExecutorOptions,
    ) -> Result<Self, DagradError> {
        config.validate()?;
        Ok(AdamWOptimizer {
            adam: AdamOptimizer::with_options(graph, loss, config.adam, options)?,
            lambda: config.lambda,
        })
    }

    pub fn lambda(&self) -> Scalar {
        self.lambda
    }

    pub fn adam(&self) -> &AdamOptimizer {
        &self.adam
    }
}

impl Optimizer for AdamWOptimizer {
    fn executor(&self) -> &Executor {
        &self.adam.executor
    }

    fn executor_mut(&mut self) -> &mut Executor {
        &mut self.adam.executor
    }

    fn update(&mut self, graph: &mut Graph) -> Result<(), DagradError> {
        let nodes = trainable_nodes(&self.adam.executor, graph)?;
        for &id in &nodes {
            let node = graph.node_mut(id)?;
            // Parameters hold their value; the cached forward value is the fallback.
            let current = match node.stored_value() {
                Some(value) => value.clone(),
                None => self.adam.executor.value_of(id)?.clone(),
            };
            node.apply_update(&current.scale(-self.lambda))?;
        }
        self.adam.adaptive_step(graph, &nodes)
    }
}
