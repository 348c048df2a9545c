use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{Value, ValueKind};

/// An input leaf. Its value is fixed until re-set with [`Graph::set`].
#[derive(Debug, Clone)]
pub struct Constant {
    value: Value,
}

/// A trainable leaf. Optimizers move its value through `apply_update`.
#[derive(Debug, Clone)]
pub struct Parameter {
    value: Value,
}

impl Constant {
    pub fn new(value: impl Into<Value>) -> Self {
        Constant { value: value.into() }
    }
}

impl Parameter {
    pub fn new(value: impl Into<Value>) -> Self {
        Parameter { value: value.into() }
    }
}

fn replace(slot: &mut Value, value: Value, name: &str) -> Result<(), DagradError> {
    if value.kind() != slot.kind() {
        return Err(DagradError::TypeMismatch {
            expected: slot.kind(),
            actual: value.kind(),
            operation: format!("assign {}", name),
        });
    }
    *slot = value;
    Ok(())
}

impl Operator for Constant {
    fn name(&self) -> &'static str {
        "Constant"
    }

    fn inputs(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn output_kind(&self) -> ValueKind {
        self.value.kind()
    }

    fn evaluate(&mut self, _env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(self.value.clone())
    }

    fn differentiate(&self, _env: &Environment<'_>, _output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        Ok(Vec::new())
    }

    fn stored_value(&self) -> Option<&Value> {
        Some(&self.value)
    }

    fn assign(&mut self, value: Value) -> Result<(), DagradError> {
        let name = self.name();
        replace(&mut self.value, value, name)
    }
}

impl Operator for Parameter {
    fn name(&self) -> &'static str {
        "Parameter"
    }

    fn inputs(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn output_kind(&self) -> ValueKind {
        self.value.kind()
    }

    fn evaluate(&mut self, _env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(self.value.clone())
    }

    fn differentiate(&self, _env: &Environment<'_>, _output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        Ok(Vec::new())
    }

    fn is_updatable(&self) -> bool {
        true
    }

    fn apply_update(&mut self, delta: &Value) -> Result<(), DagradError> {
        self.value.accumulate(delta)
    }

    fn stored_value(&self) -> Option<&Value> {
        Some(&self.value)
    }

    fn assign(&mut self, value: Value) -> Result<(), DagradError> {
        let name = self.name();
        replace(&mut self.value, value, name)
    }
}

/// Adds an input leaf holding `value`.
pub fn constant(graph: &mut Graph, value: impl Into<Value>) -> NodeId {
    graph.insert(Box::new(Constant::new(value)))
}

/// Adds a trainable leaf initialised to `value`.
pub fn parameter(graph: &mut Graph, value: impl Into<Value>) -> NodeId {
    graph.insert(Box::new(Parameter::new(value)))
}

#[cfg(test)]
#[path = "leaf_test.rs"]
mod tests;
