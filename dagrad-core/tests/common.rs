use dagrad_core::autograd::{Environment, NodeId, Operator};
use dagrad_core::{DagradError, Value, ValueKind};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scalar identity that counts its evaluations and can have its inputs
/// rewired after insertion. Used to probe the executor from outside the crate.
#[derive(Debug)]
#[allow(dead_code)]
pub struct Probe {
    pub inputs: Rc<RefCell<Vec<NodeId>>>,
    pub evaluations: Rc<Cell<usize>>,
    /// Number of gradients returned by `differentiate`; `None` means one per input.
    pub gradient_count: Option<usize>,
}

#[allow(dead_code)]
impl Probe {
    pub fn new(inputs: Vec<NodeId>) -> Self {
        Probe {
            inputs: Rc::new(RefCell::new(inputs)),
            evaluations: Rc::new(Cell::new(0)),
            gradient_count: None,
        }
    }
}

impl Operator for Probe {
    fn name(&self) -> &'static str {
        "Probe"
    }

    fn inputs(&self) -> Vec<NodeId> {
        self.inputs.borrow().clone()
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        self.evaluations.set(self.evaluations.get() + 1);
        let mut total = 0.0;
        for id in self.inputs() {
            total += env.scalar(id)?;
        }
        Ok(Value::Scalar(total))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let count = self.gradient_count.unwrap_or_else(|| self.inputs.borrow().len());
        Ok(vec![output_grad.clone(); count])
    }
}
