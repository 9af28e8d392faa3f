// src/extract/path.rs

use serde_json::Value;

/// One hop into a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Key(&'static str),
    Index(usize),
}

/// Follow `steps` from `root`, stopping at the first hop that isn't there.
///
/// `null` is treated the same as a missing value at every hop, so a present
/// but null section behaves like an absent one. An empty or missing array
/// therefore acts as a single empty entry: anything looked up through it is
/// simply absent.
pub fn dig<'a>(root: &'a Value, steps: &[Step]) -> Option<&'a Value> {
    steps.iter().try_fold(root, |node, step| {
        let next = match *step {
            Step::Key(key) => node.get(key),
            Step::Index(i) => node.get(i),
        }?;
        (!next.is_null()).then_some(next)
    })
}

/// Flatten a scalar into a table cell. Missing and `null` become `""`.
pub fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// `dig` then `render`.
pub fn cell(root: &Value, steps: &[Step]) -> String {
    render(dig(root, steps))
}
