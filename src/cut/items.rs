use serde_json::Value;

/// A document viewed as a batch of records.
///
/// A root array is a sequence of records; any other value is a single
/// record. `into_value` restores the original shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Items {
    pub records: Vec<Value>,
    wrapped: bool,
}

impl Items {
    /// Splits `document` into records. With `slice` set the document is
    /// always one record, arrays included.
    pub fn new(document: Value, slice: bool) -> Self {
        match document {
            Value::Array(records) if !slice => Self {
                records,
                wrapped: false,
            },
            other => Self {
                records: vec![other],
                wrapped: true,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_value(mut self) -> Value {
        if self.wrapped {
            self.records.pop().unwrap_or(Value::Null)
        } else {
            Value::Array(self.records)
        }
    }
}
