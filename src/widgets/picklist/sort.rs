use std::cmp::Ordering;

use serde_json::Value;

use super::row::PicklistRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    /// Advance for a header click on `column`: a new column starts
    /// ascending, the same column flips between ascending and descending.
    pub fn cycle(&mut self, column: &str) {
        if self.column.as_deref() != Some(column) {
            self.column = Some(column.to_string());
            self.order = SortOrder::Ascending;
            return;
        }
        self.order = match self.order {
            SortOrder::None | SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
        };
    }

    pub fn clear(&mut self) {
        self.column = None;
        self.order = SortOrder::None;
    }
}

/// Indices of `rows` in display order. The sort is stable and rows lacking
/// a value in the column come last in either direction.
pub(crate) fn display_order(rows: &[PicklistRow], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(column) = sort.column.as_deref() else {
        return order;
    };
    if sort.order == SortOrder::None {
        return order;
    }
    order.sort_by(|&a, &b| {
        let left = rows[a].get(column).filter(|value| !value.is_null());
        let right = rows[b].get(column).filter(|value| !value.is_null());
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => {
                let ordering = compare_values(left, right);
                if sort.order == SortOrder::Descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    });
    order
}

/// Numbers compare numerically, strings lexically, booleans false-first.
/// Mixed types order as bool < number < string < anything else.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => rank(left)
            .cmp(&rank(right))
            .then_with(|| left.to_string().cmp(&right.to_string())),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
