use super::{FieldValue, Record};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F: Copy + Eq> SortState<F> {
    pub fn ascending(field: F) -> Self {
        Self { field, direction: Direction::Ascending }
    }

    pub fn descending(field: F) -> Self {
        Self { field, direction: Direction::Descending }
    }

    /// Column-header click: same field flips direction, a new field starts ascending.
    pub fn clicked(current: Option<Self>, field: F) -> Self {
        match current {
            Some(state) if state.field == field => Self {
                field,
                direction: state.direction.flipped(),
            },
            _ => Self::ascending(field),
        }
    }
}

/// Returns `positions` reordered by `state`. Stable: ties keep their input order.
pub fn order<R: Record>(records: &[R], positions: &[usize], state: &SortState<R::Field>) -> Vec<usize> {
    // Keys are extracted once; lowercasing inside the comparator would repeat per comparison.
    let mut keyed: Vec<(SortKey, usize)> = positions
        .iter()
        .map(|&pos| (SortKey::from(records[pos].value(state.field)), pos))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.cmp(b);
        match state.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, pos)| pos).collect()
}

/// Numbers by value, text case-insensitively; numbers sort before text so
/// mixed columns still form a total preorder.
#[derive(Debug)]
enum SortKey {
    Integer(i128),
    Number(f64),
    Text(String),
}

impl From<FieldValue<'_>> for SortKey {
    fn from(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Integer(n) => SortKey::Integer(n),
            FieldValue::Number(n) => SortKey::Number(n),
            FieldValue::Text(t) => SortKey::Text(t.to_lowercase()),
        }
    }
}

impl SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(x), SortKey::Integer(y)) => x.cmp(y),
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Integer(x), SortKey::Number(y)) => (*x as f64).total_cmp(y),
            (SortKey::Number(x), SortKey::Integer(y)) => x.total_cmp(&(*y as f64)),
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
            (SortKey::Text(_), _) => Ordering::Greater,
            (_, SortKey::Text(_)) => Ordering::Less,
        }
    }
}
