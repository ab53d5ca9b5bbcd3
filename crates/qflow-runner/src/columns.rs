//! Grouping gate records into time-ordered columns.

use std::collections::BTreeMap;

use crate::record::GateRecord;

/// Gates sharing one column position, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    /// The column position.
    pub position: i64,
    /// Records at this position.
    pub gates: Vec<&'a GateRecord>,
}

/// Group records by column, in ascending position order.
///
/// Only occupied positions produce a column; gaps are not filled.
pub fn build_columns(records: &[GateRecord]) -> Vec<Column<'_>> {
    let mut by_position: BTreeMap<i64, Vec<&GateRecord>> = BTreeMap::new();
    for record in records {
        by_position.entry(record.column()).or_default().push(record);
    }

    by_position
        .into_iter()
        .map(|(position, gates)| Column { position, gates })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_sorted_and_stable() {
        let records = vec![
            GateRecord::new("x").on(0).at(2),
            GateRecord::new("h").on(0).at(0).with_id("first"),
            GateRecord::new("h").on(1).at(0).with_id("second"),
        ];

        let columns = build_columns(&records);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].position, 0);
        assert_eq!(columns[1].position, 2);

        let ids: Vec<_> = columns[0].gates.iter().map(|g| g.label()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_no_gap_filling() {
        let records = vec![GateRecord::new("h").on(0).at(5)];
        let columns = build_columns(&records);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].position, 5);
    }

    #[test]
    fn test_missing_position_joins_column_zero() {
        let records = vec![
            GateRecord::new("x").on(0).at(0),
            GateRecord::new("y").on(0),
            GateRecord::new("z").on(0).at(-1),
        ];
        let columns = build_columns(&records);
        let positions: Vec<_> = columns.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![-1, 0]);
        assert_eq!(columns[1].gates.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_columns(&[]).is_empty());
    }
}
