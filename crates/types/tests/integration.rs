//! Integration tests for types

#[cfg(test)]
mod tests {
    use procpool_types::*;

    fn record(id: u64, exit_code: i32) -> ExitRecord {
        ExitRecord {
            id: SlotId(id),
            command: format!("exit {exit_code}"),
            exit_code,
            duration_ms: 5,
        }
    }

    #[test]
    fn test_reclaim_strategy_names() {
        assert_eq!(
            ReclaimStrategy::from_name("first-exited"),
            Some(ReclaimStrategy::FirstExited)
        );
        assert_eq!(
            ReclaimStrategy::from_name("all"),
            Some(ReclaimStrategy::AllExited)
        );
        assert_eq!(ReclaimStrategy::from_name("fastest"), None);
        assert_eq!(ReclaimStrategy::AllExited.to_string(), "all-exited");
    }

    #[test]
    fn test_reclaim_strategy_serialization() {
        let json = serde_json::to_string(&ReclaimStrategy::FirstExited).unwrap();
        assert_eq!(json, r#""first-exited""#);
    }

    #[test]
    fn test_report_failures() {
        let report = PoolReport {
            capacity: 2,
            dry_run: false,
            results: vec![record(1, 1), record(0, 0)],
            stats: PoolStats {
                submitted: 2,
                completed: 2,
                failed: 1,
                dry_run: 0,
            },
            duration_ms: 10,
        };

        assert!(!report.all_succeeded());
        assert_eq!(report.stats.succeeded(), 1);
        let failed: Vec<_> = report.failures().map(|r| r.id).collect();
        assert_eq!(failed, vec![SlotId(1)]);
    }

    #[test]
    fn test_slot_id_serializes_as_number() {
        let json = serde_json::to_string(&record(3, 0)).unwrap();
        assert!(json.contains(r#""id":3"#));
        assert_eq!(SlotId(3).to_string(), "#3");
    }
}
