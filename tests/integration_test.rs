//! 集成測試

use chrono::{Duration, TimeZone, Utc};
use printfarm::*;
use rstest::rstest;
use rust_decimal::Decimal;

fn printer(id: &str, speed: Decimal, tags: &str) -> Machine {
    Machine::new(id, format!("Printer {}", id))
        .with_speed_factor(speed)
        .unwrap()
        .with_tags(TagSet::parse(tags))
}

fn untagged_task(minutes: i64) -> ProductionTask {
    ProductionTask::new("C", "Comp", 1, Decimal::from(minutes))
}

#[rstest]
#[case::two_printers(vec![Decimal::ONE, Decimal::ONE], vec![180, 120], 180)]
#[case::one_printer(vec![Decimal::ONE], vec![180, 120], 300)]
#[case::fast_printer(vec![Decimal::from(2)], vec![120], 60)]
fn test_reference_schedules(
    #[case] speeds: Vec<Decimal>,
    #[case] durations: Vec<i64>,
    #[case] expected_makespan: i64,
) {
    let machines: Vec<Machine> = speeds
        .into_iter()
        .enumerate()
        .map(|(i, speed)| printer(&format!("P{}", i + 1), speed, ""))
        .collect();
    let tasks: Vec<ProductionTask> = durations.into_iter().map(untagged_task).collect();

    let result = ListScheduler::default().schedule(&tasks, &machines);

    assert_eq!(result.makespan_min, Decimal::from(expected_makespan));
    assert!(result.unassigned.is_empty());
}

#[test]
fn test_incompatible_material_is_reported_not_failed() {
    let machines = vec![printer("P1", Decimal::ONE, "pla")];
    let tasks = vec![untagged_task(60).with_required_tags(TagSet::parse("abs"))];

    let result = ListScheduler::default().schedule(&tasks, &machines);

    assert_eq!(result.unassigned.len(), 1);
    assert_eq!(result.makespan_min, Decimal::ZERO);
    assert_eq!(result.warnings[0].severity, WarningSeverity::Warning);
}

#[test]
fn test_order_expansion_and_schedule() {
    // 場景：每盤 2 件、每盤 60 分鐘、準備 10 分鐘，需求 3 件
    let component = ComponentSpec::new("C1", "Comp1")
        .with_batch_size(2)
        .with_per_plate_time(Decimal::from(60))
        .with_setup_time(Decimal::from(10));
    let product = Product::new("PR1", "Prod1").with_bom_line(component, 3);
    let order = ProductionOrder::new("WO-1", product, 1);

    let preview = TaskExpander::expand_order(&order);
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0].duration_min, Decimal::from(70));
    assert_eq!(preview[1].duration_min, Decimal::from(60));

    let machines = vec![
        printer("P1", Decimal::ONE, ""),
        printer("P2", Decimal::ONE, ""),
        printer("P3", Decimal::ONE, "").with_active(false),
    ];
    let result = schedule_order(&order, &machines, SchedulerConfig::default());

    assert_eq!(result.assignments.len(), 2);
    assert_eq!(result.makespan_min, Decimal::from(70));
    assert_eq!(result.assigned_quantity(), 3);
    assert_eq!(result.machine_loads.len(), 2);
}

#[test]
fn test_schedule_then_estimate_capacity() {
    // 排程結果寫回為指派記錄，再估算剩餘時間
    let component = ComponentSpec::new("GEAR", "Gear")
        .with_batch_size(5)
        .with_per_plate_time(Decimal::from(50))
        .with_unit_time(Decimal::from(10))
        .with_required_tags(TagSet::parse("petg"));
    let product = Product::new("BOX", "Gearbox").with_bom_line(component, 4);
    let order = ProductionOrder::new("OP-7", product, 5);

    let machines = vec![
        printer("P1", Decimal::ONE, "petg"),
        printer("P2", Decimal::from(2), "petg,pla"),
        printer("P3", Decimal::ONE, "pla"),
    ];

    let schedule = schedule_order(&order, &machines, SchedulerConfig::default());
    assert!(schedule.is_feasible());
    assert!(schedule.assignments.iter().all(|a| a.machine_id != "P3"));

    let mut ledger = AssignmentLedger::new(&order, &machines, &[]);
    for assignment in &schedule.assignments {
        ledger
            .admit(AssignmentRecord::new(
                order.order_id.clone(),
                assignment.task.component_id.clone(),
                assignment.machine_id.clone(),
                assignment.task.quantity,
            ))
            .unwrap();
    }
    assert_eq!(ledger.assignable_for("GEAR"), 0);

    // 再多指派一件必須被拒絕
    let extra = ledger.admit(AssignmentRecord::new("OP-7", "GEAR", "P1", 1));
    assert!(matches!(
        extra,
        Err(FarmError::QuantityExceedsRequired { assigned: 21, required: 20, .. })
    ));

    let start = Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap();
    let logs = vec![ProductionLog::new("OP-7", "GEAR", 8).with_logged_at(start + Duration::hours(2))];
    let records = ledger.into_records();

    let snapshot = CapacityEstimator::default()
        .estimate(&order, &logs, &records, &machines)
        .unwrap();
    let gear = snapshot.component("GEAR").unwrap();

    assert_eq!(gear.required_qty, 20);
    assert_eq!(gear.completed_qty, 8);
    assert_eq!(gear.assigned_qty, 20);
    assert_eq!(gear.remaining_qty, 12);
    // 每筆指派各自計入產能：P1 兩筆 (1 + 1)、P2 兩筆 (2 + 2)
    assert_eq!(gear.capacity, Decimal::from(6));
    assert_eq!(gear.tasks.len(), 4);
    // 12 × 10 ÷ 6 = 20 分鐘
    assert_eq!(gear.remaining_time, RemainingTime::Finite(Decimal::from(20)));
    assert_eq!(snapshot.total_remaining_min, Decimal::from(20));
}

#[test]
fn test_progress_and_nominal_time_remaining() {
    let product = Product::new("P1", "Prod")
        .with_bom_line(
            ComponentSpec::new("C1", "CompA").with_unit_time(Decimal::from(60)),
            2,
        )
        .with_bom_line(
            ComponentSpec::new("C2", "CompB").with_unit_time(Decimal::from(30)),
            1,
        );
    let order = ProductionOrder::new("OP-1", product, 1);

    let progress = ProgressCalculator::calculate(&order, &[]);
    assert_eq!(progress.nominal_remaining_min, Decimal::from(120));
    assert_eq!(Minutes(progress.nominal_remaining_min).to_string(), "2h00");

    let logs = vec![ProductionLog::new("OP-1", "C1", 1)];
    let progress = ProgressCalculator::calculate(&order, &logs);
    assert_eq!(progress.nominal_remaining_min, Decimal::from(60));
    assert_eq!(Minutes(progress.nominal_remaining_min).to_string(), "1h00");
}

#[test]
fn test_results_serialize_field_for_field() {
    let machines = vec![printer("P1", Decimal::ONE, "")];
    let tasks = vec![untagged_task(45)];

    let result = ListScheduler::default().schedule(&tasks, &machines);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["assignments"][0]["machine_id"], "P1");
    assert_eq!(json["assignments"][0]["task"]["quantity"], 1);
    let decimal_at = |value: &serde_json::Value| value.as_str().unwrap().parse::<Decimal>().unwrap();
    assert_eq!(decimal_at(&json["makespan_min"]), Decimal::from(45));
    assert_eq!(decimal_at(&json["machine_loads"]["P1"]), Decimal::from(45));
    assert!(json["unassigned"].as_array().unwrap().is_empty());
}

#[test]
fn test_concurrent_invocations_are_independent() {
    let machines = vec![
        printer("P1", Decimal::ONE, ""),
        printer("P2", Decimal::new(15, 1), ""),
    ];
    let tasks: Vec<ProductionTask> = [90, 30, 60, 120, 45].into_iter().map(untagged_task).collect();
    let baseline = ListScheduler::default().schedule(&tasks, &machines);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| ListScheduler::default().schedule(&tasks, &machines)))
            .collect();

        for handle in handles {
            let result = handle.join().unwrap();
            assert_eq!(result.makespan_min, baseline.makespan_min);
            assert_eq!(result.assignments, baseline.assignments);
            assert_eq!(result.machine_loads, baseline.machine_loads);
        }
    });
}

#[test]
fn test_repeated_schedule_serializes_identically() {
    let component = ComponentSpec::new("C1", "Comp1")
        .with_batch_size(2)
        .with_per_plate_time(Decimal::from(45))
        .with_setup_time(Decimal::from(5));
    let product = Product::new("PR1", "Prod1").with_bom_line(component, 3);
    let order = ProductionOrder::new("WO-2", product, 2);
    let machines = vec![printer("P1", Decimal::ONE, ""), printer("P2", Decimal::from(2), "")];

    let first = schedule_order(&order, &machines, SchedulerConfig::default());
    let second = schedule_order(&order, &machines, SchedulerConfig::default());

    assert_eq!(first.assignments, second.assignments);
    assert_eq!(
        serde_json::to_value(&first.assignments).unwrap(),
        serde_json::to_value(&second.assignments).unwrap()
    );
}

#[test]
fn test_duplicate_bom_component_schedules_within_ledger() {
    let bracket = ComponentSpec::new("BRK", "Bracket")
        .with_batch_size(4)
        .with_per_plate_time(Decimal::from(60));
    let product = Product::new("SHELF", "Shelf")
        .with_bom_line(bracket.clone(), 2)
        .with_bom_line(bracket, 2);
    let order = ProductionOrder::new("OP-9", product, 3);
    let machines = vec![printer("P1", Decimal::ONE, "")];

    let schedule = schedule_order(&order, &machines, SchedulerConfig::default());
    assert_eq!(schedule.assigned_quantity(), 12);

    let mut ledger = AssignmentLedger::new(&order, &machines, &[]);
    for assignment in &schedule.assignments {
        ledger
            .admit(AssignmentRecord::new(
                order.order_id.clone(),
                assignment.task.component_id.clone(),
                assignment.machine_id.clone(),
                assignment.task.quantity,
            ))
            .unwrap();
    }
    assert_eq!(ledger.assigned_for("BRK"), 12);
}
