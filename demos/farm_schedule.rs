//! 列印農場排程示例
//!
//! 執行：`RUST_LOG=debug cargo run --example farm_schedule`

use printfarm::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== 列印農場排程示例 ===\n");

    // 機台名單
    let machines = vec![
        Machine::new("MK4-A", "Prusa MK4 A").with_tags(TagSet::parse("pla,petg")),
        Machine::new("MK4-B", "Prusa MK4 B").with_tags(TagSet::parse("pla,petg")),
        Machine::new("X1C", "Bambu X1C")
            .with_speed_factor(Decimal::new(15, 1))?
            .with_tags(TagSet::parse("pla,abs")),
        Machine::new("OLD", "Ender 3").with_active(false),
    ];

    // 產品 BOM
    let product = Product::new("LAMP", "Desk Lamp")
        .with_bom_line(
            ComponentSpec::new("BASE", "Base")
                .with_batch_size(2)
                .with_per_plate_time(Decimal::from(240))
                .with_setup_time(Decimal::from(15))
                .with_unit_time(Decimal::from(120))
                .with_required_tags(TagSet::parse("petg")),
            1,
        )
        .with_bom_line(
            ComponentSpec::new("ARM", "Arm")
                .with_batch_size(6)
                .with_per_plate_time(Decimal::from(180))
                .with_setup_time(Decimal::from(10))
                .with_unit_time(Decimal::from(30)),
            2,
        )
        .with_bom_line(
            ComponentSpec::new("SHADE", "Shade")
                .with_batch_size(1)
                .with_per_plate_time(Decimal::from(150))
                .with_unit_time(Decimal::from(150))
                .with_required_tags(TagSet::parse("abs")),
            1,
        );
    let order = ProductionOrder::new("OP-1001", product, 5);

    let config = SchedulerConfig::default();
    let schedule = schedule_order(&order, &machines, config.clone());

    println!("指派清單:");
    for assignment in &schedule.assignments {
        println!(
            "  - {} x{} → {} ({} - {}, {})",
            assignment.task.component_name,
            assignment.task.quantity,
            assignment.machine_name,
            Minutes(assignment.start),
            Minutes(assignment.end),
            Minutes(assignment.duration()),
        );
    }
    for task in &schedule.unassigned {
        println!("  ! 未指派: {} x{}", task.component_name, task.quantity);
    }
    println!("\n{}", schedule);

    // 將排程寫回為指派記錄，並記錄部分完成量
    let mut ledger = AssignmentLedger::new(&order, &machines, &[]);
    for assignment in &schedule.assignments {
        ledger.admit(AssignmentRecord::new(
            order.order_id.clone(),
            assignment.task.component_id.clone(),
            assignment.machine_id.clone(),
            assignment.task.quantity,
        ))?;
    }
    let records = ledger.into_records();
    let logs = vec![
        ProductionLog::new("OP-1001", "BASE", 2),
        ProductionLog::new("OP-1001", "ARM", 6),
    ];

    let snapshot = CapacityEstimator::new(config).estimate(&order, &logs, &records, &machines)?;

    println!("\n剩餘時間:");
    for status in &snapshot.components {
        println!(
            "  - {}: 需求 {}, 完成 {}, 指派 {}, 產能 {}, 剩餘 {}",
            status.component_name,
            status.required_qty,
            status.completed_qty,
            status.assigned_qty,
            status.capacity,
            status.remaining_time
        );
    }
    println!("訂單剩餘: {}", Minutes(snapshot.total_remaining_min));

    let progress = ProgressCalculator::calculate(&order, &logs);
    println!("訂單進度: {:.1}%", progress.progress_percent);

    println!("\n{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
