//! 機台與任務的標籤匹配

use farm_core::{Machine, ProductionTask};

/// 標籤匹配器
pub struct TagMatcher;

impl TagMatcher {
    /// 任務所需標籤皆存在於機台標籤中時相容（無需求標籤則永遠相容）
    pub fn compatible(machine: &Machine, task: &ProductionTask) -> bool {
        task.required_tags.is_subset(&machine.tags)
    }

    /// 依名單順序列出與任務相容的機台索引
    pub fn compatible_indices(machines: &[Machine], task: &ProductionTask) -> Vec<usize> {
        machines
            .iter()
            .enumerate()
            .filter(|(_, machine)| Self::compatible(machine, task))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// 依名單順序取出啟用的機台
    pub fn active_machines(machines: &[Machine]) -> Vec<Machine> {
        machines.iter().filter(|m| m.is_active).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_core::TagSet;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn task_requiring(tags: &str) -> ProductionTask {
        ProductionTask::new("C1", "Bracket", 1, Decimal::from(60))
            .with_required_tags(TagSet::parse(tags))
    }

    #[rstest]
    #[case("pla", "pla", true)]
    #[case("pla,petg", "pla", true)]
    #[case("pla", "abs", false)]
    #[case("pla", "pla,abs", false)]
    #[case("", "", true)]
    #[case("pla", "", true)]
    #[case("PLA", "pla", false)]
    fn test_compatible(#[case] machine_tags: &str, #[case] required: &str, #[case] expected: bool) {
        let machine = Machine::new("P1", "Printer").with_tags(TagSet::parse(machine_tags));

        assert_eq!(TagMatcher::compatible(&machine, &task_requiring(required)), expected);
    }

    #[test]
    fn test_compatible_indices_keep_roster_order() {
        let machines = vec![
            Machine::new("P1", "A").with_tags(TagSet::parse("abs")),
            Machine::new("P2", "B").with_tags(TagSet::parse("pla")),
            Machine::new("P3", "C").with_tags(TagSet::parse("pla,abs")),
        ];

        assert_eq!(TagMatcher::compatible_indices(&machines, &task_requiring("pla")), vec![1, 2]);
        assert_eq!(TagMatcher::compatible_indices(&machines, &task_requiring("")), vec![0, 1, 2]);
        assert!(TagMatcher::compatible_indices(&machines, &task_requiring("tpu")).is_empty());
    }

    #[test]
    fn test_active_machines() {
        let machines = vec![
            Machine::new("P1", "A"),
            Machine::new("P2", "B").with_active(false),
            Machine::new("P3", "C"),
        ];

        let active = TagMatcher::active_machines(&machines);
        let ids: Vec<&str> = active.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P3"]);
    }
}
