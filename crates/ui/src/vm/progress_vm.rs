use tutor_core::model::ProgressSnapshot;

/// Display strings of the progress widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub trophy_label: String,
    pub percentage_label: String,
    pub status_label: &'static str,
    pub current_section_label: Option<String>,
    /// Inline style of the bar fill. Capped at full width.
    pub bar_style: String,
}

#[must_use]
pub fn map_progress(snapshot: &ProgressSnapshot) -> ProgressVm {
    let percentage = snapshot.progress_percentage;
    ProgressVm {
        trophy_label: format!("{}/{}", snapshot.completed_count, snapshot.total_items),
        percentage_label: format!("{percentage}% complete"),
        status_label: if snapshot.is_mastered() {
            "Mastered"
        } else {
            "In progress"
        },
        current_section_label: snapshot
            .current_section
            .as_ref()
            .map(|section| format!("Current: {section}")),
        bar_style: format!("width: {}%", percentage.min(100)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(completed: u32, total: u32, section: Option<&str>) -> ProgressSnapshot {
        ProgressSnapshot {
            completed_count: completed,
            total_items: total,
            progress_percentage: tutor_core::model::percentage(completed, total),
            current_section: section.map(str::to_string),
        }
    }

    #[test]
    fn maps_partial_progress() {
        let vm = map_progress(&snapshot(3, 30, Some("Models")));
        assert_eq!(vm.trophy_label, "3/30");
        assert_eq!(vm.percentage_label, "10% complete");
        assert_eq!(vm.status_label, "In progress");
        assert_eq!(vm.current_section_label.as_deref(), Some("Current: Models"));
        assert_eq!(vm.bar_style, "width: 10%");
    }

    #[test]
    fn full_progress_is_mastered() {
        let vm = map_progress(&snapshot(30, 30, None));
        assert_eq!(vm.status_label, "Mastered");
        assert_eq!(vm.current_section_label, None);
    }

    #[test]
    fn overflow_keeps_label_but_caps_bar() {
        let vm = map_progress(&snapshot(33, 30, None));
        assert_eq!(vm.percentage_label, "110% complete");
        assert_eq!(vm.bar_style, "width: 100%");
    }
}
