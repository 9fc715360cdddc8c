//! Estimated food-allergy prevalence shown on the chart screen.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrevalenceEntry {
    pub label: &'static str,
    /// Estimated prevalence in percent.
    pub percent: f64,
    pub rgb: (u8, u8, u8),
}

pub const PREVALENCE: &[PrevalenceEntry] = &[
    PrevalenceEntry { label: "Leite", percent: 2.5, rgb: (46, 175, 125) },
    PrevalenceEntry { label: "Ovos", percent: 1.3, rgb: (243, 122, 35) },
    PrevalenceEntry { label: "Amendoim", percent: 1.2, rgb: (229, 58, 64) },
    PrevalenceEntry { label: "Soja", percent: 0.4, rgb: (142, 68, 173) },
    PrevalenceEntry { label: "Trigo", percent: 0.4, rgb: (77, 196, 161) },
    PrevalenceEntry { label: "Frutos do Mar", percent: 1.0, rgb: (255, 154, 79) },
    PrevalenceEntry { label: "Nozes/Castanhas", percent: 0.6, rgb: (237, 120, 124) },
    PrevalenceEntry { label: "Peixe", percent: 0.4, rgb: (171, 119, 193) },
];

pub const CHART_TITLE: &str = "Prevalência Estimada (%)";

/// Highlighted slice on the chart; `None` until the user moves onto one.
#[derive(Debug, Default)]
pub struct PrevalenceState {
    pub selected: Option<usize>,
}

impl PrevalenceState {
    pub fn move_selection(&mut self, delta: isize) {
        let len = PREVALENCE.len() as isize;
        let idx = match self.selected {
            Some(i) => i as isize + delta,
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected = Some(idx.clamp(0, len - 1) as usize);
    }

    pub fn select_first(&mut self) {
        self.selected = Some(0);
    }

    pub fn select_last(&mut self) {
        self.selected = PREVALENCE.len().checked_sub(1);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_entry(&self) -> Option<&'static PrevalenceEntry> {
        self.selected.and_then(|i| PREVALENCE.get(i))
    }
}

/// Chart bars take integer values; prevalence is kept to one decimal.
pub fn tenths(percent: f64) -> u64 {
    (percent * 10.0).round().max(0.0) as u64
}
