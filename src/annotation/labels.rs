use crate::domain::traits::LabelTable;
use crate::domain::LabelRow;

/// In-process label table: appends a blank row at the pause position.
#[derive(Debug, Default, Clone)]
pub struct LabelTrack {
    rows_added: usize,
}

impl LabelTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows this table has appended during the session.
    pub fn rows_added(&self) -> usize {
        self.rows_added
    }
}

impl LabelTable for LabelTrack {
    fn add_row(&mut self, current_labels: &[LabelRow], current_time: f64) -> Vec<LabelRow> {
        let mut rows = current_labels.to_vec();
        rows.push(LabelRow::at(current_time));
        self.rows_added += 1;
        rows
    }
}
