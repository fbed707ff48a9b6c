//! Plain-text rendering of cards and columns.

use super::BoardState;
use crate::task::domain::Task;

/// `chrono` format used for card timestamps.
pub const CARD_TIME_FORMAT: &str = "%m/%d %H:%M";

/// Renders one task card: status label, id, creation time, description.
#[must_use]
pub fn render_card(task: &Task) -> String {
    format!(
        "[{}] #{} {} {}",
        task.status().label(),
        task.id(),
        task.created_at().format(CARD_TIME_FORMAT),
        task.description(),
    )
}

/// Renders every column with its task count, in board order.
#[must_use]
pub fn render_board(state: &BoardState) -> String {
    let mut rendered = String::new();
    for (status, tasks) in state.columns() {
        rendered.push_str(&format!("{} ({})\n", status.label(), tasks.len()));
        if tasks.is_empty() {
            rendered.push_str("  -\n");
        }
        for task in tasks {
            rendered.push_str(&format!("  {}\n", render_card(task)));
        }
    }
    rendered
}
