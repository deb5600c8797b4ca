use super::ClassroomPairs;
use crate::domain::weekday_name;

/// Renders one Markdown table per classroom, day-by-day.
pub fn render_markdown(result: &[ClassroomPairs]) -> String {
    let mut lines = vec!["# Schedule".to_string(), String::new()];

    if result.is_empty() {
        lines.push("_No classes scheduled._".to_string());
        return lines.join("\n");
    }

    for room in result {
        lines.push(format!("## {}\n", room.classroom));
        lines.push("| Weekday | Time | Course | Teacher | Groups |".to_string());
        lines.push("|---------|------|--------|---------|--------|".to_string());
        for pair in &room.pairs {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                weekday_name(pair.weekday),
                pair.time,
                pair.course,
                pair.teacher,
                pair.groups.join(", ")
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
