use super::ClassroomPairs;
use crate::domain::weekday_name;
use colored::Colorize;

/// Renders a compact per-classroom listing for terminal viewing.
pub fn render_text(result: &[ClassroomPairs]) -> String {
    let mut lines = Vec::new();
    lines.push("═".repeat(60));
    lines.push("               SCHEDULE".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    for room in result {
        lines.push(format!("{}", room.classroom.bold()));
        lines.push("─".repeat(40));
        for pair in &room.pairs {
            lines.push(format!(
                "  {} {:>2} | {} | {} | {}",
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

/// Prints a one-screen summary of the best genome's score to stdout.
pub fn print_summary(best_score: f64, generations_run: usize, classrooms: usize) {
    println!();
    if best_score == 0.0 {
        println!("{}", "✓ Conflict-free schedule found".green().bold());
    } else {
        println!(
            "{}",
            format!("Best score: {best_score:.2} (lower is better)").yellow()
        );
    }
    println!("  Generations run: {generations_run}");
    println!("  Classrooms used: {classrooms}");
    println!("  Generated at: {}", chrono::Local::now().to_rfc3339());
    println!();
}
