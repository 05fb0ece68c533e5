use glyph_layout::layout::layout_text_with;
use glyph_layout::{BreakPolicy, LayoutConfig, MonospaceMetrics, VerticalAlignment};

const COLUMNS: usize = 48;
const ROWS: usize = 16;

/// Lay the text out in a box the size of a character grid and print the grid,
/// snapping every glyph to its nearest cell
fn render(text: &str, policy: BreakPolicy) {
    let config = LayoutConfig::new(COLUMNS as f32, ROWS as f32)
        .with_break_policy(policy)
        .with_vertical_alignment(VerticalAlignment::Top)
        .with_max_lines(ROWS);

    let mut grid = vec![vec![' '; COLUMNS]; ROWS];
    let size = layout_text_with(text, &config, &MonospaceMetrics(1.0), |glyph, x, y| {
        let column = (x + COLUMNS as f32 / 2.0).round();
        let row = (ROWS as f32 / 2.0 - 1.0 - y).round();
        if column >= 0.0 && row >= 0.0 && (column as usize) < COLUMNS && (row as usize) < ROWS {
            grid[row as usize][column as usize] = glyph;
        }
    })
    .expect("demo config is valid");

    println!("{policy} ({} x {}):", size.width, size.height);
    println!("+{}+", "-".repeat(COLUMNS));
    for row in grid.iter().take((size.height as usize).min(ROWS)) {
        println!("|{}|", row.iter().collect::<String>());
    }
    println!("+{}+", "-".repeat(COLUMNS));
    println!();
}

fn main() {
    let text = format!("{}\n\n{}", lipsum::lipsum(48), lipsum::lipsum(24));

    for policy in [BreakPolicy::WordWrap, BreakPolicy::Justify] {
        render(&text, policy);
    }
}
