//! Table rendering for compliance output.

use chrono::NaiveDateTime;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use insight_model::{CellState, Enrollment};
use insight_core::ComplianceSummary;
use insight_report::DailyReport;

pub fn print_enrollments(enrollments: &[Enrollment]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Start"),
        header_cell("End"),
        header_cell("Phone"),
        header_cell("Schedule"),
        header_cell("Leaderboard"),
    ]);
    apply_table_style(&mut table);
    for e in enrollments {
        table.add_row(vec![
            Cell::new(e.participant_id),
            Cell::new(e.study_start_date),
            Cell::new(e.study_end_date),
            Cell::new(&e.phone_number),
            Cell::new(e.schedule.label()),
            Cell::new(&e.lb_link),
        ]);
    }
    println!("{table}");
}

pub fn print_compliance(summary: &ComplianceSummary) {
    println!(
        "Participant {} ({}, age {}) on the {} schedule",
        summary.participant_id, summary.identity.initials, summary.age,
        summary.schedule.label()
    );

    let mut times = Table::new();
    times.set_header(vec![
        header_cell("Day"),
        header_cell("Date"),
        header_cell("S1 sent"),
        header_cell("S2 sent"),
        header_cell("S3 sent"),
        header_cell("S4 sent"),
    ]);
    apply_table_style(&mut times);
    for row in &summary.send_times {
        times.add_row(vec![
            Cell::new(row.day),
            Cell::new(row.date),
            Cell::new(fmt_time(row.slots[0])),
            Cell::new(fmt_time(row.slots[1])),
            Cell::new(fmt_time(row.slots[2])),
            Cell::new(fmt_time(row.slots[3])),
        ]);
    }
    println!("{times}");

    let mut grid = Table::new();
    grid.set_header(vec![
        header_cell("Day"),
        header_cell("Date"),
        header_cell("S1"),
        header_cell("S2"),
        header_cell("S3"),
        header_cell("S4"),
    ]);
    apply_table_style(&mut grid);
    for index in 2..6 {
        align_column(&mut grid, index, CellAlignment::Center);
    }
    for day in &summary.days {
        grid.add_row(vec![
            Cell::new(day.day),
            Cell::new(day.date),
            mark_cell(day.slots[0]),
            mark_cell(day.slots[1]),
            mark_cell(day.slots[2]),
            mark_cell(day.slots[3]),
        ]);
    }
    println!("{grid}");

    println!(
        "Compliance: {:.2}% of surveys due, {:.2}% of the full study",
        summary.rate_current, summary.rate_total
    );
    println!("{}", summary.diagnostic);
}

pub fn print_report(report: &DailyReport) {
    println!(
        "Daily report for {} (generated {})",
        report.report_date,
        report.generated_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "Recruitment: {} not yet started, {} active, {} completed",
        report.recruitment.inactive.len(),
        report.recruitment.active.len(),
        report.recruitment.past.len()
    );

    let mut times = Table::new();
    times.set_header(vec![
        header_cell("Schedule"),
        header_cell("Date"),
        header_cell("S1 sent"),
        header_cell("S2 sent"),
        header_cell("S3 sent"),
        header_cell("S4 sent"),
    ]);
    apply_table_style(&mut times);
    for grid in &report.send_times {
        for (label, slots) in [("previous", grid.previous), ("report", grid.current)] {
            times.add_row(vec![
                Cell::new(grid.schedule.label()),
                Cell::new(label),
                Cell::new(fmt_time(slots[0])),
                Cell::new(fmt_time(slots[1])),
                Cell::new(fmt_time(slots[2])),
                Cell::new(fmt_time(slots[3])),
            ]);
        }
    }
    println!("{times}");

    let mut grid = Table::new();
    grid.set_header(vec![
        header_cell("ID"),
        header_cell("Initials"),
        header_cell("Day"),
        header_cell("Prev S4"),
        header_cell("S1"),
        header_cell("S2"),
        header_cell("S3"),
        header_cell("S4"),
    ]);
    apply_table_style(&mut grid);
    for index in 3..8 {
        align_column(&mut grid, index, CellAlignment::Center);
    }
    for row in &report.compliance {
        grid.add_row(vec![
            Cell::new(row.participant_id),
            Cell::new(&row.initials),
            Cell::new(row.day_in_study),
            code_cell(row.cells[0]),
            code_cell(row.cells[1]),
            code_cell(row.cells[2]),
            code_cell(row.cells[3]),
            code_cell(row.cells[4]),
        ]);
    }
    println!("{grid}");

    print_flag_list("Two consecutive missed", &report.two_consecutive_missed);
    print_flag_list("Missed leaderboard survey", &report.missing_leaderboard);
    for note in &report.diagnostics {
        println!("{note}");
    }
}

fn print_flag_list(label: &str, participant_ids: &[u32]) {
    if participant_ids.is_empty() {
        println!("{label}: none");
    } else {
        let ids: Vec<String> = participant_ids.iter().map(u32::to_string).collect();
        println!("{label}: {}", ids.join(", "));
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn mark_cell(state: CellState) -> Cell {
    color_cell(state, state.grid_mark())
}

fn code_cell(state: CellState) -> Cell {
    color_cell(state, state.report_code())
}

fn color_cell(state: CellState, label: &str) -> Cell {
    let cell = Cell::new(label);
    match state {
        CellState::SingleCompliant | CellState::MultiCompliant => cell.fg(Color::Green),
        CellState::SingleLate | CellState::MultiLate => cell.fg(Color::Yellow),
        CellState::NoResponse => cell.fg(Color::Red),
        CellState::Blank => cell,
    }
}

fn fmt_time(time: Option<NaiveDateTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
