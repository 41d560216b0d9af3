//! Text rendering for command output.
//!
//! Everything here returns a `String` so the binary only has to print it.
//! Each renderer collects its lines and joins them with [`lines`].

use rust_decimal::Decimal;

use crate::config::DisplayConfig;
use crate::dashboard::DashboardSummary;
use crate::model::{total_cost, Intervention, Vehicle};
use crate::report::{Period, SpendingReport};

const BAR: char = '█';

/// Format an amount with the configured currency.
#[must_use]
pub fn amount(value: Decimal, display: &DisplayConfig) -> String {
    format!("{} {}", value.round_dp(2).normalize(), display.currency)
}

/// Format a date with the configured pattern.
#[must_use]
pub fn date(value: chrono::NaiveDate, display: &DisplayConfig) -> String {
    value.format(&display.date_format).to_string()
}

/// Join lines, each terminated by a newline.
#[must_use]
pub fn lines(items: impl IntoIterator<Item = String>) -> String {
    items.into_iter().fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}

fn status(vehicle: &Vehicle) -> &'static str {
    if vehicle.operational {
        "in service"
    } else {
        "out of service"
    }
}

/// Left-aligned table with a header row and a rule under it.
#[must_use]
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(ToString::to_string).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines(
        [&header, &rule]
            .into_iter()
            .chain(rows)
            .map(|cells| table_row(cells, &widths)),
    )
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// One line per vehicle.
#[must_use]
pub fn vehicle_lines(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return "No vehicles registered.\n".to_string();
    }
    lines(vehicles.iter().map(|v| {
        format!(
            "{}  {} ({}, {}) [{}]",
            v.id,
            v.name,
            v.vehicle_type,
            v.registration_number,
            status(v)
        )
    }))
}

/// Vehicles as a table.
#[must_use]
pub fn vehicle_table(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return "No vehicles registered.\n".to_string();
    }
    let rows: Vec<Vec<String>> = vehicles
        .iter()
        .map(|v| {
            vec![
                v.id.clone(),
                v.name.clone(),
                v.vehicle_type.clone(),
                v.registration_number.clone(),
                status(v).to_string(),
            ]
        })
        .collect();
    table(&["ID", "NAME", "TYPE", "REGISTRATION", "STATUS"], &rows)
}

/// One line per intervention.
#[must_use]
pub fn intervention_lines<'a>(
    interventions: impl IntoIterator<Item = &'a Intervention>,
    display: &DisplayConfig,
) -> String {
    let out = lines(interventions.into_iter().map(|i| {
        let line = format!(
            "{}  {}  {}  {}  {}",
            i.id,
            date(i.date, display),
            i.vehicle_name,
            i.description,
            amount(i.cost, display)
        );
        match &i.technician {
            Some(technician) => format!("{line}  ({technician})"),
            None => line,
        }
    }));
    if out.is_empty() {
        return "No interventions recorded.\n".to_string();
    }
    out
}

/// Interventions as a table.
#[must_use]
pub fn intervention_table<'a>(
    interventions: impl IntoIterator<Item = &'a Intervention>,
    display: &DisplayConfig,
) -> String {
    let rows: Vec<Vec<String>> = interventions
        .into_iter()
        .map(|i| {
            vec![
                i.id.clone(),
                date(i.date, display),
                i.vehicle_name.clone(),
                i.technician.clone().unwrap_or_default(),
                i.description.clone(),
                amount(i.cost, display),
            ]
        })
        .collect();
    if rows.is_empty() {
        return "No interventions recorded.\n".to_string();
    }
    table(
        &["ID", "DATE", "VEHICLE", "TECHNICIAN", "DESCRIPTION", "COST"],
        &rows,
    )
}

/// Details of one vehicle with its interventions and their total.
#[must_use]
pub fn vehicle_details(
    vehicle: &Vehicle,
    interventions: &[&Intervention],
    display: &DisplayConfig,
) -> String {
    let total = total_cost(interventions.iter().map(|i| i.cost));
    let mut out = lines([
        vehicle.name.clone(),
        format!("  ID:            {}", vehicle.id),
        format!("  Type:          {}", vehicle.vehicle_type),
        format!("  Registration:  {}", vehicle.registration_number),
        format!("  Status:        {}", status(vehicle)),
        format!(
            "  Maintenance:   {} over {} intervention(s)",
            amount(total, display),
            interventions.len()
        ),
    ]);
    if !interventions.is_empty() {
        out.push('\n');
        out.push_str(&intervention_table(interventions.iter().copied(), display));
    }
    out
}

fn period_label(report: &SpendingReport, display: &DisplayConfig) -> String {
    let window = match report.period {
        Period::All => return "all time".to_string(),
        Period::Month => "last month",
        Period::Quarter => "last quarter",
        Period::Year => "last year",
    };
    match report.since {
        Some(since) => format!("{window}, since {}", date(since, display)),
        None => window.to_string(),
    }
}

/// Report heading, total, and a bar per vehicle.
#[must_use]
pub fn report_chart(report: &SpendingReport, display: &DisplayConfig) -> String {
    let mut out = vec![format!(
        "Spending report ({})",
        period_label(report, display)
    )];
    if let Some(vehicle_id) = &report.vehicle_id {
        out.push(format!("Vehicle: {vehicle_id}"));
    }
    if report.is_empty() {
        out.push("No data available.".to_string());
        return lines(out);
    }

    out.push(format!(
        "Total: {} over {} intervention(s)",
        amount(report.total, display),
        report.count
    ));
    out.push(String::new());

    let name_width = report
        .by_vehicle
        .iter()
        .map(|g| g.vehicle_name.chars().count())
        .max()
        .unwrap_or(0);
    let chart_width = display.chart_width;
    for (group, len) in report.by_vehicle.iter().zip(report.bar_lengths(chart_width)) {
        let bar = BAR.to_string().repeat(len);
        out.push(format!(
            "{:<name_width$}  {bar:<chart_width$}  {}",
            group.vehicle_name,
            amount(group.amount, display)
        ));
    }
    lines(out)
}

/// Report as a table with each vehicle's share of the total.
#[must_use]
pub fn report_table(report: &SpendingReport, display: &DisplayConfig) -> String {
    if report.is_empty() {
        return "No data available.\n".to_string();
    }
    let mut rows: Vec<Vec<String>> = report
        .by_vehicle
        .iter()
        .map(|g| {
            let share = if report.total.is_zero() {
                Decimal::ZERO
            } else {
                (g.amount / report.total * Decimal::ONE_HUNDRED).round_dp(1)
            };
            vec![
                g.vehicle_name.clone(),
                amount(g.amount, display),
                format!("{}%", share.normalize()),
            ]
        })
        .collect();
    rows.push(vec![
        "TOTAL".to_string(),
        amount(report.total, display),
        "100%".to_string(),
    ]);
    table(&["VEHICLE", "AMOUNT", "SHARE"], &rows)
}

/// Dashboard summary.
#[must_use]
pub fn dashboard(summary: &DashboardSummary, display: &DisplayConfig) -> String {
    let mut out = vec![
        "Fleet dashboard".to_string(),
        "===============".to_string(),
        format!("Vehicles:        {}", summary.total_vehicles),
        format!(
            "  Operational:   {} ({}%)",
            summary.operational, summary.operational_percent
        ),
        format!("  Out of service: {}", summary.non_operational),
        format!(
            "Total spend:     {} ({} intervention(s))",
            amount(summary.total_spend, display),
            summary.intervention_count
        ),
        String::new(),
        "Recent interventions:".to_string(),
    ];
    if summary.recent.is_empty() {
        out.push("  none".to_string());
    }
    out.extend(summary.recent.iter().map(|i| {
        format!(
            "  {}  {}  {}  {}",
            date(i.date, display),
            i.vehicle_name,
            i.description,
            amount(i.cost, display)
        )
    }));
    lines(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportFilter;
    use chrono::NaiveDate;

    fn display() -> DisplayConfig {
        DisplayConfig::default()
    }

    fn vehicle(id: &str, name: &str, operational: bool) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            name: name.to_string(),
            vehicle_type: "Truck".to_string(),
            registration_number: format!("R-{id}"),
            operational,
        }
    }

    fn intervention(id: &str, name: &str, cost: i64) -> Intervention {
        Intervention {
            id: id.to_string(),
            vehicle_id: "1".to_string(),
            vehicle_name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            technician: Some("Awa".to_string()),
            description: "Brakes".to_string(),
            cost: Decimal::from(cost),
        }
    }

    #[test]
    fn test_amount_uses_currency() {
        assert_eq!(amount(Decimal::new(12_500, 2), &display()), "125 FCFA");
        assert_eq!(amount(Decimal::new(4_550, 2), &display()), "45.5 FCFA");
    }

    #[test]
    fn test_date_uses_format() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(date(d, &display()), "05 Jun 2024");

        let mut iso = display();
        iso.date_format = "%Y-%m-%d".to_string();
        assert_eq!(date(d, &iso), "2024-06-05");
    }

    #[test]
    fn test_lines_terminates_each_line() {
        assert_eq!(lines(Vec::<String>::new()), "");
        assert_eq!(
            lines(["a".to_string(), String::new(), "b".to_string()]),
            "a\n\nb\n"
        );
    }

    #[test]
    fn test_huge_amounts_render() {
        let mut a = intervention("a", "A", 0);
        a.cost = Decimal::MAX;
        let b = a.clone();
        let v = vehicle("1", "A", true);

        let details = vehicle_details(&v, &[&a, &b], &display());
        assert!(details.contains("over 2 intervention(s)"));

        let interventions = [a, b];
        let report = SpendingReport::build(
            &interventions,
            &ReportFilter::default(),
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        );
        assert!(report_table(&report, &display()).contains("100%"));
        assert!(report_chart(&report, &display()).contains("Total:"));
    }

    #[test]
    fn test_table_aligns_columns() {
        let out = table(
            &["A", "B"],
            &[vec!["long cell".to_string(), "x".to_string()]],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "A          B");
        assert_eq!(lines[1], "---------  -");
        assert_eq!(lines[2], "long cell  x");
    }

    #[test]
    fn test_vehicle_lines() {
        let out = vehicle_lines(&[vehicle("1", "Truck 1", false)]);
        assert_eq!(out, "1  Truck 1 (Truck, R-1) [out of service]\n");
        assert_eq!(vehicle_lines(&[]), "No vehicles registered.\n");
    }

    #[test]
    fn test_intervention_lines_include_technician() {
        let interventions = [intervention("9", "Truck 1", 30)];
        let out = intervention_lines(&interventions, &display());
        assert!(out.contains("05 Jun 2024"));
        assert!(out.contains("30 FCFA"));
        assert!(out.contains("(Awa)"));
    }

    #[test]
    fn test_vehicle_details_total() {
        let v = vehicle("1", "Truck 1", true);
        let a = intervention("a", "Truck 1", 30);
        let b = intervention("b", "Truck 1", 20);
        let out = vehicle_details(&v, &[&a, &b], &display());
        assert!(out.contains("50 FCFA over 2 intervention(s)"));
        assert!(out.contains("in service"));
    }

    #[test]
    fn test_report_chart_empty() {
        let report = SpendingReport::build(
            &[],
            &ReportFilter::default(),
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        );
        let out = report_chart(&report, &display());
        assert!(out.contains("all time"));
        assert!(out.contains("No data available."));
    }

    #[test]
    fn test_report_chart_bars() {
        let interventions = [intervention("a", "A", 100), intervention("b", "B", 50)];
        let report = SpendingReport::build(
            &interventions,
            &ReportFilter::default(),
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        );
        let mut narrow = display();
        narrow.chart_width = 4;

        let out = report_chart(&report, &narrow);
        assert!(out.contains("Total: 150 FCFA over 2 intervention(s)"));
        assert!(out.contains("A  ████  100 FCFA"));
        assert!(out.contains("B  ██    50 FCFA"));
    }

    #[test]
    fn test_report_table_shares() {
        let interventions = [intervention("a", "A", 75), intervention("b", "B", 25)];
        let report = SpendingReport::build(
            &interventions,
            &ReportFilter::default(),
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        );
        let out = report_table(&report, &display());
        assert!(out.contains("75%"));
        assert!(out.contains("25%"));
        assert!(out.contains("TOTAL"));
    }

    #[test]
    fn test_dashboard_text() {
        let vehicles = [vehicle("1", "A", true), vehicle("2", "B", false)];
        let interventions = [intervention("x", "A", 100)];
        let summary = DashboardSummary::compute(&vehicles, &interventions, 3);

        let out = dashboard(&summary, &display());
        assert!(out.contains("Vehicles:        2"));
        assert!(out.contains("Operational:   1 (50%)"));
        assert!(out.contains("100 FCFA"));
    }

    #[test]
    fn test_dashboard_text_without_interventions() {
        let summary = DashboardSummary::compute(&[], &[], 3);
        let out = dashboard(&summary, &display());
        assert!(out.contains("(0%)"));
        assert!(out.contains("  none"));
    }
}
