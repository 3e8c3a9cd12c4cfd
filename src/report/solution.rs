//! Text report of a checked solution.

use super::table::{format_row, Cell, COLUMN_WIDTH};
use crate::evaluation::SolutionReport;
use crate::models::TopTwInstance;

const ROUTE_HEADER: [&str; 8] = [
    "CUST NO.",
    "X COORD.",
    "Y. COORD.",
    "READY TIME",
    "DUE DATE",
    "ARRIVE TIME",
    " LEAVE TIME",
    "SERVICE TIME",
];

/// Renders a feasibility report.
///
/// The text opens with the route listing and the summary lines
/// (`FEASIBLE SOLUTION`, `SCORE`, `TIME COST`), followed by the instance
/// limits and one timing table per route. A node reached after its due time
/// shows `-` in its timing columns.
pub fn render_solution(problem: &TopTwInstance, report: &SolutionReport) -> String {
    let mut summary = String::from("\nSOLUTION: \n");
    for route in &report.routes {
        summary.push_str(&route.depot.to_string());
        for visit in &route.visits {
            summary.push_str(&format!(" - {}", visit.node));
        }
        summary.push('\n');
    }
    summary.push_str(&format!(
        "FEASIBLE SOLUTION: {}\nSCORE: {:?}\nTIME COST: {:?}\n",
        report.is_feasible(),
        report.score(),
        report.time_cost()
    ));

    let mut tables = format!(
        "\nNODES: {}\nMAX TIME PER ROUTE: {:?}\nMAX NUMBER OF ROUTES: {}\n",
        problem.poi_count(),
        problem.max_time_per_route(),
        problem.max_routes()
    );
    let header = ROUTE_HEADER.map(Cell::from);
    for route in &report.routes {
        tables.push('\n');
        tables.push_str(&format_row(
            &[Cell::Text(format!("ROUTE {}", route.route_index))],
            COLUMN_WIDTH,
        ));
        tables.push('\n');
        tables.push_str(&format_row(&header, COLUMN_WIDTH));
        tables.push('\n');

        let depot = route.depot;
        let first = [
            Cell::from(depot),
            Cell::Real(problem.x(depot)),
            Cell::Real(problem.y(depot)),
            Cell::Real(problem.ready_time(depot)),
            Cell::Real(problem.due_time(depot)),
            Cell::Int(0),
            Cell::Int(0),
            Cell::Real(problem.service_time(depot)),
        ];
        tables.push_str(&format_row(&first, COLUMN_WIDTH));
        tables.push('\n');

        for visit in &route.visits {
            let node = visit.node;
            let timing = match (visit.service_start, visit.departure) {
                (Some(start), Some(leave)) => [
                    Cell::Real(start),
                    Cell::Real(leave),
                    Cell::Real(problem.service_time(node)),
                ],
                _ => [Cell::from("-"), Cell::from("-"), Cell::from("-")],
            };
            let mut row = vec![
                Cell::from(node),
                Cell::Real(problem.x(node)),
                Cell::Real(problem.y(node)),
                Cell::Real(problem.ready_time(node)),
                Cell::Real(problem.due_time(node)),
            ];
            row.extend(timing);
            tables.push_str(&format_row(&row, COLUMN_WIDTH));
            tables.push('\n');
        }
    }

    summary + &tables
}

#[cfg(test)]
mod tests {
    use crate::models::{Poi, RouteSolution, TimeWindow, TopTwInstance};

    fn problem(max: f64) -> TopTwInstance {
        let tw = TimeWindow::new(0.0, 500.0).expect("valid");
        let pois = vec![
            Poi::new(0.0, 0.0).with_time_window(tw),
            Poi::new(3.0, 4.0).with_score(10.0).with_time_window(tw),
            Poi::new(6.0, 8.0).with_score(20.0).with_time_window(tw),
        ];
        TopTwInstance::from_pois(pois, 2).with_max_time_per_route(max)
    }

    fn info(problem: &TopTwInstance) -> String {
        let mut sol = RouteSolution::new(problem);
        sol.init_solution().expect("vehicles");
        sol.insert_after(0, 1).expect("ok");
        sol.insert_after(1, 2).expect("ok");
        sol.info_solution().expect("closed")
    }

    #[test]
    fn test_feasible_report() {
        let text = info(&problem(100.0));
        assert!(text.starts_with("\nSOLUTION: \n0 - 1 - 2 - 0\n"));
        assert!(text.contains("FEASIBLE SOLUTION: true\n"));
        assert!(text.contains("SCORE: 30.0\n"));
        assert!(text.contains("TIME COST: 20.0\n"));
        assert!(text.contains("MAX TIME PER ROUTE: 100.0\n"));
        assert!(text.contains("MAX NUMBER OF ROUTES: 2\n"));
        assert!(text.contains("        ROUTE 0\n"));
        assert!(text.contains("    ARRIVE TIME"));
    }

    #[test]
    fn test_infeasible_report() {
        let text = info(&problem(15.0));
        assert!(text.contains("FEASIBLE SOLUTION: false\n"));
        assert!(text.contains("SCORE: 30.0\n"));
    }

    #[test]
    fn test_timing_row() {
        let text = info(&problem(100.0));
        // node 2 served from 10.000 to 10.000
        let row = text
            .lines()
            .find(|l| l.trim_start().starts_with("2 "))
            .expect("row for node 2");
        assert!(row.contains("10.000"));
        assert_eq!(row.len(), 8 * 15);
    }
}
