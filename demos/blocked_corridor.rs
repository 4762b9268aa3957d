use grid_reservation::{plan_all, AgentSpec, Grid, PlanningError};

// A corridor with a single crossing:
//  ___
// |#B#|
// |A.a|
// |#b#|
//  ___
// A is planned first and claims the crossing, so the request fails on B.
// Swapping the order fails on A instead: no agent is ever re-planned.

fn main() {
    let grid: Grid = "#.#\n...\n#.#".parse().unwrap();
    let a = AgentSpec::new("A", (1, 0), (1, 2));
    let b = AgentSpec::new("B", (0, 1), (2, 1));
    for agents in [[a.clone(), b.clone()], [b, a]] {
        let order = agents
            .iter()
            .map(|a| a.id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match plan_all(&grid, &agents) {
            Ok(outcome) => println!("[{order}] planned:\n{}", outcome.render(&grid)),
            Err(PlanningError::NoPathFound { agent }) => {
                println!("[{order}] no path found for agent {agent}")
            }
            Err(e) => println!("[{order}] {e}"),
        }
    }
}
