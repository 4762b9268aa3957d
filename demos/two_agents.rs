use grid_reservation::{plan_all, AgentSpec, Grid};

// Two agents cross a 6x8 grid with shape
//  ________
// |A.....a.|
// |..###...|
// |..#.....|
// |..#.##..|
// |......#.|
// |B......b|
//  ________
// where
// - # marks an obstacle
// - A and B mark the starts, a and b the goals
//
// Nodes have a 4-neighborhood. A is planned first, so B may not use any cell on A's path.

fn main() {
    let grid: Grid = "
        ........
        ..###...
        ..#.....
        ..#.##..
        ......#.
        ........
    "
    .parse()
    .unwrap();
    println!("{}", grid);
    let agents = [
        AgentSpec::new("A", (0, 0), (0, 6)),
        AgentSpec::new("B", (5, 0), (5, 7)),
    ];
    let outcome = plan_all(&grid, &agents).unwrap();
    for (id, plan) in outcome.iter() {
        println!(
            "Agent {}: {} moves, {} cells visited",
            id,
            plan.moves(),
            plan.visited.len()
        );
    }
    println!("\n{}\n", outcome.render(&grid));
    for step in 0..outcome.makespan() {
        let positions = outcome
            .positions_at(step)
            .into_iter()
            .map(|(id, cell)| format!("{id} at {cell}"))
            .collect::<Vec<_>>();
        println!("Step {}: {}", step, positions.join(", "));
    }
}
