use criterion::{criterion_group, criterion_main, Criterion};
use grid_reservation::{AgentSpec, Cell, ClaimedSet, Grid, Planner, PlannerConfig, TieBreak};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::hint::black_box;

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n, n, false);
    for cell in grid.cells().collect::<Vec<_>>() {
        grid.set(cell, rng.gen_bool(0.25)).unwrap();
    }
    grid.update();
    grid
}

fn random_agents(grid: &Grid, n_agents: usize, rng: &mut StdRng) -> Vec<AgentSpec> {
    let mut free = grid.free_cells().collect::<Vec<Cell>>();
    free.shuffle(rng);
    free.chunks_exact(2)
        .take(n_agents)
        .enumerate()
        .map(|(i, pair)| AgentSpec::new(format!("agent{i}"), pair[0], pair[1]))
        .collect()
}

fn single_agent_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [32, 128] {
        let grid = random_grid(n, &mut rng);
        let scenarios = random_agents(&grid, 50, &mut rng);
        for tie_break in [TieBreak::FewestMoves, TieBreak::MostMoves] {
            let planner = Planner::with_config(PlannerConfig {
                tie_break,
                prune_unreachable: true,
            });
            let claimed = ClaimedSet::new();
            c.bench_function(format!("search {n}x{n}, {tie_break:?}").as_str(), |b| {
                b.iter(|| {
                    for agent in &scenarios {
                        let _ = black_box(planner.search(&grid, agent.start, agent.goal, &claimed));
                    }
                })
            });
        }
    }
}

fn multi_agent_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let grid = random_grid(64, &mut rng);
    let planner = Planner::new();
    for n_agents in [2, 8, 32] {
        let agents = random_agents(&grid, n_agents, &mut rng);
        c.bench_function(format!("plan_all 64x64, {n_agents} agents").as_str(), |b| {
            b.iter(|| black_box(planner.plan_all(&grid, &agents)))
        });
    }
}

criterion_group!(benches, single_agent_bench, multi_agent_bench);
criterion_main!(benches);
