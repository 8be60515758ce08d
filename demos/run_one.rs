use mlc_core::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 { eprintln!("usage: run_one <n> <density> <seed> <algorithm: deque|fifo|dijkstra> [first_thru_node]"); std::process::exit(1); }
    let n: usize = args[1].parse().expect("n");
    let density: f32 = args[2].parse().expect("density");
    let seed: u64 = args[3].parse().expect("seed");
    let algorithm: Algorithm = match args[4].parse() { Ok(a) => a, Err(e) => { eprintln!("{e}"); std::process::exit(1); } };
    let first_thru: i64 = args.get(5).and_then(|v| v.parse().ok()).unwrap_or(0);

    let mut rng = SmallRng::seed_from_u64(seed);
    let deg = density.max(1.0) as usize;
    let mut links = Vec::with_capacity(n * deg);
    for u in 0..n {
        for _ in 0..deg {
            let v = rng.gen_range(0..n);
            let w: f64 = rng.gen_range(1.0..4.0);
            links.push((u, v, w));
        }
    }
    let graph = CsrGraph::from_links(n, &links).expect("random graph");
    let config = SolverConfig::from_env().with_through(ThroughNodes::from_first_thru(first_thru));
    let mut tree = ShortestPathTree::with_node_count(n);
    let t0 = std::time::Instant::now();
    let stats = match tree.compute_with(algorithm, &graph.view(), 0, &AllModes, &config) {
        Ok(s) => s,
        Err(e) => { eprintln!("error {e}"); return; }
    };
    let ms = t0.elapsed().as_secs_f64() * 1000.0;
    println!(
        "algorithm={algorithm:?} n={n} m={} ms={ms:.3} scans={} relax={} front={} back={} mode_skips={} centroid_skips={} reached={}",
        graph.link_count(), stats.scans, stats.relaxations, stats.front_pushes, stats.back_pushes,
        stats.mode_skips, stats.centroid_skips, stats.reached
    );
    println!("{}", tree.describe(n - 1, PathKind::Node));
}
