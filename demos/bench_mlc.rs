use mlc_core::{AllModes, Algorithm, CharMode, CsrGraph, ShortestPathTree, SolverConfig};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

const MODES: [&str; 4] = ["a", "c", "cb", "bw"];

fn make_random_graph(n: usize, avg_degree: f32, seed: u64) -> (CsrGraph, Vec<&'static str>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let m_est = (n as f32 * avg_degree) as usize;
    let mut links = Vec::with_capacity(m_est);
    let mut uses = Vec::with_capacity(m_est);
    for _ in 0..m_est {
        let u = rng.gen_range(0..n); let v = rng.gen_range(0..n); if u == v { continue; }
        // integer minutes keep the engines bit-identical
        links.push((u, v, rng.gen_range(1..30) as f64));
        uses.push(MODES[rng.gen_range(0..MODES.len())]);
    }
    (CsrGraph::from_links(n, &links).expect("random graph"), uses)
}

fn time_one(alg: Algorithm, g: &CsrGraph, uses: &[&str], mode: Option<u8>, origins: &[usize]) -> (f64, u64, Vec<Vec<f64>>) {
    let cfg = SolverConfig::from_env();
    let mut tree = ShortestPathTree::with_node_count(g.node_count());
    let mut relax = 0u64; let mut labels = Vec::with_capacity(origins.len());
    let t0 = Instant::now();
    for &o in origins {
        let stats = match mode {
            Some(m) => tree.compute_with(alg, &g.view(), o, &CharMode::new(uses, m), &cfg),
            None => tree.compute_with(alg, &g.view(), o, &AllModes, &cfg),
        }.expect("origin in range");
        relax += stats.relaxations;
        labels.push(tree.label_costs().to_vec());
    }
    (t0.elapsed().as_secs_f64() * 1000.0, relax, labels)
}

fn run_one(n: usize, avg_degree: f32, seed: u64, origins: usize, mode: Option<u8>) -> serde_json::Value {
    let (g, uses) = make_random_graph(n, avg_degree, seed);
    let origins: Vec<usize> = (0..origins.min(n)).map(|i| i * n / origins.min(n).max(1)).collect();
    let (dt_deque, relax_deque, base) = time_one(Algorithm::Deque, &g, &uses, mode, &origins);
    let (dt_fifo, relax_fifo, fifo) = time_one(Algorithm::Fifo, &g, &uses, mode, &origins);
    let (dt_dij, relax_dij, dij) = time_one(Algorithm::Dijkstra, &g, &uses, mode, &origins);
    for (k, o) in origins.iter().enumerate() {
        assert_eq!(base[k], fifo[k], "fifo parity fail at origin {o}");
        assert_eq!(base[k], dij[k], "dijkstra parity fail at origin {o}");
    }
    serde_json::json!({
        "n": n, "m": g.link_count(), "avg_degree": avg_degree, "origins": origins.len(),
        "mode": mode.map(|m| (m as char).to_string()),
        "deque_ms": dt_deque, "fifo_ms": dt_fifo, "dijkstra_ms": dt_dij,
        "fifo_speedup": dt_fifo / dt_deque.max(1e-9),
        "dijkstra_speedup": dt_dij / dt_deque.max(1e-9),
        "relaxations_deque": relax_deque,
        "relaxations_fifo": relax_fifo,
        "relaxations_dijkstra": relax_dij
    })
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: bench_mlc --sizes 10000,20000 --degrees 2,4,8 --seed 42 --origins 8 --mode c --out benchmarks/mlc_sample.json"); return; }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<usize> = arg("--sizes").unwrap_or("10000,20000".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let degrees: Vec<f32> = arg("--degrees").unwrap_or("4".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let origins: usize = arg("--origins").and_then(|v| v.parse().ok()).unwrap_or(8);
    let mode = arg("--mode").and_then(|m| m.bytes().next());
    let out_path = arg("--out").unwrap_or("benchmarks/mlc_sample.json".into());
    let mut results = Vec::new();
    for &s in &sizes { for &deg in &degrees { results.push(run_one(s, deg, seed, origins, mode)); } }
    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).expect("serialize").as_bytes()).expect("write out");
    eprintln!("wrote {out_path}");
}
