//! Lightweight transform benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p lua_toolkit_core --example transform_benchmark --release`
//!
//! Pass a Lua file path to benchmark it instead of the generated module.

use std::fs;
use std::time::{Duration, Instant};

use lua_toolkit_core::{OneLinerMode, beautify, delete_all_comments, protect, to_one_liner};

const UNIT: &str = r#"-- Accumulate a running total.
local function add_{n}(acc, v)
  --[[ values may be nil ]]
  if v then acc = acc + v end
  local label = "total -- {n}"
  return acc, [==[
multi ]] line
]==]
end
"#;

fn generated_module(units: usize) -> String {
    (0..units)
        .map(|n| UNIT.replace("{n}", &n.to_string()))
        .collect()
}

fn time(iterations: usize, mut f: impl FnMut()) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    start.elapsed()
}

fn report(name: &str, elapsed: Duration, iterations: usize) {
    println!(
        "  {name:<10} total={:?}, per_iter={:.3} ms",
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / iterations as f64
    );
}

fn run_benchmark(label: &str, input: &str, iterations: usize) {
    println!("Benchmark: {label}");
    println!("  input_bytes: {}", input.len());
    report("protect", time(iterations, || drop(protect(input))), iterations);
    report(
        "strip",
        time(iterations, || drop(delete_all_comments(input))),
        iterations,
    );
    report(
        "one-liner",
        time(iterations, || drop(to_one_liner(input, OneLinerMode::Preserve))),
        iterations,
    );
    report("beautify", time(iterations, || drop(beautify(input))), iterations);
}

fn main() -> Result<(), String> {
    let iterations = std::env::var("LUA_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(200);

    match std::env::args().nth(1) {
        Some(path) => {
            let input = fs::read_to_string(&path)
                .map_err(|e| format!("failed to read sample '{path}': {e}"))?;
            run_benchmark(&path, &input, iterations);
        }
        None => {
            for units in [10, 100] {
                run_benchmark(&format!("generated x{units}"), &generated_module(units), iterations);
            }
        }
    }

    Ok(())
}
