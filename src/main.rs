//! Benchmark driver: times every (size, threads, schedule) combination and
//! prints a table of elapsed seconds and speedup ratios.
//!
//! Usage: `yunque [size...]` - matrix dimensions default to 100 and 200.

use std::env;

use yunque::{BenchRecord, MatrixEngine, Schedule};

const THREAD_COUNTS: [usize; 3] = [2, 4, 8];

fn rule(c: char) -> String {
    c.to_string().repeat(72)
}

fn run(sizes: &[usize]) -> Result<(), Box<dyn std::error::Error>> {
    for &size in sizes {
        println!("{}", rule('='));
        println!("  MATRIX MULTIPLICATION: A[{size}x{size}] * B[{size}x{size}]");
        println!("{}", rule('='));

        let mut engine = MatrixEngine::new(size)?;
        engine.initialize();

        let linear_secs = engine.multiply_sequential();
        let single_secs = engine.multiply_parallel(1, Schedule::Static)?;
        println!("  sequential baseline:      {linear_secs:.6}s");
        println!("  1-thread parallel:        {single_secs:.6}s");
        println!("{}", rule('-'));
        println!(
            "  {:<10} {:>7} {:>13} {:>13} {:>13}",
            "schedule", "threads", "elapsed", "vs linear", "vs 1 thread"
        );

        for threads in THREAD_COUNTS {
            for schedule in Schedule::ALL {
                let elapsed = engine.multiply_parallel(threads, schedule)?;
                let record =
                    BenchRecord::new(size, threads, schedule, elapsed, linear_secs, single_secs);
                println!("  {record}");
            }
            println!("{}", rule('-'));
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let sizes = if args.is_empty() {
        vec![100, 200]
    } else {
        args.iter()
            .map(|arg| arg.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()?
    };

    run(&sizes)
}
