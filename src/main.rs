use anyhow::Context;
use clap::Parser;
use cpusched::{
    Algorithm, Process, ProcessSet,
    core::Ticks,
    sim::{Priority, WorkloadConfig, bernoulli_processes},
};
use log::info;

/// Simulate a CPU scheduling policy over a set of processes.
#[derive(Debug, Parser)]
#[command(name = "cpusched", version)]
struct Args {
    /// fcfs, sjf, srtf, priority, priority-preemptive or rr
    #[arg(short, long, default_value = "fcfs")]
    algorithm: String,

    /// Time quantum in ticks (round-robin only)
    #[arg(short, long)]
    quantum: Option<Ticks>,

    /// PID:ARRIVAL:BURST[:PRIORITY]; repeat for each process. When absent a
    /// synthetic workload is generated.
    #[arg(short, long = "process", value_name = "SPEC")]
    processes: Vec<Process>,

    /// Generator horizon; one arrival chance per tick
    #[arg(long, default_value_t = 100)]
    ticks: Ticks,

    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2)]
    short_burst: Ticks,

    #[arg(long, default_value_t = 6)]
    long_burst: Ticks,

    /// Generated priorities are drawn from 0..=MAX_PRIORITY
    #[arg(long, default_value_t = 4)]
    max_priority: Priority,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let algorithm =
        Algorithm::parse(&args.algorithm, args.quantum).context("invalid algorithm selection")?;

    let processes: ProcessSet = if args.processes.is_empty() {
        let config = WorkloadConfig {
            ticks: args.ticks,
            p_arrival: args.p_arrival,
            p_short: args.p_short,
            short_burst: args.short_burst,
            long_burst: args.long_burst,
            priorities: 0..=args.max_priority.max(0),
            seed: args.seed,
        };
        info!("generating workload: {config:?}");
        bernoulli_processes(&config)
    } else {
        args.processes.into_iter().collect()
    };

    let schedule = cpusched::schedule(&processes, algorithm)
        .with_context(|| format!("failed to schedule {} processes", processes.len()))?;

    println!("{algorithm}");
    for segment in schedule.segments() {
        println!(
            "P{} t={}..{} ({} ticks)",
            segment.pid,
            segment.start,
            segment.end(),
            segment.duration
        );
    }

    let metrics = schedule.metrics();
    println!("Average turnaround time: {:.2} ticks", metrics.average_turnaround);
    println!("Average waiting time: {:.2} ticks", metrics.average_waiting);
    println!("Average response time: {:.2} ticks", metrics.average_response);
    println!("Makespan: t={}", metrics.makespan);
    println!("CPU utilization: {:.1}%", metrics.utilization * 100.0);
    println!("Preemptions: {}", metrics.preemptions);

    Ok(())
}
