use std::process::ExitCode;

use lpm_metrics::format::elapsed_time;
use lpm_metrics::{Config, System};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(proc_root = %config.paths.proc_root.display(), "reading metrics");

    let system = System::new(config);

    println!("OS:        {}", system.operating_system());
    println!("Kernel:    {}", system.kernel());
    println!("CPU:       {:5.1}%", system.cpu().utilization() * 100.0);
    println!("Memory:    {:5.1}%", system.memory_utilization() * 100.0);
    println!("Processes: {} total, {} running", system.total_processes(), system.running_processes());
    println!("Up time:   {}", elapsed_time(system.uptime()));
    println!();
    println!("{:>7}  {:<12} {:>6} {:>8} {:>10}  COMMAND", "PID", "USER", "CPU%", "RAM[MB]", "TIME+");

    for process in system.processes() {
        let p = process.snapshot();
        println!(
            "{:>7}  {:<12} {:>6.2} {:>8} {:>10}  {}",
            p.pid,
            p.user,
            p.cpu_utilization * 100.0,
            p.ram,
            p.uptime_hms(),
            p.command_line()
        );
    }

    ExitCode::SUCCESS
}
