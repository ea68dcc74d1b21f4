//! Simulation statistics collection and reporting.
//!
//! This module tracks the work done by a simulator. It provides:
//! 1. **Summary:** Simulated cycles, host time, and simulation rate.
//! 2. **Graph:** Node evaluations and register commits, per cycle and in total.

use std::time::Instant;

/// Counters describing a simulation run.
#[derive(Debug, Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Cycles simulated since creation or the last reset.
    pub cycles: u64,
    /// Combinational node evaluations.
    pub node_evaluations: u64,
    /// Register values committed at cycle boundaries.
    pub register_commits: u64,
    /// Input values applied at the start of cycles.
    pub input_updates: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            node_evaluations: 0,
            register_commits: 0,
            input_updates: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"` and `"graph"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "graph"];

impl SimStats {
    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an
    /// empty slice prints everything.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("CIRCUIT SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!("----------------------------------------------------------");
        }
        if want("graph") {
            println!("GRAPH ACTIVITY");
            println!(
                "  nodes.evaluated        {} ({:.1}/cycle)",
                self.node_evaluations,
                self.node_evaluations as f64 / cyc as f64
            );
            println!(
                "  registers.committed    {} ({:.1}/cycle)",
                self.register_commits,
                self.register_commits as f64 / cyc as f64
            );
            println!("  inputs.applied         {}", self.input_updates);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
