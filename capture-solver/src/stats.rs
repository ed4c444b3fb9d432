//! Run-level statistics for the deal loop.

use std::time::{Duration, Instant};

use capture_core::SearchStats;

/// Resident set size of this process in bytes, if the platform exposes it.
#[cfg(target_os = "macos")]
pub fn get_memory_usage() -> Option<u64> {
    use std::mem::MaybeUninit;

    extern "C" {
        fn mach_task_self() -> u32;
        fn task_info(
            target_task: u32,
            flavor: i32,
            task_info_out: *mut libc::c_void,
            task_info_out_cnt: *mut u32,
        ) -> i32;
    }

    #[repr(C)]
    struct TaskBasicInfo {
        suspend_count: i32,
        virtual_size: u64,
        resident_size: u64,
        user_time: (i32, i32),
        system_time: (i32, i32),
        policy: i32,
    }

    const TASK_BASIC_INFO_64: i32 = 5;
    const TASK_BASIC_INFO_64_COUNT: u32 = 10;

    let mut info = MaybeUninit::<TaskBasicInfo>::uninit();
    let mut count = TASK_BASIC_INFO_64_COUNT;
    // SAFETY: task_info writes at most `count` words into `info`.
    let result = unsafe {
        task_info(
            mach_task_self(),
            TASK_BASIC_INFO_64,
            info.as_mut_ptr() as *mut libc::c_void,
            &mut count,
        )
    };
    if result == 0 {
        // SAFETY: initialised by the successful call above.
        Some(unsafe { info.assume_init() }.resident_size)
    } else {
        None
    }
}

#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Totals across every deal dealt so far.
#[derive(Debug)]
pub struct RunStats {
    pub deals: u64,
    pub solved: u64,
    pub unsolved: u64,

    /// Deals where the pruned and full searches disagreed
    pub mismatches: u64,

    /// Search counters merged over all deals
    pub search: SearchStats,

    start_time: Instant,
    last_log_time: Instant,
    last_log_deals: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            deals: 0,
            solved: 0,
            unsolved: 0,
            mismatches: 0,
            search: SearchStats::default(),
            start_time: now,
            last_log_time: now,
            last_log_deals: 0,
        }
    }

    /// Count one finished deal and fold in its search counters.
    pub fn record(&mut self, solved: bool, search: &SearchStats) {
        self.deals += 1;
        if solved {
            self.solved += 1;
        } else {
            self.unsolved += 1;
        }
        self.search.merge(search);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn deals_per_sec(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.deals as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Average search nodes per deal.
    pub fn nodes_per_deal(&self) -> f64 {
        if self.deals > 0 {
            self.search.nodes as f64 / self.deals as f64
        } else {
            0.0
        }
    }

    pub fn should_log(&self, interval_secs: u64) -> bool {
        self.last_log_time.elapsed().as_secs() >= interval_secs
    }

    /// "Solved N out of M in T" line printed every `--report-every` deals.
    pub fn report_line(&self) -> String {
        format!(
            "Solved {} out of {} in {:.2?}",
            self.solved,
            self.deals,
            self.elapsed()
        )
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self) {
        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            (self.deals - self.last_log_deals) as f64 / elapsed
        } else {
            0.0
        };

        let mem_str = get_memory_usage()
            .map(|m| format!(" mem={}", format_bytes(m)))
            .unwrap_or_default();

        println!(
            "[{}] deals={} solved={} unsolved={} rate={:.0}/s nodes={} pruned={} depth={}{}",
            format_clock(self.elapsed()),
            self.deals,
            self.solved,
            self.unsolved,
            rate,
            self.search.nodes,
            self.search.pruned,
            self.search.max_depth,
            mem_str,
        );

        self.last_log_time = Instant::now();
        self.last_log_deals = self.deals;
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Deals: {}", self.deals);
        println!("  - Solved: {}", self.solved);
        println!("  - Unsolved: {}", self.unsolved);
        println!("Nodes searched: {}", self.search.nodes);
        println!("Nodes per deal: {:.1}", self.nodes_per_deal());
        println!("Positions cut off: {}", self.search.pruned);
        println!("Max depth: {}", self.search.max_depth);
        if self.mismatches > 0 {
            println!("Cutoff mismatches: {}", self.mismatches);
        }
        println!("Average rate: {:.0} deals/sec", self.deals_per_sec());
    }
}
