use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Numbered pipeline stages, each shown as a spinner and then a check line.
pub struct StageSpinner {
    bar: Option<ProgressBar>,
    start: Instant,
    stage: u8,
    total_stages: u8,
    stage_start: Instant,
}

impl StageSpinner {
    pub fn new(total_stages: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            start: now,
            stage: 0,
            total_stages,
            stage_start: now,
        }
    }

    pub fn begin(&mut self, description: &str) {
        self.clear();

        self.stage += 1;
        self.stage_start = Instant::now();

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!(
            "[{}/{}] {}...",
            self.stage, self.total_stages, description
        ));

        self.bar = Some(bar);
    }

    pub fn complete(&mut self, description: &str, details: &[String]) {
        self.clear();

        let elapsed = self.stage_start.elapsed();
        let mut stderr = io::stderr().lock();

        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            elapsed.as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", detail);
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn finish(mut self) {
        self.clear();
        print_footer(self.start.elapsed());
    }
}

fn print_footer(elapsed: Duration) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
    );
    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[32m✓\x1b[0m Decomposition complete {:>27}",
        format!("Total: {:.2}s", elapsed.as_secs_f64())
    );
    let _ = writeln!(stderr);
}

/// Stage reporting that is a no-op outside interactive sessions.
pub struct Progress {
    spinner: Option<StageSpinner>,
}

impl Progress {
    pub fn new(interactive: bool, total_stages: u8) -> Self {
        Self {
            spinner: interactive.then(|| StageSpinner::new(total_stages)),
        }
    }

    pub fn begin(&mut self, description: &str) {
        if let Some(s) = &mut self.spinner {
            s.begin(description);
        }
    }

    pub fn complete(&mut self, description: &str, details: &[String]) {
        if let Some(s) = &mut self.spinner {
            s.complete(description, details);
        }
    }

    /// Clears any running spinner without printing the footer.
    pub fn abandon(mut self) {
        if let Some(s) = &mut self.spinner {
            s.clear();
        }
    }

    pub fn finish(self) {
        if let Some(s) = self.spinner {
            s.finish();
        }
    }
}
