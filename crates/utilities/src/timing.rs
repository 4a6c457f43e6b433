use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

use log::info;
use log::warn;

/// Keeps track of named timers to measure the different phases of a tool,
/// e.g., parsing the input and checking the inclusion.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, Duration)>>>,
}

/// Measures the time between its creation and the call to `finish()`. The
/// timer must be finished explicitly, otherwise it is not registered.
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, Duration)>>>,
    registered: bool,
}

impl Timing {
    /// Creates a new timing object to track timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer with the given name.
    pub fn start(&self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the accumulated time of all finished timers with the given name.
    pub fn total(&self, name: &str) -> Option<Duration> {
        self.results
            .borrow()
            .iter()
            .filter(|(timer, _)| timer == name)
            .map(|(_, time)| *time)
            .reduce(|total, time| total + time)
    }

    /// Prints the finished timers, timers with the same name are summed and
    /// printed in the order in which they first finished.
    pub fn print(&self) {
        let mut names: Vec<&String> = Vec::new();
        let results = self.results.borrow();
        for (name, _) in results.iter() {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        for name in names {
            let (count, total) = results
                .iter()
                .filter(|(timer, _)| timer == name)
                .fold((0usize, Duration::ZERO), |(count, total), (_, time)| (count + 1, total + *time));

            if count == 1 {
                eprintln!("Time {}: {:.3}s", name, total.as_secs_f64());
            } else {
                eprintln!(
                    "Time {}: {:.3}s, n: {}, avg: {:.3}s",
                    name,
                    total.as_secs_f64(),
                    count,
                    total.as_secs_f64() / count as f64
                );
            }
        }
    }
}

impl Timer {
    /// Finishes the timer and registers the result.
    pub fn finish(&mut self) -> Duration {
        let time = self.start.elapsed();
        info!("Time {}: {:.3}s", self.name, time.as_secs_f64());

        self.results.borrow_mut().push((self.name.clone(), time));
        self.registered = true;
        time
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            warn!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_accumulates_by_name() {
        let timing = Timing::new();

        let first = timing.start("parse").finish();
        let second = timing.start("parse").finish();
        timing.start("check").finish();

        assert_eq!(timing.total("parse"), Some(first + second));
        assert!(timing.total("check").is_some());
        assert_eq!(timing.total("missing"), None);
    }
}
