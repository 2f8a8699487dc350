//! Command-line logger
use super::{Event, LogError, Loggable, StatsLogger};
use enum_map::{enum_map, EnumMap};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::time::{Duration, Instant};
use yansi::Paint;

/// Logger that writes periodic summaries to stdout.
///
/// Values logged during an event are held as pending until [`StatsLogger::done`] is called for
/// that event, at which point they are committed into the running summary.
/// A summary is displayed at most once per `display_period` and once more when dropped.
pub struct CLILogger {
    events: EnumMap<Event, EventLog>,

    display_period: Duration,
    last_display_time: Instant,
}

impl CLILogger {
    pub fn new(display_period: Duration) -> Self {
        Self {
            events: enum_map! { _ => EventLog::new() },
            display_period,
            last_display_time: Instant::now(),
        }
    }

    /// Format the summary of all committed values and clear them.
    ///
    /// Returns an empty string if nothing has been committed since the last summary.
    pub fn take_summary(&mut self) -> String {
        let mut out = String::new();
        for (event, event_log) in self.events.iter_mut() {
            let summary_size = event_log.index - event_log.summary_start_index;
            if summary_size == 0 {
                continue;
            }
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "==== {} {} - {} ({:?} / event) ====",
                Paint::fixed(35, format!("{:?}s", event)),
                event_log.summary_start_index,
                event_log.index - 1,
                event_log.summary_duration / u32::try_from(summary_size).unwrap_or(u32::MAX),
            );
            for (name, aggregator) in &mut event_log.aggregators {
                let _ = writeln!(out, "{:<16} {}", Paint::fixed(111, name), aggregator.stats);
                aggregator.stats.clear();
            }
            event_log.summary_start_index = event_log.index;
        }
        out
    }

    /// Display the summary and clear all stored data.
    pub fn display(&mut self) {
        let summary = self.take_summary();
        if !summary.is_empty() {
            println!();
            print!("{}", summary);
        }
        self.last_display_time = Instant::now();
    }
}

impl fmt::Debug for CLILogger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CLILogger")
            .field("display_period", &self.display_period)
            .finish()
    }
}

impl StatsLogger for CLILogger {
    fn log(&mut self, event: Event, name: &str, value: Loggable) -> Result<(), LogError> {
        let aggregators = &mut self.events[event].aggregators;
        if let Some(aggregator) = aggregators.get_mut(name) {
            if let Err(expected) = aggregator.stats.check(&value) {
                return Err(LogError::new(name, value, expected));
            }
            aggregator.pending = Some(value);
        } else {
            let aggregator = Aggregator::new(value).map_err(|(value, expected)| {
                LogError::new(name, value, expected)
            })?;
            aggregators.insert(name.into(), aggregator);
        }
        Ok(())
    }

    fn done(&mut self, event: Event) {
        let event_log = &mut self.events[event];
        event_log.index += 1;
        for aggregator in event_log.aggregators.values_mut() {
            aggregator.commit();
        }

        let time_since_display = self.last_display_time.elapsed();
        event_log.summary_duration = time_since_display;
        if time_since_display >= self.display_period {
            self.display();
        }
    }
}

impl Drop for CLILogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.display();
    }
}

struct EventLog {
    /// Global index for this event
    index: u64,
    /// Value of `index` at the start of this summary period
    summary_start_index: u64,
    /// Duration of this summary period to the most recent update
    summary_duration: Duration,
    /// An aggregator for each log entry.
    aggregators: BTreeMap<String, Aggregator>,
}

impl EventLog {
    const fn new() -> Self {
        Self {
            index: 0,
            summary_start_index: 0,
            summary_duration: Duration::from_secs(0),
            aggregators: BTreeMap::new(),
        }
    }
}

struct Aggregator {
    stats: Stats,
    /// Value logged in the current event; committed on `done`.
    pending: Option<Loggable>,
}

impl Aggregator {
    /// Aggregator initialized with a first value.
    ///
    /// Fails with the value and a description of what was expected
    /// if the value is inconsistent with itself (an out-of-range index).
    fn new(value: Loggable) -> Result<Self, (Loggable, String)> {
        let stats = Stats::for_value(&value);
        match stats.check(&value) {
            Ok(()) => Ok(Self {
                stats,
                pending: Some(value),
            }),
            Err(expected) => Err((value, expected)),
        }
    }

    fn commit(&mut self) {
        if let Some(value) = self.pending.take() {
            self.stats.insert(value);
        }
    }
}

/// Running statistics of the values logged under one name.
#[derive(Debug, Clone, PartialEq)]
enum Stats {
    Nothing,
    Mean { sum: f64, count: u64 },
    IndexDistribution { counts: Vec<u64> },
    MessageCounts { counts: BTreeMap<Cow<'static, str>, u64> },
}

impl Stats {
    fn for_value(value: &Loggable) -> Self {
        match value {
            Loggable::Nothing => Self::Nothing,
            Loggable::Scalar(_) => Self::Mean { sum: 0.0, count: 0 },
            Loggable::IndexSample { size, .. } => Self::IndexDistribution {
                counts: vec![0; *size],
            },
            Loggable::Message(_) => Self::MessageCounts {
                counts: BTreeMap::new(),
            },
        }
    }

    /// Check that a value is compatible with these statistics.
    ///
    /// On failure, returns a description of the expected value.
    fn check(&self, value: &Loggable) -> Result<(), String> {
        match (self, value) {
            (Self::Nothing, Loggable::Nothing)
            | (Self::Mean { .. }, Loggable::Scalar(_))
            | (Self::MessageCounts { .. }, Loggable::Message(_)) => Ok(()),
            (Self::IndexDistribution { counts }, Loggable::IndexSample { value, size })
                if *size == counts.len() && value < size =>
            {
                Ok(())
            }
            (Self::Nothing, _) => Err("Nothing".into()),
            (Self::Mean { .. }, _) => Err("Scalar".into()),
            (Self::IndexDistribution { counts }, _) => {
                Err(format!("IndexSample{{size: {}}}", counts.len()))
            }
            (Self::MessageCounts { .. }, _) => Err("Message".into()),
        }
    }

    /// Insert a value previously accepted by `check`.
    fn insert(&mut self, value: Loggable) {
        match (self, value) {
            (Self::Mean { sum, count }, Loggable::Scalar(x)) => {
                *sum += x;
                *count += 1;
            }
            (Self::IndexDistribution { counts }, Loggable::IndexSample { value, .. }) => {
                if let Some(c) = counts.get_mut(value) {
                    *c += 1;
                }
            }
            (Self::MessageCounts { counts }, Loggable::Message(message)) => {
                *counts.entry(message).or_insert(0) += 1;
            }
            _ => {}
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Nothing => {}
            Self::Mean { sum, count } => {
                *sum = 0.0;
                *count = 0;
            }
            Self::IndexDistribution { counts } => counts.iter_mut().for_each(|c| *c = 0),
            Self::MessageCounts { counts } => counts.clear(),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "Nothing"),
            Self::Mean { count: 0, .. } => write!(f, "None"),
            Self::Mean { sum, count } => write!(f, "{}", sum / (*count as f64)),
            Self::IndexDistribution { counts } => {
                let total: u64 = counts.iter().sum();
                if total == 0 {
                    return write!(f, "None");
                }
                write!(f, "[")?;
                for (i, c) in counts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:.3}", (*c as f64) / (total as f64))?;
                }
                write!(f, "]")
            }
            Self::MessageCounts { counts } => {
                if counts.len() == 1 {
                    for (message, count) in counts {
                        write!(f, "[x{}] {}", count, message)?;
                    }
                } else {
                    for (message, count) in counts {
                        write!(f, "\n\t[x{}] {}", count, message)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger() -> CLILogger {
        // Long display period so that summaries are only produced on demand.
        CLILogger::new(Duration::from_secs(3600))
    }

    #[test]
    fn scalar_mean() {
        Paint::disable();
        let mut logger = logger();
        for x in [1.0, 2.0, 6.0] {
            logger.log(Event::Step, "reward", x.into()).unwrap();
            logger.done(Event::Step);
        }
        let summary = logger.take_summary();
        assert!(summary.contains("Steps 0 - 2"), "{}", summary);
        assert!(summary.contains("reward"));
        assert!(summary.contains(" 3\n"), "{}", summary);
    }

    #[test]
    fn index_distribution() {
        Paint::disable();
        let mut logger = logger();
        for value in [0, 1, 1, 1] {
            logger
                .log(Event::Step, "arm", Loggable::IndexSample { value, size: 2 })
                .unwrap();
            logger.done(Event::Step);
        }
        let summary = logger.take_summary();
        assert!(summary.contains("[0.250, 0.750]"), "{}", summary);
    }

    #[test]
    fn messages_counted() {
        Paint::disable();
        let mut logger = logger();
        for _ in 0..3 {
            logger.log(Event::Episode, "status", "ok".into()).unwrap();
            logger.done(Event::Episode);
        }
        assert!(logger.take_summary().contains("[x3] ok"));
    }

    #[test]
    fn summary_clears() {
        let mut logger = logger();
        logger.log(Event::Step, "reward", 1.0.into()).unwrap();
        logger.done(Event::Step);
        assert!(!logger.take_summary().is_empty());
        assert!(logger.take_summary().is_empty());
    }

    #[test]
    fn pending_not_committed_before_done() {
        let mut logger = logger();
        logger.log(Event::Step, "reward", 1.0.into()).unwrap();
        assert!(logger.take_summary().is_empty());
    }

    #[test]
    fn incompatible_value() {
        let mut logger = logger();
        logger.log(Event::Step, "reward", 1.0.into()).unwrap();
        logger.done(Event::Step);
        let result = logger.log(Event::Step, "reward", "oops".into());
        assert!(result.is_err());
    }

    #[test]
    fn incompatible_index_size() {
        let mut logger = logger();
        logger
            .log(Event::Step, "arm", Loggable::IndexSample { value: 0, size: 2 })
            .unwrap();
        let result = logger.log(Event::Step, "arm", Loggable::IndexSample { value: 0, size: 3 });
        assert!(result.is_err());
    }

    #[test]
    fn first_index_out_of_range() {
        let mut logger = logger();
        let result = logger.log(Event::Step, "arm", Loggable::IndexSample { value: 2, size: 2 });
        assert!(result.is_err());
        logger.done(Event::Step);
        assert!(!logger.take_summary().contains("arm"));

        // The name is still free for valid samples
        logger
            .log(Event::Step, "arm", Loggable::IndexSample { value: 1, size: 2 })
            .unwrap();
        logger.done(Event::Step);
        assert!(logger.take_summary().contains("arm"));
    }
}
