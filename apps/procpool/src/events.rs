//! Event handling and progress display

use console::{Style, Term};
use procpool_events::{AppEvent, GeneralEvent, PoolEvent};

use crate::logging::log_event_with_tracing;

/// Renders pool progress on stderr while commands run
///
/// Stdout is left to the final report; in JSON mode children write to
/// stderr as well, so the report stays parseable.
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    /// Suppress terminal output; events are still logged
    quiet: bool,
    term: Term,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            quiet,
            term: Term::stderr(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);
        if let Some(line) = self.format_event(&event) {
            self.show(&line);
        }
    }

    /// Terminal line for an event, if it should be shown
    fn format_event(&self, event: &AppEvent) -> Option<String> {
        if self.quiet {
            return None;
        }

        match event {
            AppEvent::Pool(PoolEvent::ProcessStarted { id, command, .. }) => Some(format!(
                "{} {id} {command}",
                self.paint(&Style::new().cyan(), "start")
            )),
            AppEvent::Pool(PoolEvent::ProcessSucceeded {
                id,
                command,
                duration_ms,
            }) => Some(format!(
                "{} {id} {command} ({})",
                self.paint(&Style::new().green(), "done "),
                crate::display::format_duration(*duration_ms)
            )),
            AppEvent::Pool(PoolEvent::ProcessFailed {
                id,
                command,
                exit_code,
                duration_ms,
            }) => Some(format!(
                "{} {id} {command} (exit {exit_code}, {})",
                self.paint(&Style::new().red().bold(), "fail "),
                crate::display::format_duration(*duration_ms)
            )),
            AppEvent::Pool(PoolEvent::DryRun { command }) => Some(format!(
                "{} {command}",
                self.paint(&Style::new().yellow(), "would run")
            )),
            AppEvent::Pool(PoolEvent::WaitingForSlot { active, capacity }) if self.debug_enabled => {
                Some(self.paint(
                    &Style::new().dim(),
                    &format!("waiting for a free slot ({active}/{capacity} busy)"),
                ))
            }
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                let mut line = format!("{} {message}", self.paint(&Style::new().yellow(), "warning:"));
                if let Some(context) = context {
                    line.push_str(&format!(" ({context})"));
                }
                Some(line)
            }
            AppEvent::General(GeneralEvent::Error { message, details }) => {
                let mut line = format!("{} {message}", self.paint(&Style::new().red(), "error:"));
                if let Some(details) = details {
                    line.push_str(&format!("\n  {details}"));
                }
                Some(line)
            }
            _ => None,
        }
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.colors_enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn show(&self, line: &str) {
        // A closed stderr is not worth aborting the run for
        let _ = self.term.write_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procpool_types::SlotId;

    fn started() -> AppEvent {
        AppEvent::Pool(PoolEvent::ProcessStarted {
            id: SlotId(3),
            command: "make all".to_string(),
            pid: Some(42),
        })
    }

    #[test]
    fn test_plain_lines() {
        let handler = EventHandler::new(false, false, false);
        assert_eq!(handler.format_event(&started()).unwrap(), "start #3 make all");

        let failed = AppEvent::Pool(PoolEvent::ProcessFailed {
            id: SlotId(3),
            command: "make all".to_string(),
            exit_code: 2,
            duration_ms: 1500,
        });
        assert_eq!(
            handler.format_event(&failed).unwrap(),
            "fail  #3 make all (exit 2, 1.5s)"
        );
    }

    #[test]
    fn test_quiet_shows_nothing() {
        let handler = EventHandler::new(false, true, true);
        assert!(handler.format_event(&started()).is_none());
    }

    #[test]
    fn test_warning_with_context() {
        let handler = EventHandler::new(false, false, false);
        let warning = AppEvent::General(GeneralEvent::warning_with_context(
            "pool dropped before drain",
            "2 process(es) left running unrecorded",
        ));
        assert_eq!(
            handler.format_event(&warning).unwrap(),
            "warning: pool dropped before drain (2 process(es) left running unrecorded)"
        );
    }

    #[test]
    fn test_debug_only_events() {
        let waiting = AppEvent::Pool(PoolEvent::WaitingForSlot {
            active: 2,
            capacity: 2,
        });
        assert!(EventHandler::new(false, false, false)
            .format_event(&waiting)
            .is_none());
        assert_eq!(
            EventHandler::new(false, true, false)
                .format_event(&waiting)
                .unwrap(),
            "waiting for a free slot (2/2 busy)"
        );
    }
}
