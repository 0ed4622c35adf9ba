//! Blank-row scanning state machine shared by batch and score extraction.
//!
//! Both extractors walk rows downward and stop once a run of consecutive
//! blank rows exceeds a limit. The batch extractor additionally treats the
//! first blank of a run as a group separator. Keeping the states explicit
//! makes the termination rule testable away from any worksheet.

/// What the caller should do after feeding a blank row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanEvent {
    /// First blank right after collected rows: close the in-progress group.
    Separator,
    /// Still inside a tolerated blank run.
    Continue,
    /// The blank run exceeded the limit: stop reading rows.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Collecting,
    Gap(u8),
    Terminated,
}

#[derive(Debug)]
pub(crate) struct RowScan {
    state: ScanState,
    limit: u8,
}

impl RowScan {
    /// `limit` is the number of consecutive blank rows tolerated; the row
    /// after that terminates the scan. Must be at least 1 (config enforces).
    pub(crate) fn new(limit: u8) -> Self {
        debug_assert!(limit >= 1);
        Self {
            state: ScanState::Collecting,
            limit,
        }
    }

    /// A data row resets the blank run.
    pub(crate) fn on_data(&mut self) {
        if self.state != ScanState::Terminated {
            self.state = ScanState::Collecting;
        }
    }

    pub(crate) fn on_blank(&mut self) -> ScanEvent {
        match self.state {
            ScanState::Terminated => ScanEvent::Terminated,
            ScanState::Collecting => {
                self.state = ScanState::Gap(1);
                ScanEvent::Separator
            }
            ScanState::Gap(run) => {
                if run >= self.limit {
                    self.state = ScanState::Terminated;
                    ScanEvent::Terminated
                } else {
                    self.state = ScanState::Gap(run + 1);
                    ScanEvent::Continue
                }
            }
        }
    }
}
