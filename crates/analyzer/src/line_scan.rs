use crate::catalog::FlowMatcher;
use crate::types::PaymentFlow;
use std::collections::VecDeque;
use std::iter::Enumerate;
use std::str::Split;

/// Lazy line-by-line scan of a file against a pattern table.
///
/// Every matching row emits one flow at that line, so a single occurrence may
/// produce several overlapping flows.
pub struct LineScan<'a, P> {
    lines: Enumerate<Split<'a, char>>,
    table: &'a [P],
    file_path: &'a str,
    pending: VecDeque<PaymentFlow>,
}

impl<'a, P: FlowMatcher> LineScan<'a, P> {
    pub fn new(content: &'a str, table: &'a [P], file_path: &'a str) -> Self {
        Self {
            lines: content.split('\n').enumerate(),
            table,
            file_path,
            pending: VecDeque::new(),
        }
    }

    fn scan_line(&mut self, index: usize, line: &str) {
        let table = self.table;
        for pattern in table.iter().filter(|p| p.is_match(line)) {
            let flow = PaymentFlow::new(
                pattern.provider(),
                pattern.flow_type(),
                self.file_path,
                index + 1,
            )
            .with_method(line.trim());
            self.pending.push_back(flow);
        }
    }
}

impl<P: FlowMatcher> Iterator for LineScan<'_, P> {
    type Item = PaymentFlow;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(flow) = self.pending.pop_front() {
                return Some(flow);
            }
            let (index, line) = self.lines.next()?;
            self.scan_line(index, line);
        }
    }
}
