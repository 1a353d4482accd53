//! Countdown join over independent store completions.

use futures::{Stream, StreamExt};
use kv_store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Counting join that settles once `expected` completions have been signalled.
///
/// Completions may arrive in any order. A join over zero completions is settled on creation.
/// Signals after settlement are ignored, so [`CompletionJoin::signal`] reports settlement
/// exactly once.
pub struct CompletionJoin {
    expected: usize,
    remaining: usize,
    first_error: Option<StoreError>,
}

impl CompletionJoin {
    /// Creates a join waiting for `expected` completions.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            remaining: expected,
            first_error: None,
        }
    }

    /// Returns the number of completions the join waits for.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Returns the number of completions still outstanding.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns whether every expected completion has been signalled.
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }

    /// Counts one completion. Returns `true` only for the signal that settles the join.
    pub fn signal(&mut self, result: Result<(), StoreError>) -> bool {
        if self.is_settled() {
            return false;
        }
        if let Err(err) = result {
            self.first_error.get_or_insert(err);
        }
        self.remaining -= 1;
        self.is_settled()
    }

    /// Returns the joined outcome: the first failure signalled, if any.
    ///
    /// # Errors
    ///
    /// Returns the first signalled failure, or [`StoreError::Backend`] when completions are
    /// still outstanding.
    pub fn outcome(self) -> Result<(), StoreError> {
        if let Some(err) = self.first_error {
            return Err(err);
        }
        if self.remaining > 0 {
            return Err(StoreError::Backend(format!(
                "{} of {} completions never arrived",
                self.remaining, self.expected
            )));
        }
        Ok(())
    }

    /// Drains `completions` into the join until it settles, then returns the outcome.
    ///
    /// # Errors
    ///
    /// See [`CompletionJoin::outcome`]; a stream that ends before the join settles leaves
    /// completions outstanding.
    pub async fn join<S>(mut self, mut completions: S) -> Result<(), StoreError>
    where
        S: Stream<Item = Result<(), StoreError>> + Unpin,
    {
        while !self.is_settled() {
            let Some(result) = completions.next().await else {
                break;
            };
            self.signal(result);
        }
        self.outcome()
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, stream};

    use super::*;

    #[test]
    fn zero_expected_completions_settle_immediately() {
        let join = CompletionJoin::new(0);
        assert!(join.is_settled());
        assert_eq!(join.outcome(), Ok(()));
    }

    #[test]
    fn settles_exactly_once_on_the_last_signal() {
        let mut join = CompletionJoin::new(3);
        let settled = (0..5)
            .map(|_| join.signal(Ok(())))
            .collect::<Vec<_>>();

        assert_eq!(settled, vec![false, false, true, false, false]);
        assert_eq!(join.remaining(), 0);
        assert_eq!(join.expected(), 3);
    }

    #[test]
    fn first_failure_wins() {
        let mut join = CompletionJoin::new(3);
        join.signal(Ok(()));
        join.signal(Err(StoreError::Backend("first".to_string())));
        join.signal(Err(StoreError::Backend("second".to_string())));
        assert_eq!(
            join.outcome(),
            Err(StoreError::Backend("first".to_string()))
        );
    }

    #[test]
    fn join_drains_stream_until_settled() {
        let completions = stream::iter(vec![Ok(()), Ok(())]);
        assert_eq!(block_on(CompletionJoin::new(2).join(completions)), Ok(()));
    }

    #[test]
    fn join_over_zero_does_not_poll_the_stream() {
        let completions = stream::pending::<Result<(), StoreError>>();
        assert_eq!(block_on(CompletionJoin::new(0).join(completions)), Ok(()));
    }

    #[test]
    fn short_stream_reports_outstanding_completions() {
        let completions = stream::iter(vec![Ok(())]);
        assert_eq!(
            block_on(CompletionJoin::new(3).join(completions)),
            Err(StoreError::Backend(
                "2 of 3 completions never arrived".to_string()
            ))
        );
    }
}
