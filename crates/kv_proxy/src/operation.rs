//! Operation descriptors and their lifecycle.

use std::fmt;

use kv_store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{OperationError, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// The CRUD action an [`Operation`] requests.
pub enum OperationAction {
    /// Persist new records.
    Create,
    /// Load one record by id, or every record.
    Read,
    /// Persist changes to existing records.
    Update,
    /// Remove records.
    Destroy,
}

impl OperationAction {
    /// Returns the action as a stable string token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for OperationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Progress of an [`Operation`]: `Pending -> Started -> Completed`.
pub enum OperationStatus {
    /// Not yet handed to a proxy.
    #[default]
    Pending,
    /// Store calls are in flight.
    Started,
    /// Finished; the success flag (and result set, for reads) is final.
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Sort direction of a [`Sorter`].
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Requested ordering on one field.
pub struct Sorter {
    /// Field to sort by.
    pub property: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Requested equality filter on one field.
pub struct Filter {
    /// Field to filter on.
    pub property: String,
    /// Value the field must equal.
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Records produced by a successful read.
pub struct ResultSet {
    records: Vec<Record>,
    total: usize,
    loaded: bool,
}

impl ResultSet {
    /// Creates a loaded result set whose total is the number of `records`.
    pub fn loaded(records: Vec<Record>) -> Self {
        Self {
            total: records.len(),
            records,
            loaded: true,
        }
    }

    /// Returns the records in the order the store yielded them.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the result set and returns its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the number of records.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns whether the records were loaded from the store.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One create/read/update/destroy request and, once completed, its outcome.
///
/// Read requests may carry `start`, `limit`, sorters and filters; the local proxy does not apply
/// them and returns the full matching set.
pub struct Operation {
    action: OperationAction,
    records: Vec<Record>,
    id: Option<String>,
    start: Option<usize>,
    limit: Option<usize>,
    sorters: Vec<Sorter>,
    filters: Vec<Filter>,
    status: OperationStatus,
    success: Option<bool>,
    result_set: Option<ResultSet>,
    error: Option<StoreError>,
}

impl Operation {
    fn new(action: OperationAction, records: Vec<Record>, id: Option<String>) -> Self {
        Self {
            action,
            records,
            id,
            start: None,
            limit: None,
            sorters: Vec::new(),
            filters: Vec::new(),
            status: OperationStatus::Pending,
            success: None,
            result_set: None,
            error: None,
        }
    }

    /// Requests that `records` be created.
    pub fn create(records: Vec<Record>) -> Self {
        Self::new(OperationAction::Create, records, None)
    }

    /// Requests that `records` be updated.
    pub fn update(records: Vec<Record>) -> Self {
        Self::new(OperationAction::Update, records, None)
    }

    /// Requests that `records` be destroyed.
    pub fn destroy(records: Vec<Record>) -> Self {
        Self::new(OperationAction::Destroy, records, None)
    }

    /// Requests the single record stored under `id`.
    pub fn read_one(id: impl Into<String>) -> Self {
        Self::new(OperationAction::Read, Vec::new(), Some(id.into()))
    }

    /// Requests every stored record.
    pub fn read_all() -> Self {
        Self::new(OperationAction::Read, Vec::new(), None)
    }

    /// Sets the requested page offset.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the requested page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds a requested ordering.
    pub fn with_sorter(mut self, sorter: Sorter) -> Self {
        self.sorters.push(sorter);
        self
    }

    /// Adds a requested filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns the requested action.
    pub fn action(&self) -> OperationAction {
        self.action
    }

    /// Returns the records the operation addresses.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the operation and returns the records it addressed.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the single id a read addresses, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the requested page offset.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Returns the requested page size.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the requested orderings.
    pub fn sorters(&self) -> &[Sorter] {
        &self.sorters
    }

    /// Returns the requested filters.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns whether the request asks for paging, sorting or filtering.
    pub fn requests_paging(&self) -> bool {
        self.start.is_some()
            || self.limit.is_some()
            || !self.sorters.is_empty()
            || !self.filters.is_empty()
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// Returns whether the operation has left the pending state.
    pub fn is_started(&self) -> bool {
        self.status != OperationStatus::Pending
    }

    /// Returns whether the operation has completed.
    pub fn is_completed(&self) -> bool {
        self.status == OperationStatus::Completed
    }

    /// Returns whether the operation completed successfully.
    pub fn was_successful(&self) -> bool {
        self.success == Some(true)
    }

    /// Returns the result set of a completed, successful read.
    pub fn result_set(&self) -> Option<&ResultSet> {
        self.result_set.as_ref()
    }

    /// Consumes the operation and returns its result set.
    pub fn into_result_set(self) -> Option<ResultSet> {
        self.result_set
    }

    /// Returns the store failure that completed the operation unsuccessfully.
    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub(crate) fn expect_action(&self, expected: OperationAction) -> Result<(), OperationError> {
        if self.action == expected {
            Ok(())
        } else {
            Err(OperationError::ActionMismatch {
                expected,
                actual: self.action,
            })
        }
    }

    pub(crate) fn begin(&mut self) -> Result<(), OperationError> {
        match self.status {
            OperationStatus::Pending => {
                self.status = OperationStatus::Started;
                Ok(())
            }
            OperationStatus::Started => Err(OperationError::AlreadyStarted),
            OperationStatus::Completed => Err(OperationError::AlreadyCompleted),
        }
    }

    /// Records the outcome and moves to `Completed`. Success flag, result set and error are set
    /// together, before the status changes.
    pub(crate) fn complete(
        &mut self,
        outcome: Result<Option<ResultSet>, StoreError>,
    ) -> Result<(), OperationError> {
        match self.status {
            OperationStatus::Pending => return Err(OperationError::NotStarted),
            OperationStatus::Completed => return Err(OperationError::AlreadyCompleted),
            OperationStatus::Started => {}
        }

        match outcome {
            Ok(result_set) => {
                if result_set.is_some() && self.action != OperationAction::Read {
                    return Err(OperationError::UnexpectedResultSet(self.action));
                }
                self.success = Some(true);
                self.result_set = result_set;
            }
            Err(err) => {
                self.success = Some(false);
                self.error = Some(err);
            }
        }
        self.status = OperationStatus::Completed;
        Ok(())
    }
}
