//! The local key/value record proxy.

use std::{cell::OnceCell, fmt, future::Future, pin::Pin, rc::Rc};

use futures::stream::FuturesUnordered;
use kv_store::{BatchEntry, KeyValueStore, StorageBackend, StoreError};
use kv_store_web::StorageBackendAdapter;
use leptos::logging;

use crate::{
    CompletionJoin, ModelSchema, Operation, OperationAction, ProxyConfig, ProxyError, Record,
    ResultSet,
};

/// Object-safe boxed future returned by [`LocalKeyValueProxy`] operations.
pub type ProxyFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Persists and retrieves [`Record`]s of one [`ModelSchema`] in a namespace-scoped local store.
///
/// Every operation method takes ownership of a pending [`Operation`], drives it through
/// `Started` to `Completed`, invokes `on_complete` exactly once with the completed operation, and
/// resolves to that operation. Store failures complete the operation unsuccessfully with the
/// error attached; they never reject the future. The future rejects only when the operation was
/// not pending or carries another action, in which case `on_complete` is not invoked.
///
/// No timeout is applied: a store call that never resolves leaves the operation started.
pub struct LocalKeyValueProxy<B: StorageBackend> {
    id: String,
    schema: Rc<ModelSchema>,
    backend: B,
    store: OnceCell<B::Store>,
}

impl<B: StorageBackend> fmt::Debug for LocalKeyValueProxy<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeyValueProxy")
            .field("id", &self.id)
            .field("model", &self.schema.name())
            .field("store_open", &self.is_store_open())
            .finish()
    }
}

impl LocalKeyValueProxy<StorageBackendAdapter> {
    /// Creates a proxy on the compile-time selected backend from `kv_store_web`.
    ///
    /// # Errors
    ///
    /// See [`LocalKeyValueProxy::new`].
    pub fn with_selected_backend(
        config: &ProxyConfig,
        schema: Rc<ModelSchema>,
    ) -> Result<Self, ProxyError> {
        Self::new(config, schema, kv_store_web::storage_backend())
    }
}

impl<B: StorageBackend> LocalKeyValueProxy<B> {
    /// Creates a proxy storing `schema` records under the namespace resolved from `config`.
    ///
    /// The store itself is opened on first use and reused for the proxy's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Configuration`] when no namespace id resolves and
    /// [`ProxyError::Environment`] when `backend` cannot persist in this environment.
    pub fn new(
        config: &ProxyConfig,
        schema: Rc<ModelSchema>,
        backend: B,
    ) -> Result<Self, ProxyError> {
        let id = config.resolve_id()?;
        if !backend.is_supported() {
            return Err(ProxyError::Environment(
                "local storage is not supported in this environment, please use another type of \
                 data proxy"
                    .to_string(),
            ));
        }

        Ok(Self {
            id,
            schema,
            backend,
            store: OnceCell::new(),
        })
    }

    /// Returns the storage namespace.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the schema records are rebuilt with.
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Returns whether the namespace store has been opened yet.
    pub fn is_store_open(&self) -> bool {
        self.store.get().is_some()
    }

    fn storage(&self) -> Result<&B::Store, StoreError> {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }
        let store = self.backend.open(&self.id)?;
        Ok(self.store.get_or_init(|| store))
    }

    /// Persists the operation's records as one batch.
    ///
    /// On success every record holds its store key and is no longer phantom.
    pub fn create<'a, F>(
        &'a self,
        operation: Operation,
        on_complete: F,
    ) -> ProxyFuture<'a, Result<Operation, ProxyError>>
    where
        F: FnOnce(&Operation) + 'a,
    {
        Box::pin(async move {
            operation.expect_action(OperationAction::Create)?;
            self.save(operation, on_complete).await
        })
    }

    /// Persists the operation's records as one batch. Behaves exactly like
    /// [`LocalKeyValueProxy::create`].
    pub fn update<'a, F>(
        &'a self,
        operation: Operation,
        on_complete: F,
    ) -> ProxyFuture<'a, Result<Operation, ProxyError>>
    where
        F: FnOnce(&Operation) + 'a,
    {
        Box::pin(async move {
            operation.expect_action(OperationAction::Update)?;
            self.save(operation, on_complete).await
        })
    }

    /// Loads the record under the operation's id, or every record when no id is given.
    ///
    /// The result set holds whatever the store returned, in the store's order. Sorters,
    /// filters, `start` and `limit` are not applied.
    pub fn read<'a, F>(
        &'a self,
        operation: Operation,
        on_complete: F,
    ) -> ProxyFuture<'a, Result<Operation, ProxyError>>
    where
        F: FnOnce(&Operation) + 'a,
    {
        Box::pin(async move {
            let mut operation = operation;
            operation.expect_action(OperationAction::Read)?;
            operation.begin()?;
            if operation.requests_paging() {
                logging::debug_warn!(
                    "local store `{}` ignores sorters, filters, start and limit on reads",
                    self.id
                );
            }

            let outcome = self
                .load_records(&operation)
                .await
                .map(|records| Some(ResultSet::loaded(records)));
            self.finish(operation, outcome, on_complete)
        })
    }

    /// Removes every record of the operation, issuing all removals concurrently.
    ///
    /// Completes once all removals have resolved. Records without an id were never stored and
    /// are skipped; an operation with nothing to remove completes without touching the store.
    pub fn destroy<'a, F>(
        &'a self,
        operation: Operation,
        on_complete: F,
    ) -> ProxyFuture<'a, Result<Operation, ProxyError>>
    where
        F: FnOnce(&Operation) + 'a,
    {
        Box::pin(async move {
            let mut operation = operation;
            operation.expect_action(OperationAction::Destroy)?;
            operation.begin()?;
            let outcome = self.remove_records(&operation).await;
            self.finish(operation, outcome.map(|()| None), on_complete)
        })
    }

    /// Routes the operation to the handler for its action.
    pub fn execute<'a, F>(
        &'a self,
        operation: Operation,
        on_complete: F,
    ) -> ProxyFuture<'a, Result<Operation, ProxyError>>
    where
        F: FnOnce(&Operation) + 'a,
    {
        match operation.action() {
            OperationAction::Create => self.create(operation, on_complete),
            OperationAction::Read => self.read(operation, on_complete),
            OperationAction::Update => self.update(operation, on_complete),
            OperationAction::Destroy => self.destroy(operation, on_complete),
        }
    }

    /// Runs `operations` one after another and returns them completed, in order.
    ///
    /// Stops at the first operation the proxy rejects.
    pub fn batch<'a>(
        &'a self,
        operations: Vec<Operation>,
    ) -> ProxyFuture<'a, Result<Vec<Operation>, ProxyError>> {
        Box::pin(async move {
            let mut completed = Vec::with_capacity(operations.len());
            for operation in operations {
                completed.push(self.execute(operation, |_| {}).await?);
            }
            Ok(completed)
        })
    }

    /// Erases every record in the namespace.
    ///
    /// # Errors
    ///
    /// Returns the store failure when the namespace could not be opened or wiped.
    pub fn clear(&self) -> ProxyFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            let result = match self.storage() {
                Ok(store) => store.clear_all().await,
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                logging::warn!("local store `{}` clear failed: {err}", self.id);
            }
            result
        })
    }

    async fn save<F>(&self, mut operation: Operation, on_complete: F) -> Result<Operation, ProxyError>
    where
        F: FnOnce(&Operation),
    {
        operation.begin()?;
        let outcome = self.write_records(operation.records_mut()).await;
        self.finish(operation, outcome.map(|()| None), on_complete)
    }

    async fn write_records(&self, records: &mut [Record]) -> Result<(), StoreError> {
        let store = self.storage()?;
        let entries = records
            .iter()
            .map(|record| BatchEntry {
                key: record.id().map(str::to_string),
                value: self.schema.store_shape(record),
            })
            .collect::<Vec<_>>();

        let keys = store.batch(entries).await?;
        if keys.len() != records.len() {
            return Err(StoreError::Backend(format!(
                "batch confirmed {} of {} records",
                keys.len(),
                records.len()
            )));
        }

        for (record, key) in records.iter_mut().zip(keys) {
            record.mark_persisted(key);
        }
        Ok(())
    }

    async fn load_records(&self, operation: &Operation) -> Result<Vec<Record>, StoreError> {
        let store = self.storage()?;
        match operation.id() {
            Some(id) => Ok(store
                .get(id)
                .await?
                .map(|raw| self.schema.reconstruct(&raw, id))
                .into_iter()
                .collect()),
            None => Ok(store
                .all()
                .await?
                .into_iter()
                .map(|entry| self.schema.reconstruct(&entry.value, &entry.key))
                .collect()),
        }
    }

    async fn remove_records(&self, operation: &Operation) -> Result<(), StoreError> {
        let keys = operation
            .records()
            .iter()
            .filter_map(Record::id)
            .collect::<Vec<_>>();
        let join = CompletionJoin::new(keys.len());
        if join.is_settled() {
            return Ok(());
        }

        let store = self.storage()?;
        let removals = keys
            .iter()
            .map(|&key| store.remove(key))
            .collect::<FuturesUnordered<_>>();
        join.join(removals).await
    }

    fn finish<F>(
        &self,
        mut operation: Operation,
        outcome: Result<Option<ResultSet>, StoreError>,
        on_complete: F,
    ) -> Result<Operation, ProxyError>
    where
        F: FnOnce(&Operation),
    {
        if let Err(err) = &outcome {
            logging::warn!(
                "local store `{}` {} failed: {err}",
                self.id,
                operation.action()
            );
        }
        operation.complete(outcome)?;
        on_complete(&operation);
        Ok(operation)
    }
}
