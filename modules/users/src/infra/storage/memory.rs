//! In-memory implementation of the storage port.
//!
//! Rows live in a shared table behind a lock. A store bound to a [`MemoryTx`]
//! stages its writes in the transaction; they reach the shared table only when
//! the transaction commits and are dropped on rollback. Reads inside a
//! transaction see the shared table with the staged writes applied.
//!
//! Commit is optimistic: every staged row must still match the version the
//! transaction first saw, and the merged table must keep emails unique.
//! Otherwise the commit fails and applies nothing.

use std::any::Any;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use bus_sdk::{By, CommitRollbacker, Direction, Page, TxError};
use parking_lot::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::contract::{
    filter::QueryFilter,
    model::{Email, User},
    order::{ORDER_BY_EMAIL, ORDER_BY_ENABLED, ORDER_BY_ID, ORDER_BY_NAME, ORDER_BY_ROLES},
};
use crate::domain::repo::{StoreError, Storer};

type Table = HashMap<Uuid, User>;

/// A row change staged in a transaction.
struct Staged {
    /// Shared row when the transaction first touched this id.
    base: Option<User>,
    /// `None` removes the row.
    row: Option<User>,
}

type Writes = HashMap<Uuid, Staged>;

enum Change {
    Put(User),
    Remove(Uuid),
}

#[derive(Clone)]
enum Scope {
    Shared,
    Tx(Arc<MemoryTx>),
}

/// Storage adapter keeping users in process memory.
#[derive(Clone)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table>>,
    scope: Scope,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::new())),
            scope: Scope::Shared,
        }
    }

    /// Open a transaction against this store's table.
    pub fn begin(&self) -> Arc<MemoryTx> {
        Arc::new(MemoryTx {
            table: self.table.clone(),
            writes: Mutex::new(Some(Writes::new())),
        })
    }

    /// Copy of the rows visible to this store.
    fn snapshot(&self) -> Result<Table, StoreError> {
        match &self.scope {
            Scope::Shared => Ok(self.table.read().clone()),
            Scope::Tx(tx) => {
                let writes = tx.writes.lock();
                let writes = writes.as_ref().ok_or(TxError::Completed)?;
                Ok(overlay(self.table.read().clone(), writes))
            }
        }
    }

    /// Validate a change against the visible rows and apply it to this scope.
    fn apply(&self, check: impl FnOnce(&Table) -> Result<Change, StoreError>) -> Result<(), StoreError> {
        match &self.scope {
            Scope::Shared => {
                let mut table = self.table.write();
                match check(&*table)? {
                    Change::Put(usr) => {
                        table.insert(usr.id, usr);
                    }
                    Change::Remove(id) => {
                        table.remove(&id);
                    }
                }
            }
            Scope::Tx(tx) => {
                let mut writes = tx.writes.lock();
                let writes = writes.as_mut().ok_or(TxError::Completed)?;
                let table = self.table.read();
                let (id, row) = match check(&overlay(table.clone(), writes))? {
                    Change::Put(usr) => (usr.id, Some(usr)),
                    Change::Remove(id) => (id, None),
                };
                match writes.entry(id) {
                    Entry::Occupied(mut staged) => staged.get_mut().row = row,
                    Entry::Vacant(slot) => {
                        slot.insert(Staged {
                            base: table.get(&id).cloned(),
                            row,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn overlay(mut table: Table, writes: &Writes) -> Table {
    for (id, staged) in writes {
        match &staged.row {
            Some(usr) => {
                table.insert(*id, usr.clone());
            }
            None => {
                table.remove(id);
            }
        }
    }
    table
}

fn email_taken(table: &Table, email: &Email, except: Uuid) -> bool {
    table.values().any(|u| u.id != except && &u.email == email)
}

fn matches(filter: &QueryFilter, usr: &User) -> bool {
    if filter.id.is_some_and(|id| id != usr.id) {
        return false;
    }
    if let Some(name) = &filter.name {
        if !usr.name.contains(name.as_str()) {
            return false;
        }
    }
    if let Some(email) = &filter.email {
        if !usr.email.as_str().contains(email.as_str()) {
            return false;
        }
    }
    if filter.start_created_date.is_some_and(|start| usr.date_created < start) {
        return false;
    }
    if filter.end_created_date.is_some_and(|end| usr.date_created > end) {
        return false;
    }
    true
}

type Comparator = fn(&User, &User) -> Ordering;

fn comparator(field: &str) -> Result<Comparator, StoreError> {
    let cmp: Comparator = match field {
        ORDER_BY_ID => |a, b| a.id.cmp(&b.id),
        ORDER_BY_NAME => |a, b| a.name.cmp(&b.name),
        ORDER_BY_EMAIL => |a, b| a.email.cmp(&b.email),
        ORDER_BY_ROLES => |a, b| a.roles.cmp(&b.roles),
        ORDER_BY_ENABLED => |a, b| a.enabled.cmp(&b.enabled),
        other => return Err(StoreError::Backend(anyhow!("unknown order field: {other}"))),
    };
    Ok(cmp)
}

#[async_trait]
impl Storer for InMemoryUserStore {
    fn new_with_tx(&self, tx: Arc<dyn CommitRollbacker>) -> Result<Arc<dyn Storer>, StoreError> {
        let tx = tx
            .into_any()
            .downcast::<MemoryTx>()
            .map_err(|_| StoreError::Backend(anyhow!("unsupported transaction handle")))?;

        if !Arc::ptr_eq(&tx.table, &self.table) {
            return Err(StoreError::Backend(anyhow!(
                "transaction belongs to a different store"
            )));
        }

        Ok(Arc::new(Self {
            table: self.table.clone(),
            scope: Scope::Tx(tx),
        }))
    }

    async fn create(&self, usr: &User) -> Result<(), StoreError> {
        self.apply(|table| {
            if table.contains_key(&usr.id) {
                return Err(StoreError::Backend(anyhow!("duplicate user id: {}", usr.id)));
            }
            if email_taken(table, &usr.email, usr.id) {
                return Err(StoreError::UniqueEmail);
            }
            Ok(Change::Put(usr.clone()))
        })
    }

    async fn update(&self, usr: &User) -> Result<(), StoreError> {
        self.apply(|table| {
            if !table.contains_key(&usr.id) {
                return Err(StoreError::NotFound);
            }
            if email_taken(table, &usr.email, usr.id) {
                return Err(StoreError::UniqueEmail);
            }
            Ok(Change::Put(usr.clone()))
        })
    }

    async fn delete(&self, usr: &User) -> Result<(), StoreError> {
        self.apply(|table| {
            if !table.contains_key(&usr.id) {
                return Err(StoreError::NotFound);
            }
            Ok(Change::Remove(usr.id))
        })
    }

    async fn query(
        &self,
        filter: &QueryFilter,
        order_by: &By,
        page: Page,
    ) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self
            .snapshot()?
            .into_values()
            .filter(|u| matches(filter, u))
            .collect();

        let cmp = comparator(&order_by.field)?;
        users.sort_by(|a, b| {
            let ord = cmp(a, b).then_with(|| a.id.cmp(&b.id));
            match order_by.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        });

        let users: Vec<User> = users
            .into_iter()
            .skip(page.offset())
            .take(page.rows_per_page() as usize)
            .collect();

        debug!(rows = users.len(), "memory store query");
        Ok(users)
    }

    async fn count(&self, filter: &QueryFilter) -> Result<usize, StoreError> {
        Ok(self.snapshot()?.values().filter(|u| matches(filter, u)).count())
    }

    async fn query_by_id(&self, user_id: Uuid) -> Result<User, StoreError> {
        self.snapshot()?
            .remove(&user_id)
            .ok_or(StoreError::NotFound)
    }

    async fn query_by_email(&self, email: &Email) -> Result<User, StoreError> {
        self.snapshot()?
            .into_values()
            .find(|u| &u.email == email)
            .ok_or(StoreError::NotFound)
    }
}

/// Transaction handle for [`InMemoryUserStore`].
pub struct MemoryTx {
    table: Arc<RwLock<Table>>,
    writes: Mutex<Option<Writes>>,
}

#[async_trait]
impl CommitRollbacker for MemoryTx {
    async fn commit(&self) -> Result<(), TxError> {
        let writes = self.writes.lock().take().ok_or(TxError::Completed)?;
        let mut table = self.table.write();

        for (id, staged) in &writes {
            if table.get(id) != staged.base.as_ref() {
                return Err(TxError::Conflict(format!(
                    "user {id} changed after the transaction read it"
                )));
            }
        }

        let merged = overlay(table.clone(), &writes);
        for (id, staged) in &writes {
            if let Some(usr) = &staged.row {
                if email_taken(&merged, &usr.email, *id) {
                    return Err(TxError::Conflict(format!(
                        "email {} is not unique",
                        usr.email
                    )));
                }
            }
        }

        debug!(rows = writes.len(), "memory tx commit");
        *table = merged;
        Ok(())
    }

    async fn rollback(&self) -> Result<(), TxError> {
        let writes = self.writes.lock().take().ok_or(TxError::Completed)?;
        debug!(rows = writes.len(), "memory tx rollback");
        Ok(())
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
