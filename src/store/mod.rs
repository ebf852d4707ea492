//! SQLite-backed store for shifts, machine events, production cycles and
//! the product catalog.
//!
//! The store is the engine's data-access collaborator: the simulator
//! writes into it and the API reads from it. The computation core never
//! touches it directly; it only sees the in-memory snapshots produced
//! here. The connection lives behind a shared mutex and is borrowed for
//! the duration of one logical operation, so concurrent readers and a
//! running simulator can share one store handle.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Result as SqliteResult, params};

use crate::error::{EngineError, EngineResult};
use crate::models::{EventKind, MachineEvent, Product, ProductionCycle, Shift};

/// Everything the metrics computation needs for one shift, read from the
/// store in a single scoped borrow of the connection.
#[derive(Debug, Clone)]
pub struct ShiftSnapshot {
    /// The shift under evaluation.
    pub shift: Shift,
    /// The shift's machine events, in ascending timestamp order.
    pub events: Vec<MachineEvent>,
    /// The shift's production cycles, in ascending timestamp order.
    pub cycles: Vec<ProductionCycle>,
    /// The full product catalog.
    pub products: Vec<Product>,
}

/// Handle to the production-line store.
///
/// Cloning the handle is cheap and clones share one underlying
/// connection; each operation locks it only for its own duration.
///
/// # Example
///
/// ```
/// use oee_engine::store::LineStore;
///
/// let store = LineStore::in_memory().unwrap();
/// assert!(store.shifts().unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct LineStore {
    conn: Arc<Mutex<Connection>>,
}

impl LineStore {
    /// Opens (creating if necessary) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a transient in-memory store, mainly for tests and demos.
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> EngineResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    fn conn(&self) -> EngineResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| EngineError::StoreLock {
            message: e.to_string(),
        })
    }

    fn ensure_schema(&self) -> EngineResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS shifts (
              shift_id   INTEGER PRIMARY KEY,
              shift_name TEXT NOT NULL,
              start_time TEXT NOT NULL,
              end_time   TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS machine_events (
              event_id   INTEGER PRIMARY KEY AUTOINCREMENT,
              shift_id   INTEGER NOT NULL,
              event_time TEXT NOT NULL,
              event_type TEXT NOT NULL,
              details    TEXT
            );

            CREATE TABLE IF NOT EXISTS production_cycles (
              cycle_id          INTEGER PRIMARY KEY AUTOINCREMENT,
              shift_id          INTEGER NOT NULL,
              timestamp         TEXT NOT NULL,
              product_id        INTEGER NOT NULL,
              good_piece        INTEGER NOT NULL,
              actual_cycle_secs REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS products (
              product_id       INTEGER PRIMARY KEY,
              product_name     TEXT NOT NULL,
              ideal_cycle_secs REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_machine_events_shift
              ON machine_events(shift_id, event_time);
            CREATE INDEX IF NOT EXISTS idx_production_cycles_shift
              ON production_cycles(shift_id, timestamp);
            "#,
        )?;
        Ok(())
    }

    /// Creates or replaces a shift definition.
    pub fn upsert_shift(&self, shift: &Shift) -> EngineResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO shifts (shift_id, shift_name, start_time, end_time)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(shift_id) DO UPDATE SET
                shift_name = excluded.shift_name,
                start_time = excluded.start_time,
                end_time = excluded.end_time
            "#,
            params![shift.id, shift.name, shift.start_time, shift.end_time],
        )?;
        Ok(())
    }

    /// Creates or replaces a product catalog entry.
    pub fn upsert_product(&self, product: &Product) -> EngineResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO products (product_id, product_name, ideal_cycle_secs)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(product_id) DO UPDATE SET
                product_name = excluded.product_name,
                ideal_cycle_secs = excluded.ideal_cycle_secs
            "#,
            params![product.id, product.name, product.ideal_cycle_secs],
        )?;
        Ok(())
    }

    /// Appends a machine event.
    pub fn insert_event(&self, event: &MachineEvent) -> EngineResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO machine_events (shift_id, event_time, event_type, details)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                event.shift_id,
                event.timestamp,
                event.kind.as_str(),
                event.details
            ],
        )?;
        Ok(())
    }

    /// Appends a production cycle record.
    pub fn insert_cycle(&self, cycle: &ProductionCycle) -> EngineResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO production_cycles (shift_id, timestamp, product_id, good_piece, actual_cycle_secs)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                cycle.shift_id,
                cycle.timestamp,
                cycle.product_id,
                cycle.is_good,
                cycle.actual_cycle_secs
            ],
        )?;
        Ok(())
    }

    /// Lists all shifts, ordered by start time.
    pub fn shifts(&self) -> EngineResult<Vec<Shift>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT shift_id, shift_name, start_time, end_time FROM shifts ORDER BY start_time ASC",
        )?;
        let rows = stmt
            .query_map([], shift_from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Fetches a single shift by identifier.
    pub fn shift(&self, shift_id: i64) -> EngineResult<Option<Shift>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT shift_id, shift_name, start_time, end_time FROM shifts WHERE shift_id = ?1",
        )?;
        match stmt.query_row(params![shift_id], shift_from_row) {
            Ok(shift) => Ok(Some(shift)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns a shift's events in ascending timestamp order.
    pub fn events_for_shift(&self, shift_id: i64) -> EngineResult<Vec<MachineEvent>> {
        let conn = self.conn()?;
        query_events(&conn, shift_id)
    }

    /// Returns a shift's most recent events, newest first, at most `limit`.
    pub fn recent_events_for_shift(
        &self,
        shift_id: i64,
        limit: usize,
    ) -> EngineResult<Vec<MachineEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT shift_id, event_time, event_type, details
            FROM machine_events
            WHERE shift_id = ?1
            ORDER BY event_time DESC, event_id DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt
            .query_map(params![shift_id, limit as i64], event_from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Returns a shift's production cycles in ascending timestamp order.
    pub fn cycles_for_shift(&self, shift_id: i64) -> EngineResult<Vec<ProductionCycle>> {
        let conn = self.conn()?;
        query_cycles(&conn, shift_id)
    }

    /// Returns the full product catalog.
    pub fn products(&self) -> EngineResult<Vec<Product>> {
        let conn = self.conn()?;
        query_products(&conn)
    }

    /// Reads everything the metrics computation needs for one shift while
    /// holding the connection once, so the four collections come from the
    /// same point in time. Returns `None` when the shift does not exist.
    pub fn snapshot(&self, shift_id: i64) -> EngineResult<Option<ShiftSnapshot>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT shift_id, shift_name, start_time, end_time FROM shifts WHERE shift_id = ?1",
        )?;
        let shift = match stmt.query_row(params![shift_id], shift_from_row) {
            Ok(shift) => shift,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(ShiftSnapshot {
            shift,
            events: query_events(&conn, shift_id)?,
            cycles: query_cycles(&conn, shift_id)?,
            products: query_products(&conn)?,
        }))
    }
}

fn shift_from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Shift> {
    Ok(Shift {
        id: row.get(0)?,
        name: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
    })
}

fn event_from_row(row: &rusqlite::Row<'_>) -> SqliteResult<MachineEvent> {
    let kind: String = row.get(2)?;
    Ok(MachineEvent {
        shift_id: row.get(0)?,
        timestamp: row.get(1)?,
        kind: EventKind::from(kind),
        details: row.get(3)?,
    })
}

fn cycle_from_row(row: &rusqlite::Row<'_>) -> SqliteResult<ProductionCycle> {
    Ok(ProductionCycle {
        shift_id: row.get(0)?,
        timestamp: row.get(1)?,
        product_id: row.get(2)?,
        is_good: row.get(3)?,
        actual_cycle_secs: row.get(4)?,
    })
}

fn query_events(conn: &Connection, shift_id: i64) -> EngineResult<Vec<MachineEvent>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT shift_id, event_time, event_type, details
        FROM machine_events
        WHERE shift_id = ?1
        ORDER BY event_time ASC, event_id ASC
        "#,
    )?;
    let rows = stmt
        .query_map(params![shift_id], event_from_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

fn query_cycles(conn: &Connection, shift_id: i64) -> EngineResult<Vec<ProductionCycle>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT shift_id, timestamp, product_id, good_piece, actual_cycle_secs
        FROM production_cycles
        WHERE shift_id = ?1
        ORDER BY timestamp ASC, cycle_id ASC
        "#,
    )?;
    let rows = stmt
        .query_map(params![shift_id], cycle_from_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

fn query_products(conn: &Connection) -> EngineResult<Vec<Product>> {
    let mut stmt = conn
        .prepare("SELECT product_id, product_name, ideal_cycle_secs FROM products ORDER BY product_id ASC")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Product {
                id: row.get(0)?,
                name: row.get(1)?,
                ideal_cycle_secs: row.get(2)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}
