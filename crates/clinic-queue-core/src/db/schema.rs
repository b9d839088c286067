//! SQLite schema definition.

/// Complete database schema for the clinic queue.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Queue (one row per patient visit, keyed by employee ID)
-- ============================================================================

CREATE TABLE IF NOT EXISTS queue (
    employee_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    queue_number TEXT,                           -- 'D' + zero-padded sequence
    status TEXT NOT NULL DEFAULT 'waiting'
        CHECK (status IN ('waiting', 'being_attended', 'completed')),
    notes TEXT,
    timestamp TEXT NOT NULL,                     -- RFC 3339, FIFO ordering key
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_queue_status ON queue(status);
CREATE INDEX IF NOT EXISTS idx_queue_timestamp ON queue(timestamp);

-- Completed is terminal: no status may ever leave it
CREATE TRIGGER IF NOT EXISTS queue_status_terminal BEFORE UPDATE OF status ON queue
WHEN old.status = 'completed' AND new.status != 'completed'
BEGIN
    SELECT RAISE(ABORT, 'completed visits cannot change status');
END;

-- ============================================================================
-- Users (staff identities with their role side record)
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,                          -- parsed at login, not here
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
