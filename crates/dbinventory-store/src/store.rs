//! Ledger repository
//!
//! Explicit query methods over the SQLite ledger. Relationships are never
//! loaded implicitly: tags for a host come from [`LedgerStore::list_tags_for_host`]
//! and links are made with [`LedgerStore::attach_tag`].

use crate::cipher::SecretCipher;
use crate::error::{Result, StoreError};
use crate::schema::SCHEMA;
use dbinventory_core::{
    Host, LedgerHost, NewHost, NewTag, NewTagGroup, SelectionType, Tag, TagGroup, TaggedAs,
};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open the ledger at `path`
    ///
    /// A missing file is an error unless `create` is set, in which case the
    /// database and its tables are created.
    pub fn open(path: impl AsRef<Path>, create: bool) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            if !create {
                return Err(StoreError::DatabaseMissing(path.to_path_buf()));
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            tracing::info!("Creating ledger database at {}", path.display());
        }

        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a throwaway in-memory ledger
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // ------------------------------------------------------------------
    // Tag groups
    // ------------------------------------------------------------------

    pub fn get_group(&self, name: &str) -> Result<Option<TagGroup>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, selection_type FROM tag_group WHERE name = ?1",
                params![name],
                group_from_row,
            )
            .optional()?)
    }

    /// Add a tag group; an existing group of the same name is returned as-is
    pub fn add_group(&self, group: &NewTagGroup) -> Result<TagGroup> {
        if let Some(existing) = self.get_group(&group.name)? {
            tracing::debug!("Tag group {} already exists", group.name);
            return Ok(existing);
        }

        self.conn.execute(
            "INSERT INTO tag_group (name, selection_type) VALUES (?1, ?2)",
            params![group.name, group.selection_type.as_str()],
        )?;
        tracing::debug!("Added tag group {}", group.name);

        Ok(TagGroup {
            id: self.conn.last_insert_rowid(),
            name: group.name.clone(),
            selection_type: group.selection_type,
        })
    }

    pub fn list_groups(&self) -> Result<Vec<TagGroup>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, selection_type FROM tag_group ORDER BY id")?;
        let groups = stmt
            .query_map([], group_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    pub fn get_tag(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, group_id, name FROM tag WHERE name = ?1",
                params![name],
                tag_from_row,
            )
            .optional()?)
    }

    /// Add a tag to an existing group
    ///
    /// The group is resolved before anything is written; an unknown group is
    /// an error and leaves the ledger untouched.
    pub fn add_tag(&self, tag: &NewTag) -> Result<Tag> {
        let group = self
            .get_group(&tag.group)?
            .ok_or_else(|| StoreError::GroupNotFound {
                tag: tag.name.clone(),
                group: tag.group.clone(),
            })?;

        if let Some(existing) = self.get_tag(&tag.name)? {
            tracing::debug!("Tag {} already exists", tag.name);
            return Ok(existing);
        }

        self.conn.execute(
            "INSERT INTO tag (group_id, name) VALUES (?1, ?2)",
            params![group.id, tag.name],
        )?;
        tracing::debug!("Added tag {} to group {}", tag.name, group.name);

        Ok(Tag {
            id: self.conn.last_insert_rowid(),
            group_id: group.id,
            name: tag.name.clone(),
        })
    }

    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, group_id, name FROM tag ORDER BY id")?;
        let tags = stmt
            .query_map([], tag_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    // ------------------------------------------------------------------
    // Hosts
    // ------------------------------------------------------------------

    pub fn get_host(&self, address: &str) -> Result<Option<Host>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, host, host_name, ssh_user, ssh_port FROM host WHERE host = ?1",
                params![address],
                host_from_row,
            )
            .optional()?)
    }

    /// Add a host and attach its tags
    ///
    /// A host with the same address is returned unchanged; its optional
    /// fields are never updated. Tags named in `host.tags` are attached
    /// either way, and names that do not resolve are skipped.
    pub fn add_host(&self, host: &NewHost) -> Result<Host> {
        let record = match self.get_host(&host.host)? {
            Some(existing) => {
                tracing::debug!("Host {} already exists", host.host);
                existing
            }
            None => {
                self.conn.execute(
                    "INSERT INTO host (host, host_name, ssh_user, ssh_port) VALUES (?1, ?2, ?3, ?4)",
                    params![host.host, host.host_name, host.ssh_user, host.ssh_port],
                )?;
                tracing::debug!("Added host {}", host.host);
                Host {
                    id: self.conn.last_insert_rowid(),
                    host: host.host.clone(),
                    host_name: host.host_name.clone(),
                    ssh_user: host.ssh_user.clone(),
                    ssh_port: host.ssh_port,
                }
            }
        };

        for tag_name in &host.tags {
            match self.get_tag(tag_name)? {
                Some(tag) => {
                    self.attach_tag(record.id, tag.id)?;
                }
                None => {
                    tracing::warn!("Tag {} not found, not attaching it to {}", tag_name, host.host);
                }
            }
        }

        Ok(record)
    }

    pub fn list_hosts(&self) -> Result<Vec<Host>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, host, host_name, ssh_user, ssh_port FROM host ORDER BY id")?;
        let hosts = stmt
            .query_map([], host_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(hosts)
    }

    // ------------------------------------------------------------------
    // Host ↔ tag links
    // ------------------------------------------------------------------

    /// Link a host to a tag; returns `false` if the link already existed
    pub fn attach_tag(&self, host_id: i64, tag_id: i64) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO host_tag_map (host_id, tag_id) VALUES (?1, ?2)",
            params![host_id, tag_id],
        )?;
        Ok(inserted > 0)
    }

    /// Tags carried by a host, with their group names, in tag id order
    pub fn list_tags_for_host(&self, host_id: i64) -> Result<Vec<TaggedAs>> {
        let mut stmt = self.conn.prepare(
            "SELECT tag.name, tag_group.name
             FROM host_tag_map
             JOIN tag ON tag.id = host_tag_map.tag_id
             JOIN tag_group ON tag_group.id = tag.group_id
             WHERE host_tag_map.host_id = ?1
             ORDER BY tag.id",
        )?;
        let tags = stmt
            .query_map(params![host_id], |row| {
                Ok(TaggedAs {
                    tag: row.get(0)?,
                    group: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    /// Every host with its tags
    pub fn ledger_hosts(&self) -> Result<Vec<LedgerHost>> {
        self.list_hosts()?
            .into_iter()
            .map(|host| {
                let tags = self.list_tags_for_host(host.id)?;
                Ok(LedgerHost { host, tags })
            })
            .collect()
    }

    /// A single host with its tags, by address
    pub fn ledger_host(&self, address: &str) -> Result<Option<LedgerHost>> {
        match self.get_host(address)? {
            Some(host) => {
                let tags = self.list_tags_for_host(host.id)?;
                Ok(Some(LedgerHost { host, tags }))
            }
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Host secrets
    // ------------------------------------------------------------------

    /// Store an encrypted SSH password for a host, replacing any previous one
    pub fn set_host_secret(
        &self,
        host_id: i64,
        cipher: &SecretCipher,
        ssh_pass: &str,
    ) -> Result<()> {
        let sealed = cipher.encrypt(ssh_pass)?;
        self.conn.execute(
            "INSERT INTO host_secret (host_id, ssh_pass) VALUES (?1, ?2)
             ON CONFLICT(host_id) DO UPDATE SET ssh_pass = excluded.ssh_pass",
            params![host_id, sealed],
        )?;
        Ok(())
    }

    /// Decrypted SSH password for a host, if one is stored
    pub fn host_secret(&self, host_id: i64, cipher: &SecretCipher) -> Result<Option<String>> {
        let sealed: Option<String> = self
            .conn
            .query_row(
                "SELECT ssh_pass FROM host_secret WHERE host_id = ?1",
                params![host_id],
                |row| row.get(0),
            )
            .optional()?;
        sealed.map(|s| cipher.decrypt(&s)).transpose()
    }

    pub fn has_host_secret(&self, host_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM host_secret WHERE host_id = ?1",
            params![host_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn group_from_row(row: &Row<'_>) -> rusqlite::Result<TagGroup> {
    let selection_type: String = row.get(2)?;
    let selection_type = selection_type
        .parse::<SelectionType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(TagGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        selection_type,
    })
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        group_id: row.get(1)?,
        name: row.get(2)?,
    })
}

fn host_from_row(row: &Row<'_>) -> rusqlite::Result<Host> {
    Ok(Host {
        id: row.get(0)?,
        host: row.get(1)?,
        host_name: row.get(2)?,
        ssh_user: row.get(3)?,
        ssh_port: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded() -> LedgerStore {
        let store = LedgerStore::open_in_memory().unwrap();
        store
            .add_group(&NewTagGroup::new("environment", SelectionType::Select))
            .unwrap();
        store
            .add_tag(&NewTag::new("production", "environment"))
            .unwrap();
        store
    }

    #[test]
    fn test_open_missing_without_create() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("hosts.sqlite3");

        let result = LedgerStore::open(&path, false);
        assert!(matches!(result, Err(StoreError::DatabaseMissing(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_create_then_reopen() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("hosts.sqlite3");

        {
            let store = LedgerStore::open(&path, true).unwrap();
            store.add_host(&NewHost::new("10.0.0.1")).unwrap();
        }

        let store = LedgerStore::open(&path, false).unwrap();
        assert_eq!(store.list_hosts().unwrap().len(), 1);
    }

    #[test]
    fn test_add_host_twice_keeps_one_record() {
        let store = seeded();

        let first = store
            .add_host(&NewHost::new("10.0.0.1").with_ssh_user("root"))
            .unwrap();
        let second = store
            .add_host(&NewHost::new("10.0.0.1").with_ssh_user("deploy").with_ssh_port(2222))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(second.ssh_user.as_deref(), Some("root"));
        assert_eq!(second.ssh_port, None);
        assert_eq!(store.list_hosts().unwrap().len(), 1);
    }

    #[test]
    fn test_add_tag_with_missing_group_writes_nothing() {
        let store = LedgerStore::open_in_memory().unwrap();

        let result = store.add_tag(&NewTag::new("production", "environment"));
        match result {
            Err(StoreError::GroupNotFound { tag, group }) => {
                assert_eq!(tag, "production");
                assert_eq!(group, "environment");
            }
            other => panic!("Expected GroupNotFound, got {:?}", other),
        }
        assert!(store.list_tags().unwrap().is_empty());
        assert!(store.list_groups().unwrap().is_empty());
    }

    #[test]
    fn test_add_group_and_tag_are_idempotent() {
        let store = seeded();
        let group = store
            .add_group(&NewTagGroup::new("environment", SelectionType::Checkbox))
            .unwrap();
        // existing group keeps its original selection type
        assert_eq!(group.selection_type, SelectionType::Select);

        store
            .add_tag(&NewTag::new("production", "environment"))
            .unwrap();
        assert_eq!(store.list_groups().unwrap().len(), 1);
        assert_eq!(store.list_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_host_tags_are_attached_and_listed() {
        let store = seeded();
        let host = store
            .add_host(
                &NewHost::new("10.0.0.1")
                    .with_tag("production")
                    .with_tag("no-such-tag"),
            )
            .unwrap();

        let tags = store.list_tags_for_host(host.id).unwrap();
        assert_eq!(
            tags,
            vec![TaggedAs {
                tag: "production".to_string(),
                group: "environment".to_string(),
            }]
        );

        // re-adding attaches nothing new
        store
            .add_host(&NewHost::new("10.0.0.1").with_tag("production"))
            .unwrap();
        assert_eq!(store.list_tags_for_host(host.id).unwrap().len(), 1);
    }

    #[test]
    fn test_attach_tag_reports_new_links() {
        let store = seeded();
        let host = store.add_host(&NewHost::new("10.0.0.1")).unwrap();
        let tag = store.get_tag("production").unwrap().unwrap();

        assert!(store.attach_tag(host.id, tag.id).unwrap());
        assert!(!store.attach_tag(host.id, tag.id).unwrap());
    }

    #[test]
    fn test_selection_type_is_constrained() {
        let store = LedgerStore::open_in_memory().unwrap();
        let result = store.conn.execute(
            "INSERT INTO tag_group (name, selection_type) VALUES ('bad', 'radio')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_host_secret_roundtrip() {
        let store = seeded();
        let host = store.add_host(&NewHost::new("10.0.0.1")).unwrap();
        let cipher = SecretCipher::new("ledger-secret").unwrap();

        assert_eq!(store.host_secret(host.id, &cipher).unwrap(), None);
        store.set_host_secret(host.id, &cipher, "hunter2").unwrap();
        assert!(store.has_host_secret(host.id).unwrap());
        assert_eq!(
            store.host_secret(host.id, &cipher).unwrap().as_deref(),
            Some("hunter2")
        );

        let wrong = SecretCipher::new("other").unwrap();
        assert!(store.host_secret(host.id, &wrong).is_err());
    }

    #[test]
    fn test_ledger_host_lookup() {
        let store = seeded();
        store
            .add_host(&NewHost::new("db.example.com").with_tag("production"))
            .unwrap();

        let found = store.ledger_host("db.example.com").unwrap().unwrap();
        assert!(found.has_tag("production"));
        assert!(store.ledger_host("nope.example.com").unwrap().is_none());
    }
}
