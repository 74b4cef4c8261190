//! Ledger schema

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tag_group (
    id INTEGER PRIMARY KEY,
    name VARCHAR NOT NULL,
    selection_type VARCHAR(11)
        CHECK (selection_type IN ('checkbox', 'select', 'multiselect'))
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_tag_group_name ON tag_group(name);

CREATE TABLE IF NOT EXISTS tag (
    id INTEGER PRIMARY KEY,
    group_id INTEGER NOT NULL REFERENCES tag_group(id),
    name VARCHAR NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_tag_name ON tag(name);

CREATE TABLE IF NOT EXISTS host (
    id INTEGER PRIMARY KEY,
    host VARCHAR NOT NULL,
    host_name VARCHAR,
    ssh_user VARCHAR,
    ssh_port INTEGER
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_host_host ON host(host);

CREATE TABLE IF NOT EXISTS host_tag_map (
    host_id INTEGER NOT NULL REFERENCES host(id),
    tag_id INTEGER NOT NULL REFERENCES tag(id),
    PRIMARY KEY (host_id, tag_id)
);

CREATE TABLE IF NOT EXISTS host_secret (
    host_id INTEGER PRIMARY KEY REFERENCES host(id),
    ssh_pass TEXT NOT NULL
);
"#;
