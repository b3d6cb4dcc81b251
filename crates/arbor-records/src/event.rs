use arbor_auth::Account;
use arbor_core::ID;
use arbor_core::Unique;
use serde::Deserialize;
use serde::Serialize;

/// Calendar entry. Dates and times are opaque strings supplied by the
/// client, stored and returned verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    id: ID<Self>,
    title: String,
    description: Option<String>,
    event_date: String,
    event_time: Option<String>,
    location: Option<String>,
    created_by: ID<Account>,
    created_at: String,
}

impl Event {
    pub fn new(draft: EventDraft, owner: ID<Account>) -> Self {
        Self {
            id: ID::default(),
            title: draft.title,
            description: draft.description,
            event_date: draft.event_date,
            event_time: draft.event_time,
            location: draft.location,
            created_by: owner,
            created_at: arbor_core::timestamp(),
        }
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn date(&self) -> &str {
        &self.event_date
    }
    pub fn time(&self) -> Option<&str> {
        self.event_time.as_deref()
    }
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
    pub fn owner(&self) -> ID<Account> {
        self.created_by
    }
    pub fn created(&self) -> &str {
        &self.created_at
    }
}

impl Unique for Event {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl From<tokio_postgres::Row> for Event {
    fn from(row: tokio_postgres::Row) -> Self {
        Self {
            id: ID::from(row.get::<_, uuid::Uuid>(0)),
            title: row.get(1),
            description: row.get(2),
            event_date: row.get(3),
            event_time: row.get(4),
            location: row.get(5),
            created_by: ID::from(row.get::<_, uuid::Uuid>(6)),
            created_at: row.get(7),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub event_time: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub location: Option<String>,
}

impl EventPatch {
    pub(crate) fn changes(&self) -> Vec<(&'static str, &(dyn tokio_postgres::types::ToSql + Sync))> {
        let mut set: Vec<(&'static str, &(dyn tokio_postgres::types::ToSql + Sync))> = Vec::new();
        if let Some(ref title) = self.title {
            set.push(("title", title));
        }
        if let Some(ref description) = self.description {
            set.push(("description", description));
        }
        if let Some(ref event_date) = self.event_date {
            set.push(("event_date", event_date));
        }
        if let Some(ref event_time) = self.event_time {
            set.push(("event_time", event_time));
        }
        if let Some(ref location) = self.location {
            set.push(("location", location));
        }
        set
    }
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

mod schema {
    use arbor_pg::*;

    impl Schema for super::Event {
        fn name() -> &'static str {
            EVENTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                EVENTS,
                " (
                    id           UUID PRIMARY KEY,
                    title        VARCHAR(255) NOT NULL,
                    description  TEXT,
                    event_date   TEXT NOT NULL,
                    event_time   TEXT,
                    location     TEXT,
                    created_by   UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    created_at   TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_events_owner ON ",
                EVENTS,
                " (created_by);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(EventPatch::default().is_empty());
        assert!(serde_json::from_str::<EventPatch>("{}").unwrap().is_empty());
    }

    #[test]
    fn patch_lists_only_present_fields() {
        let patch = EventPatch {
            title: Some("Reunion".to_string()),
            location: Some("lake house".to_string()),
            ..Default::default()
        };
        let columns: Vec<_> = patch.changes().iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec!["title", "location"]);
    }
}
