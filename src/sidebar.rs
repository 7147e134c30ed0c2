use chrono::{DateTime, Utc};

use crate::models::Conversation;

/// Which thread the next message goes to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveThread {
    /// Nothing selected; the next send starts a new conversation.
    #[default]
    New,
    /// A local draft that has no server conversation yet.
    Draft(String),
    Existing(i64),
}

impl ActiveThread {
    /// The `conversation_id` to send with, `None` for a new thread.
    pub fn conversation_id(&self) -> Option<i64> {
        match self {
            ActiveThread::Existing(id) => Some(*id),
            ActiveThread::New | ActiveThread::Draft(_) => None,
        }
    }
}

/// Client-only conversation placeholder created by "New Conversation".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Draft(String),
    Remote(i64),
}

/// One row of the sidebar list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarEntry {
    pub kind: EntryKind,
    pub title: String,
}

impl SidebarEntry {
    pub fn key(&self) -> String {
        match &self.kind {
            EntryKind::Draft(id) => format!("draft-{id}"),
            EntryKind::Remote(id) => format!("conversation-{id}"),
        }
    }

    pub fn thread(&self) -> ActiveThread {
        match &self.kind {
            EntryKind::Draft(id) => ActiveThread::Draft(id.clone()),
            EntryKind::Remote(id) => ActiveThread::Existing(*id),
        }
    }
}

/// Sidebar state: local drafts, the search term and the active thread.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarModel {
    drafts: Vec<Draft>,
    search: String,
    active: ActiveThread,
}

impl SidebarModel {
    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn active(&self) -> &ActiveThread {
        &self.active
    }

    pub fn select(&mut self, thread: ActiveThread) {
        self.active = thread;
    }

    /// Adds a draft at the top of the list and makes it active.
    /// Ids are the creation time in milliseconds, bumped until unique.
    pub fn new_conversation(&mut self, now: DateTime<Utc>, remote_count: usize) -> &Draft {
        let mut millis = now.timestamp_millis();
        while self.drafts.iter().any(|d| d.id == millis.to_string()) {
            millis += 1;
        }
        let id = millis.to_string();
        let title = format!("New Conversation {}", self.drafts.len() + remote_count + 1);

        self.active = ActiveThread::Draft(id.clone());
        self.drafts.insert(0, Draft { id, title });
        &self.drafts[0]
    }

    pub fn remove_draft(&mut self, id: &str) {
        self.drafts.retain(|d| d.id != id);
        if matches!(&self.active, ActiveThread::Draft(active) if active == id) {
            self.active = ActiveThread::New;
        }
    }

    /// A message sent from `sent_from` landed in `conversation_id`.
    /// A draft it was sent from is dropped; if that thread is still active
    /// the server conversation takes its place.
    pub fn thread_saved(&mut self, sent_from: &ActiveThread, conversation_id: i64) {
        if let ActiveThread::Draft(id) = sent_from {
            self.drafts.retain(|d| &d.id != id);
        }
        if &self.active == sent_from {
            self.active = ActiveThread::Existing(conversation_id);
        }
    }

    pub fn conversation_removed(&mut self, conversation_id: i64) {
        if self.active == ActiveThread::Existing(conversation_id) {
            self.active = ActiveThread::New;
        }
    }

    /// Drafts first (newest on top), then server conversations, narrowed by a
    /// case-insensitive substring match on the title.
    pub fn entries(&self, remote: &[Conversation]) -> Vec<SidebarEntry> {
        let needle = self.search.to_lowercase();
        let drafts = self.drafts.iter().map(|d| SidebarEntry {
            kind: EntryKind::Draft(d.id.clone()),
            title: d.title.clone(),
        });
        let remote = remote.iter().map(|c| SidebarEntry {
            kind: EntryKind::Remote(c.conversation_id),
            title: c.title.clone(),
        });

        drafts
            .chain(remote)
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .collect()
    }
}
