use std::fmt;

use bson::Document;
use tracing::debug;

use crate::metadata::error::MetadataResult;

/// Adds or overwrites fields of an outgoing request's metadata object.
pub type RequestMetadataWriter = Box<dyn Fn(&mut Document) -> MetadataResult<()> + Send + Sync>;

/// Inspects the metadata object of a reply, given the address of the server that
/// produced it.
pub type ReplyMetadataReader = Box<dyn Fn(&Document, &str) -> MetadataResult<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// Ordered request writers and reply readers for one client or connection.
///
/// Running hooks only needs `&self`, so a registry can be shared behind an `Arc`
/// once it is set up. Registering or deregistering needs `&mut self`; owners that
/// reconfigure a shared registry wrap it in a lock.
#[derive(Default)]
pub struct MetadataHooks {
    next_id: u64,
    request_writers: Vec<(HookId, RequestMetadataWriter)>,
    reply_readers: Vec<(HookId, ReplyMetadataReader)>,
}

impl MetadataHooks {
    pub fn new() -> MetadataHooks {
        MetadataHooks::default()
    }

    fn allocate_id(&mut self) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn register_request_writer<W>(&mut self, writer: W) -> HookId
    where
        W: Fn(&mut Document) -> MetadataResult<()> + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.request_writers.push((id, Box::new(writer)));
        id
    }

    pub fn register_reply_reader<R>(&mut self, reader: R) -> HookId
    where
        R: Fn(&Document, &str) -> MetadataResult<()> + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.reply_readers.push((id, Box::new(reader)));
        id
    }

    /// Returns false if no writer was registered under `id`.
    pub fn deregister_request_writer(&mut self, id: HookId) -> bool {
        let before = self.request_writers.len();
        self.request_writers.retain(|(writer_id, _)| *writer_id != id);
        self.request_writers.len() != before
    }

    pub fn deregister_reply_reader(&mut self, id: HookId) -> bool {
        let before = self.reply_readers.len();
        self.reply_readers.retain(|(reader_id, _)| *reader_id != id);
        self.reply_readers.len() != before
    }

    pub fn request_writer_count(&self) -> usize {
        self.request_writers.len()
    }

    pub fn reply_reader_count(&self) -> usize {
        self.reply_readers.len()
    }

    /// Runs every writer in registration order over a copy of `base_metadata`.
    /// The first failure aborts the run and is returned as-is; the copy is dropped.
    pub fn run_request_writers(&self, base_metadata: &Document) -> MetadataResult<Document> {
        let mut metadata = base_metadata.clone();
        for (index, (_, writer)) in self.request_writers.iter().enumerate() {
            if let Err(error) = writer(&mut metadata) {
                debug!(index, %error, "request metadata writer failed");
                return Err(error);
            }
        }
        Ok(metadata)
    }

    /// Runs every reader in registration order, stopping at the first failure.
    pub fn run_reply_readers(&self, metadata: &Document, remote: &str) -> MetadataResult<()> {
        for (index, (_, reader)) in self.reply_readers.iter().enumerate() {
            if let Err(error) = reader(metadata, remote) {
                debug!(index, remote, %error, "reply metadata reader failed");
                return Err(error);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for MetadataHooks {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MetadataHooks")
            .field("request_writers", &self.request_writers.len())
            .field("reply_readers", &self.reply_readers.len())
            .finish()
    }
}
