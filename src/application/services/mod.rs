pub mod catalog;
pub mod ingestion;
pub mod storage_service;

pub use ingestion::{BatchReport, IncomingFile, IngestionPipeline};
pub use storage_service::{ByteStream, EntryStream, StorageService};
