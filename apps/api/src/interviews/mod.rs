// Interview records: free-text ingestion, listing and user reviews.
// Extraction goes through llm_client; persistence through store::RecordStore.

pub mod extraction;
pub mod handlers;
pub mod prompts;
