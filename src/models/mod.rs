pub mod artifact_store;

pub use artifact_store::{ArtifactStore, CreateStoreRequest, StoreProperty, StoresResponse};
