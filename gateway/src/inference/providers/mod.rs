pub mod document_ai;
pub mod dummy;
pub mod gcp_vertex;
pub mod provider_trait;
