pub mod binary_metadata;
