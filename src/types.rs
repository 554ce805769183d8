//! Core types for the Canopy tree synchronization engine.

/// NodeId: Opaque unique identifier for a file or folder node.
///
/// Assigned by the remote store on creation; unique for the lifetime of
/// the process.
pub type NodeId = String;
