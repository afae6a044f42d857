//! Core library for telar, a slice topology editor.
//!
//! A slice is a small virtual network: VM nodes with cpu/ram/disk/image
//! resources and undirected links between them. This crate carries the
//! whole editing machinery behind the CLI: the topology graph and its
//! pattern generators, VM validation, change tracking against a saved
//! baseline, the template codec for the wire and export formats, the
//! REST provisioning client and the editor controller that ties them
//! together.

pub mod client;
pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod observability;
pub mod paths;
pub mod tracker;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use client::{Provisioner, ProvisionerClient, SlicePayload};
pub use codec::{Template, TopologyExport};
pub use editor::{Editor, EditorEvent, EditorMode};
pub use error::{ErrorClass, Result, TelarError};
pub use graph::patterns::Pattern;
pub use graph::TopologyGraph;
pub use tracker::ChangeTracker;
pub use types::{Image, Link, LogEntry, Platform, Slice, SliceStatus, VmSpec};
pub use validate::VmForm;
