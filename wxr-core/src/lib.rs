//! # wxr-core
//!
//! Split and recompose pipelines for WordPress eXtended RSS (WXR) exports.
//!
//! [`split::split_document`] turns one archive into a `Header.xml` holding the
//! channel envelope plus one file group per `<item>`, named
//! `{post_type}-{post_id}[.{post_name}].xml`. In the default split layout the
//! `content:encoded` and `excerpt:encoded` bodies go to `html/` companions so
//! the item XML stays small and diffable. [`compose::compose_directory`] reads
//! such a directory back, in sort key order, and produces a single archive.
//!
//! Both directions clean up `wp:postmeta` entries the same way (see
//! [`sanitize`]) and go through the [`storage::Storage`] trait for all file
//! access.

pub mod compose;
pub mod config;
pub mod error;
pub mod item;
pub mod naming;
pub mod sanitize;
pub mod split;
pub mod storage;
pub mod xml;


pub use compose::{compose_directory, ComposeSummary, Composition};
pub use config::{ComposeOptions, HtmlLayout, SplitOptions};
pub use error::{Error, Result};
pub use item::{Item, MetaEntry, Namespaces};
pub use naming::Identity;
pub use sanitize::MetaReport;
pub use split::{split_document, split_file, SplitSummary};
pub use storage::{LocalFs, MemoryFs, Storage};
