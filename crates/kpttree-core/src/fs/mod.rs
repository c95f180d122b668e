//! File system abstractions.
//!
//! [`entry::FileEntry`] is the file identity the tree is built from;
//! [`ops`] provides direct-children listing ([`ops::read_directory`]) and
//! the recursive enumeration used by scans ([`ops::collect_descendants`]).

pub mod entry;
pub mod ops;
