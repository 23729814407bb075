//! Functions to parse and structs to represent data returned by ATA commands.

pub mod id;
