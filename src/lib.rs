//! Tools for turning Scopus exports into co-authorship networks and
//! country tables.

pub mod affil;
pub mod countries;
pub mod io;
pub mod logging;
pub mod network;
pub mod records;
