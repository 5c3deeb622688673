//! Command-line front end for `flagcraft`.
//!
//! Loads the status definitions file once, then lists status types, shows their
//! fields, or decodes a code typed by the user:
//!
//! ```text
//! flagcraft list
//! flagcraft show GENERAL_STATUS
//! flagcraft decode GENERAL_STATUS 273
//! flagcraft --format json decode GENERAL_STATUS 0x111
//! ```
//!
//! The definitions file is taken from `--config`, then `FLAGCRAFT_CONFIG`, then
//! `status_codes.yaml` in the working directory. A missing or unusable file is
//! fatal and nothing is decoded. Command output goes to stdout; warnings and logs
//! go to stderr.

pub mod cli;
pub mod config;
pub mod input;
pub mod render;
