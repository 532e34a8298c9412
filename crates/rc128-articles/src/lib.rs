#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod loaders;

pub use crate::config::{CONFIG_ENV_VAR, NavigatorConfig};
pub use crate::error::LoadError;
pub use crate::loaders::{
    LoadedRecords, RowIssue, RowIssueKind, load_csv_records, load_json_records, load_records,
    parse_csv_records, parse_json_records,
};
