//! Process exit codes

#![allow(dead_code)] // Not every code is mapped by current errors

pub const SUCCESS: i32 = 0;
pub const ERROR: i32 = 1;
pub const EXPORT_ERROR: i32 = 2;
pub const HELM_ERROR: i32 = 3;
pub const IO_ERROR: i32 = 4;
