#![allow(dead_code)]

pub mod state_helpers;
