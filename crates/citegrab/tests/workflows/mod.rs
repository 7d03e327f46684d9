use super::*;

mod download;
mod harvest;
mod search;
