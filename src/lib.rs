//! Tomekey - locale dictionaries and templates for structured JSON datasets
//!
//! Tomekey walks a directory of JSON documents, assigns every translatable
//! leaf a canonical, deduplicated locale key, and writes a source-locale
//! dictionary plus templates that mirror each document with placeholders.
//! Filled-in dictionaries are later resolved through those templates into
//! multi-locale documents.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Key derivation and placeholder engine
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
