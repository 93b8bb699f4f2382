//! Postforge library interface
//!
//! Generates Postman workspace and collection bundles for the DevRev API
//! from cURL command files and hand-authored collection JSON.
//!
//! # Module Organization
//!
//! - [`curl`] - cURL file tokenizer and parser
//! - [`postman`] - Postman collection v2.1 data model
//! - [`assemble`] - workspace/mega-collection bundle generation
//! - [`scaffold`] - starter directories for APIs without collections
//! - [`enhance`] - parameter-specification enhancement pass
//! - [`errors`] - error types (ForgeError, Result)
//! - [`status`] - exit status codes (ExitStatus)
//! - [`core`] - main execution logic

pub mod assemble;
pub mod cli;
pub mod core;
pub mod curl;
pub mod enhance;
pub mod errors;
pub mod postman;
pub mod scaffold;
pub mod status;
pub mod strings;
