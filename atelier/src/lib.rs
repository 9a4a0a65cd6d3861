//! atelier - course chapter authoring engine
//!
//! The in-memory model of a course document (chapters, sub-chapters,
//! attachments), the editing operations that mutate it, the read-side
//! image-token substitution that turns authored HTML into displayable
//! pages, and the save payload contract of the REST backend.

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod client;
pub mod course_config;
pub mod course_model;
pub mod editor;
pub mod payload;
pub mod render;
pub mod store;
pub mod surface;
