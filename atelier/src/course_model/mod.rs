//! In-memory model of a course document
//!
//! A course is an ordered tree of chapters, each holding ordered
//! sub-chapters. A sub-chapter carries a title, an HTML content fragment
//! authored on a rich-text surface, an optional video and an ordered list
//! of image attachments. Inline image tokens embedded in the content
//! reference attachments by position (see [`token`]).

mod chapter;
mod command;
mod media;
pub mod token;

pub use chapter::{Chapter, Course, SubChapter};
pub use command::FieldCommand;
pub use media::MediaRef;
pub use token::ImageToken;
